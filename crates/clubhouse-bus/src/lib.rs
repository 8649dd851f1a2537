//! Publish/subscribe notifications between independently rendered screens.

pub mod bus;
pub mod listener;
pub mod payload;
pub mod registry;
pub mod topic;

pub use bus::{BusEvent, EmitReport, EventBus};
pub use listener::Listener;
pub use payload::DataChanged;
pub use registry::ListenerRegistry;
pub use topic::Topic;
