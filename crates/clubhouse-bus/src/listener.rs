use std::fmt;
use std::sync::Arc;

type Callback = dyn Fn(&serde_json::Value) -> anyhow::Result<()> + Send + Sync;

/// Callback registered against a topic.
///
/// Identity is the allocation behind the handle: clones of one `Listener`
/// are the same listener, two `Listener::new` calls never are.
#[derive(Clone)]
pub struct Listener(Arc<Callback>);

impl Listener {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&serde_json::Value) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Listener(Arc::new(f))
    }

    pub fn same_as(&self, other: &Listener) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }

    pub(crate) fn call(&self, payload: &serde_json::Value) -> anyhow::Result<()> {
        (self.0)(payload)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({:p})", Arc::as_ptr(&self.0) as *const ())
    }
}
