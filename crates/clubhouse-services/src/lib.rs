//! Screen-facing operations over the shared storage accessor and event bus.

pub mod checkin;
pub mod context;
pub mod events;
pub mod home;
pub mod partners;
pub mod profile;
pub mod statistics;

#[cfg(test)]
mod testing;

pub use checkin::{CheckInOutcome, CheckInService};
pub use context::AppContext;
pub use events::{EventsService, SignupChange};
pub use home::{home_summary, home_summary_on, HomeSummary};
pub use partners::{NewPartnerRequest, PartnerService};
pub use profile::{
    calculate_bmi, personalized_advice, toggle_goal, BmiCategory, BmiReading, ProfileService,
};
pub use statistics::{
    goal_progress, monthly_attendance, GoalProgress, StatisticsReport, StatisticsService,
};
