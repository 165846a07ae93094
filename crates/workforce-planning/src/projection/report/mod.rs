mod summary;
pub mod views;

pub use summary::WorkforcePlan;
pub use views::WorkforcePlanSummary;
