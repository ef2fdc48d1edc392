mod purge;
mod scheduler;

pub use purge::{PurgeReport, purge_completed_todos};
pub use scheduler::{PurgeScheduler, next_run_after};
