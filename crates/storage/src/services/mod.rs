pub mod medals;
pub mod ranking;
pub mod reconcile;
pub mod schedule;
pub mod status;
