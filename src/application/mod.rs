//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the application.

mod dashboard;
mod profile;

pub use dashboard::{DashboardSummary, TREND_WINDOW};
pub use profile::ProfileService;
