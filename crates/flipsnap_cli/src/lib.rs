//! Headless replay tooling for flipsnap
//!
//! Scenarios script pointer input, clock advances and navigation calls
//! against a widget bound to an in-memory container. The runner records
//! every notification and event disposition into a JSON report.

pub mod report;
pub mod runner;
pub mod scenario;

pub use report::{
    DispositionRecord, FinalState, NotificationRecord, ReplayReport, ReportStatus,
};
pub use runner::{run_loaded_scenario, run_scenario};
pub use scenario::{ContainerSpec, HostPreset, PointerKind, Scenario, ScenarioStep};
