//! Execution glue between test plans, controllers and the report
//!
//! - `controller` - The controller trait and tester options
//! - `command` - Controller driven by shell command templates
//! - `actions` - Action probes
//! - `orchestrator` - A full report run

pub mod actions;
pub mod command;
pub mod controller;
pub mod orchestrator;

pub use actions::run_actions;
pub use command::CommandController;
pub use controller::{Controller, ControllerError, TesterOptions};
pub use orchestrator::{ProviderFailure, ReportRunner, RunSummary};
