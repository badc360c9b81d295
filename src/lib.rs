//! # Cloud Weather Report
//!
//! Runs a bundle's test plan against one or more cloud controllers and turns
//! the results into a JSON record plus an HTML report that shows the run next
//! to earlier runs of the same bundle.
//!
//! ## Flow
//!
//! 1. Each controller runs the tests and reports raw results
//! 2. Raw results are normalized into one [`ProviderResult`] per controller
//! 3. Earlier result files for the bundle are located in the results directory
//! 4. The run is assembled into a [`ResultDocument`]
//! 5. The document is written as JSON and rendered to HTML with its history
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cloud_weather_report::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let plan = TestPlan::load("test_plan.yaml")?;
//!     let bundle = BundleInfo::named(&plan.bundle);
//!     let config = ReportConfig::default();
//!
//!     let controllers: Vec<Box<dyn Controller>> = vec![
//!         Box::new(CommandController::new("aws", &config.tester)?),
//!         Box::new(CommandController::new("gce", &config.tester)?),
//!     ];
//!
//!     let summary = ReportRunner::new(plan, bundle)
//!         .config(config)
//!         .run(&controllers)
//!         .await?;
//!
//!     println!("Report written to {}", summary.files.html.display());
//!     Ok(())
//! }
//! ```

pub mod plan;
pub mod report;
pub mod runner;

// Re-export main types
pub use plan::{load_bundle_info, LoadError, ReportConfig, TestPlan, TesterConfig};
pub use report::{
    assemble, classify, emit, locate, normalize, BundleInfo, EmitError, Emitted, HistoricalSet,
    HtmlRenderer, ProviderNames, ProviderResult, RawResults, RawTestEvent, Render, Report,
    ReportError, ResultDocument, ResultFiles, TestOutcome, TestRecord, TestResult,
};
pub use runner::{
    run_actions, CommandController, Controller, ControllerError, ReportRunner, RunSummary,
    TesterOptions,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::plan::{load_bundle_info, LoadError, ReportConfig, TestPlan, DEFAULT_CONFIG_FILE};
    pub use crate::report::{
        BundleInfo, HistoricalSet, HtmlRenderer, ProviderResult, Render, ReportError,
        ResultDocument, ResultFiles, TestOutcome, TestResult,
    };
    pub use crate::runner::{
        CommandController, Controller, ControllerError, ReportRunner, RunSummary, TesterOptions,
    };
}
