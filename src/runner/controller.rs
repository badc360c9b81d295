//! Controller abstraction over a deployed environment

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::plan::TestPlan;

/// Errors from driving a controller
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Command `{command}` exited with code {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Command `{command}` produced invalid output: {error}")]
    InvalidOutput { command: String, error: String },

    #[error("Template error: {0}")]
    Template(String),
}

/// Options passed through to the tester
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TesterOptions {
    /// Working directory of the tester
    #[serde(skip)]
    pub workdir: Option<PathBuf>,
    pub bundle: Option<String>,
    pub deployment: Option<String>,
    pub no_destroy: bool,
    pub log_level: String,
    pub dry_run: bool,
    pub verbose: bool,
    pub failfast: bool,
    pub skip_implicit: bool,
    pub exclude: Vec<String>,
    pub tests_yaml: Option<String>,
    pub test_pattern: Option<String>,
}

impl Default for TesterOptions {
    fn default() -> Self {
        Self {
            workdir: None,
            bundle: None,
            deployment: None,
            no_destroy: false,
            log_level: "INFO".to_string(),
            dry_run: false,
            verbose: false,
            failfast: true,
            skip_implicit: false,
            exclude: Vec::new(),
            tests_yaml: None,
            test_pattern: None,
        }
    }
}

/// One target environment the bundle is tested against
#[async_trait]
pub trait Controller: Send + Sync {
    /// Controller name as given on the command line
    fn name(&self) -> &str;

    /// Provider metadata; `ProviderType` names the cloud when present
    async fn info(&self) -> Result<Map<String, Value>, ControllerError>;

    /// Run the plan's tests and return the tester's raw JSON output
    async fn run_tests(
        &self,
        plan: &TestPlan,
        options: &TesterOptions,
    ) -> Result<String, ControllerError>;

    /// Run one action on one unit
    async fn run_action(&self, unit: &str, action: &str) -> Result<Value, ControllerError>;
}
