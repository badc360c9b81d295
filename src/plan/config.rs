//! Report configuration
//!
//! Loaded from `cwr.yaml`; every field is optional:
//!
//! ```yaml
//! results_dir: results
//! max_history: 10
//! parallel: false
//!
//! providers:
//!   rackspace: Rackspace
//!
//! tester:
//!   command: "bundletester -e {{shell_quote environment}} -t {{shell_quote testdir}} -r json"
//!   info_command: "cat {{environment}}-info.json"
//!   action_command: "juju run-action {{shell_quote unit}} {{shell_quote action}} --wait --format json -m {{shell_quote environment}}"
//! ```
//!
//! Commands are handlebars templates rendered against the run options. Values
//! are inserted verbatim; wrap them in `{{shell_quote ...}}` to pass them to the
//! shell as single words.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::loader::{load_yaml, LoadError};

/// Default config file name
pub const DEFAULT_CONFIG_FILE: &str = "cwr.yaml";

const DEFAULT_TEST_COMMAND: &str = "bundletester -e {{shell_quote environment}} \
-t {{shell_quote testdir}} -r json -l {{shell_quote log_level}}\
{{#if bundle}} -b {{shell_quote bundle}}{{/if}}{{#if deployment}} -d {{shell_quote deployment}}{{/if}}\
{{#if no_destroy}} -n{{/if}}{{#if dry_run}} --dry-run{{/if}}{{#if verbose}} -v{{/if}}\
{{#unless failfast}} --allow-failure{{/unless}}{{#if skip_implicit}} --skip-implicit{{/if}}\
{{#each exclude}} --exclude {{shell_quote this}}{{/each}}{{#if tests_yaml}} -y {{shell_quote tests_yaml}}{{/if}}\
{{#if test_pattern}} --test-pattern {{shell_quote test_pattern}}{{/if}}{{#each tests}} {{shell_quote this}}{{/each}}";

const DEFAULT_ACTION_COMMAND: &str = "juju run-action {{shell_quote unit}} {{shell_quote action}} \
--wait --format json -m {{shell_quote environment}}";

/// How the tester and probes are invoked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TesterConfig {
    /// Runs the tests; prints the raw JSON results on stdout
    #[serde(default = "default_test_command")]
    pub command: String,

    /// Prints the controller info as a JSON object on stdout
    #[serde(default)]
    pub info_command: Option<String>,

    /// Runs one action on one unit; prints its result as JSON on stdout
    #[serde(default = "default_action_command")]
    pub action_command: String,
}

fn default_test_command() -> String {
    DEFAULT_TEST_COMMAND.to_string()
}

fn default_action_command() -> String {
    DEFAULT_ACTION_COMMAND.to_string()
}

impl Default for TesterConfig {
    fn default() -> Self {
        Self {
            command: default_test_command(),
            info_command: None,
            action_command: default_action_command(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,

    /// Number of earlier runs shown as history
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Run controllers concurrently
    #[serde(default)]
    pub parallel: bool,

    /// Extra provider-type display names
    #[serde(default)]
    pub providers: HashMap<String, String>,

    #[serde(default)]
    pub tester: TesterConfig,
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_max_history() -> usize {
    10
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            max_history: default_max_history(),
            parallel: false,
            providers: HashMap::new(),
            tester: TesterConfig::default(),
        }
    }
}

impl ReportConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        load_yaml(path.as_ref())
    }
}
