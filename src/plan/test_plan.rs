//! Test plan definition
//!
//! ```yaml
//! bundle: git
//! bundle_file: bundle.yaml
//! tests:
//!   - charm-proof
//!   - 00-setup
//! benchmark:
//!   git/0:
//!     - perf
//!     - stress
//!   git/1: perf
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::loader::{load_yaml, LoadError};

/// Declarative list of tests and action probes for one bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestPlan {
    /// Bundle name, also the tester's test directory
    pub bundle: String,

    /// Tests to run; all tests when absent
    #[serde(default)]
    pub tests: Option<Vec<String>>,

    /// Bundle definition, relative to the plan file
    #[serde(default)]
    pub bundle_file: Option<PathBuf>,

    /// Actions to run per unit after the tests
    #[serde(default)]
    pub benchmark: BTreeMap<String, ActionList>,
}

/// One action name or a list of them
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActionList(pub Vec<String>);

impl<'de> Deserialize<'de> for ActionList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ActionListHelper {
            One(String),
            Many(Vec<String>),
        }

        match ActionListHelper::deserialize(deserializer)? {
            ActionListHelper::One(action) => Ok(ActionList(vec![action])),
            ActionListHelper::Many(actions) => Ok(ActionList(actions)),
        }
    }
}

impl TestPlan {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        load_yaml(path.as_ref())
    }

    /// `(unit, action)` pairs in unit order, then listed order
    pub fn action_probes(&self) -> Vec<(&str, &str)> {
        self.benchmark
            .iter()
            .flat_map(|(unit, actions)| {
                actions
                    .0
                    .iter()
                    .map(move |action| (unit.as_str(), action.as_str()))
            })
            .collect()
    }
}
