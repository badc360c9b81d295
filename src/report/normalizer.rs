//! Conversion of raw tester output into [`ProviderResult`]s
//!
//! The tester reports one event per test:
//!
//! ```json
//! {"tests": [{"test": "charm-proof", "suite": "git", "returncode": 0, "duration": 1.55, "output": "ok"}]}
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::document::{ProviderResult, TestRecord};
use super::error::ReportError;
use super::outcome::TestResult;

/// One raw test event as produced by the tester
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTestEvent {
    #[serde(default)]
    pub test: String,
    #[serde(default)]
    pub suite: String,
    #[serde(default)]
    pub returncode: Option<i64>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub output: Option<String>,
}

/// The tester's full result blob for one provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResults {
    #[serde(default)]
    pub tests: Vec<RawTestEvent>,
}

impl RawResults {
    pub fn from_json(provider: &str, content: &str) -> Result<Self, ReportError> {
        serde_json::from_str(content).map_err(|e| ReportError::MalformedResult {
            provider: provider.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Lookup from raw provider-type codes to display names.
///
/// Codes without an entry map to themselves.
#[derive(Debug, Clone)]
pub struct ProviderNames {
    names: HashMap<String, String>,
}

impl Default for ProviderNames {
    fn default() -> Self {
        let names = [
            ("ec2", "Amazon Web Services"),
            ("gce", "Google Compute Engine"),
            ("azure", "Microsoft Azure"),
            ("joyent", "Joyent"),
            ("openstack", "OpenStack"),
            ("maas", "MAAS"),
            ("lxd", "LXD"),
            ("local", "Local"),
            ("manual", "Manual"),
        ]
        .into_iter()
        .map(|(code, name)| (code.to_string(), name.to_string()))
        .collect();
        Self { names }
    }
}

impl ProviderNames {
    /// Built-in table with `extra` entries added over it
    pub fn with_overrides(extra: &HashMap<String, String>) -> Self {
        let mut table = Self::default();
        for (code, name) in extra {
            table.insert(code, name);
        }
        table
    }

    pub fn insert(&mut self, code: impl Into<String>, name: impl Into<String>) {
        self.names.insert(code.into(), name.into());
    }

    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.names.get(code).map(String::as_str).unwrap_or(code)
    }
}

/// Normalize one provider's raw results.
///
/// `info` is passed through untouched. Fails with
/// [`ReportError::MalformedResult`] when an event lacks its return code or
/// duration, and with [`ReportError::InvalidInput`] when there are no events.
pub fn normalize(
    provider_name_raw: &str,
    names: &ProviderNames,
    info: Map<String, Value>,
    raw: &RawResults,
    action_results: Vec<Value>,
) -> Result<ProviderResult, ReportError> {
    let provider_name = names.display_name(provider_name_raw);

    let tests = raw
        .tests
        .iter()
        .enumerate()
        .map(|(index, event)| to_record(provider_name, index, event))
        .collect::<Result<Vec<_>, _>>()?;

    ProviderResult::new(provider_name, info, tests, action_results)
}

fn to_record(
    provider: &str,
    index: usize,
    event: &RawTestEvent,
) -> Result<TestRecord, ReportError> {
    let malformed = |field: &str| ReportError::MalformedResult {
        provider: provider.to_string(),
        reason: format!("test #{} ({}) is missing '{}'", index, event.test, field),
    };

    let code = event.returncode.ok_or_else(|| malformed("returncode"))?;
    let duration = event.duration.ok_or_else(|| malformed("duration"))?;

    Ok(TestRecord {
        name: event.test.clone(),
        suite: event.suite.clone(),
        result: TestResult::from_return_code(code),
        duration,
        output: event.output.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::outcome::TestOutcome;

    fn raw_results() -> RawResults {
        RawResults::from_json(
            "ec2",
            r#"{
                "tests": [
                    {"returncode": 0, "test": "charm-proof", "output": "foo", "duration": 1.55, "suite": "git"},
                    {"returncode": 0, "test": "00-setup", "output": "foo", "duration": 2.55, "suite": "git"},
                    {"returncode": 1, "test": "10-actions", "duration": 3.55, "suite": "git"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_normalize_maps_return_codes() {
        let result = normalize(
            "ec2",
            &ProviderNames::default(),
            Map::new(),
            &raw_results(),
            vec![],
        )
        .unwrap();

        assert_eq!(result.provider_name(), "Amazon Web Services");
        let results: Vec<_> = result.tests().iter().map(|t| t.result).collect();
        assert_eq!(
            results,
            vec![TestResult::Pass, TestResult::Pass, TestResult::Fail]
        );
        assert_eq!(result.test_outcome(), TestOutcome::SomeFailed);
    }

    #[test]
    fn test_normalize_preserves_fields() {
        let result = normalize(
            "ec2",
            &ProviderNames::default(),
            Map::new(),
            &raw_results(),
            vec![],
        )
        .unwrap();

        let durations: Vec<_> = result.tests().iter().map(|t| t.duration).collect();
        assert_eq!(durations, vec![1.55, 2.55, 3.55]);
        assert_eq!(result.tests()[0].name, "charm-proof");
        assert_eq!(result.tests()[0].suite, "git");
        assert_eq!(result.tests()[0].output.as_deref(), Some("foo"));
        assert_eq!(result.tests()[2].output, None);
    }

    #[test]
    fn test_raw_durations_parse_exactly() {
        let raw = RawResults::from_json(
            "ec2",
            r#"{"tests": [
                {"returncode": 0, "test": "a", "duration": 3981.383252371},
                {"returncode": 0, "test": "b", "duration": 3981.3832523710003}
            ]}"#,
        )
        .unwrap();

        let durations: Vec<_> = raw.tests.iter().map(|t| t.duration).collect();
        assert_eq!(
            durations,
            vec![Some(3981.383252371), Some(3981.3832523710003)]
        );
        assert_ne!(durations[0], durations[1]);
    }

    #[test]
    fn test_unknown_provider_passes_through() {
        let names = ProviderNames::default();
        assert_eq!(names.display_name("ec2"), "Amazon Web Services");
        assert_eq!(names.display_name("aws"), "aws");
        assert_eq!(names.display_name("rackspace"), "rackspace");
    }

    #[test]
    fn test_provider_overrides() {
        let mut extra = HashMap::new();
        extra.insert("rackspace".to_string(), "Rackspace".to_string());
        extra.insert("lxd".to_string(), "LXD (local)".to_string());

        let names = ProviderNames::with_overrides(&extra);
        assert_eq!(names.display_name("rackspace"), "Rackspace");
        assert_eq!(names.display_name("lxd"), "LXD (local)");
        assert_eq!(names.display_name("gce"), "Google Compute Engine");
    }

    #[test]
    fn test_missing_return_code_is_malformed() {
        let raw = RawResults {
            tests: vec![RawTestEvent {
                test: "00-setup".to_string(),
                duration: Some(1.0),
                ..Default::default()
            }],
        };

        let err = normalize("gce", &ProviderNames::default(), Map::new(), &raw, vec![])
            .unwrap_err();
        match err {
            ReportError::MalformedResult { provider, reason } => {
                assert_eq!(provider, "Google Compute Engine");
                assert!(reason.contains("returncode"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_duration_is_malformed() {
        let raw = RawResults {
            tests: vec![RawTestEvent {
                test: "00-setup".to_string(),
                returncode: Some(0),
                ..Default::default()
            }],
        };

        let err = normalize("gce", &ProviderNames::default(), Map::new(), &raw, vec![])
            .unwrap_err();
        assert!(matches!(err, ReportError::MalformedResult { .. }));
    }

    #[test]
    fn test_unparseable_blob_is_malformed() {
        let err = RawResults::from_json("aws", "test passed").unwrap_err();
        assert!(matches!(err, ReportError::MalformedResult { .. }));
    }

    #[test]
    fn test_action_results_kept_in_order() {
        let actions = vec![serde_json::json!({"repo": "/tmp/a"}), serde_json::json!(3)];
        let result = normalize(
            "joyent",
            &ProviderNames::default(),
            Map::new(),
            &raw_results(),
            actions.clone(),
        )
        .unwrap();
        assert_eq!(result.action_results(), actions.as_slice());
    }
}
