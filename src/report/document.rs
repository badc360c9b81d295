//! Canonical result document types
//!
//! A [`ResultDocument`] is the unit that gets persisted once per run and read
//! back by later runs as trend data. Its JSON shape is:
//!
//! ```json
//! {
//!   "version": 1,
//!   "date": "2015-12-02T22:22:22",
//!   "bundle": {"name": "git", "services": null, "relations": null, "machines": null},
//!   "results": [
//!     {
//!       "provider_name": "Amazon Web Services",
//!       "info": {"ProviderType": "ec2"},
//!       "test_outcome": "Some Failed",
//!       "tests": [
//!         {"name": "charm-proof", "suite": "git", "result": "PASS", "duration": 1.55, "output": "ok"}
//!       ]
//!     }
//!   ]
//! }
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::ReportError;
use super::outcome::{classify, TestOutcome, TestResult};

/// Current persisted format version
pub const FORMAT_VERSION: u32 = 1;

/// One normalized test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    pub name: String,
    #[serde(default)]
    pub suite: String,
    pub result: TestResult,
    /// Elapsed seconds, kept at full precision
    pub duration: f64,
    #[serde(default)]
    pub output: Option<String>,
}

/// All results of one run against one provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderResult {
    provider_name: String,
    #[serde(default)]
    info: Map<String, Value>,
    test_outcome: TestOutcome,
    tests: Vec<TestRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    action_results: Vec<Value>,
}

impl ProviderResult {
    /// Build a provider result, deriving the verdict from `tests`
    pub fn new(
        provider_name: impl Into<String>,
        info: Map<String, Value>,
        tests: Vec<TestRecord>,
        action_results: Vec<Value>,
    ) -> Result<Self, ReportError> {
        let test_outcome = classify(tests.iter().map(|t| t.result))?;
        Ok(Self {
            provider_name: provider_name.into(),
            info,
            test_outcome,
            tests,
            action_results,
        })
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    pub fn info(&self) -> &Map<String, Value> {
        &self.info
    }

    pub fn test_outcome(&self) -> TestOutcome {
        self.test_outcome
    }

    pub fn tests(&self) -> &[TestRecord] {
        &self.tests
    }

    pub fn action_results(&self) -> &[Value] {
        &self.action_results
    }

    /// Replace the tests; the verdict is recomputed
    pub fn set_tests(&mut self, tests: Vec<TestRecord>) -> Result<(), ReportError> {
        self.test_outcome = classify(tests.iter().map(|t| t.result))?;
        self.tests = tests;
        Ok(())
    }
}

/// Structural description of the bundle under test, passed through as-is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleInfo {
    pub name: String,
    #[serde(default)]
    pub services: Value,
    #[serde(default)]
    pub relations: Value,
    #[serde(default)]
    pub machines: Value,
}

impl BundleInfo {
    /// Bundle with no structural description
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            services: Value::Null,
            relations: Value::Null,
            machines: Value::Null,
        }
    }
}

/// The persisted record of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultDocument {
    pub version: u32,
    #[serde(with = "iso8601")]
    pub date: NaiveDateTime,
    pub bundle: BundleInfo,
    pub results: Vec<ProviderResult>,
}

impl ResultDocument {
    pub fn from_json(content: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// True when every provider passed all of its tests
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.test_outcome().is_success())
    }
}

/// Run dates are written without an offset (always UTC). Reading also accepts
/// fractional seconds and RFC 3339 strings with an offset.
mod iso8601 {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).ok_or_else(|| {
            serde::de::Error::custom(format!("could not parse '{}' as an ISO 8601 date", s))
        })
    }

    pub fn parse(s: &str) -> Option<NaiveDateTime> {
        let s = s.trim();
        if let Ok(date) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(date);
        }
        DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc())
    }
}
