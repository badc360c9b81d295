//! Per-test results and provider-level verdicts

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ReportError;

/// Result of a single test, derived from its return code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestResult {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
}

impl TestResult {
    /// Return code 0 passes, anything else fails
    pub fn from_return_code(code: i64) -> Self {
        if code == 0 {
            TestResult::Pass
        } else {
            TestResult::Fail
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TestResult::Pass => "PASS",
            TestResult::Fail => "FAIL",
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Verdict for one provider over all of its tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestOutcome {
    #[serde(rename = "All Passed")]
    AllPassed,
    #[serde(rename = "Some Failed")]
    SomeFailed,
    #[serde(rename = "All Failed")]
    AllFailed,
}

impl TestOutcome {
    /// Display string, also used as the persisted form
    pub fn label(&self) -> &'static str {
        match self {
            TestOutcome::AllPassed => "All Passed",
            TestOutcome::SomeFailed => "Some Failed",
            TestOutcome::AllFailed => "All Failed",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TestOutcome::AllPassed)
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a set of test results into a provider verdict.
///
/// Only the counts of passes and failures matter, not their order. An empty
/// set has no verdict and is rejected with [`ReportError::InvalidInput`].
pub fn classify<I>(results: I) -> Result<TestOutcome, ReportError>
where
    I: IntoIterator<Item = TestResult>,
{
    let (mut passed, mut failed) = (0usize, 0usize);
    for result in results {
        match result {
            TestResult::Pass => passed += 1,
            TestResult::Fail => failed += 1,
        }
    }

    match (passed, failed) {
        (0, 0) => Err(ReportError::InvalidInput(
            "cannot classify an empty set of test results".to_string(),
        )),
        (_, 0) => Ok(TestOutcome::AllPassed),
        (0, _) => Ok(TestOutcome::AllFailed),
        _ => Ok(TestOutcome::SomeFailed),
    }
}
