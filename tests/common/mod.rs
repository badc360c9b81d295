#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use cloud_weather_report::prelude::*;
use serde_json::{json, Map, Value};
use tempfile::TempDir;

pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

pub fn write_file(dir: &Path, filename: &str, content: &str) {
    fs::write(dir.join(filename), content).expect("Failed to write file");
}

pub fn timestamp(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").expect("Invalid timestamp")
}

pub fn git_plan() -> TestPlan {
    serde_yaml::from_str(
        r#"
bundle: git
tests:
  - charm-proof
  - 00-setup
  - 10-actions
"#,
    )
    .expect("Invalid test plan")
}

/// Raw tester output with one test per `(return code, duration)` pair
pub fn raw_results(tests: &[(i64, f64)]) -> String {
    let tests: Vec<Value> = tests
        .iter()
        .enumerate()
        .map(|(i, (code, duration))| {
            json!({
                "test": format!("test-{}", i + 1),
                "suite": "git",
                "returncode": code,
                "duration": duration,
                "output": format!("output {}", i + 1),
            })
        })
        .collect();
    json!({ "tests": tests }).to_string()
}

/// A minimal persisted document for `bundle` at `date`
pub fn result_document(bundle: &str, date: &str, result: &str) -> String {
    format!(
        r#"{{
  "version": 1,
  "date": "{date}",
  "bundle": {{"name": "{bundle}"}},
  "results": [
    {{
      "provider_name": "Amazon Web Services",
      "info": {{"ProviderType": "ec2"}},
      "test_outcome": "{outcome}",
      "tests": [
        {{"name": "charm-proof", "suite": "{bundle}", "result": "{result}", "duration": 1.5, "output": "ok"}}
      ]
    }}
  ]
}}"#,
        date = date,
        bundle = bundle,
        result = result,
        outcome = if result == "PASS" { "All Passed" } else { "All Failed" },
    )
}

pub struct FakeController {
    pub name: String,
    pub provider_type: String,
    pub raw: Result<String, String>,
    pub delay: Duration,
}

impl FakeController {
    pub fn new(name: &str, provider_type: &str, raw: String) -> Self {
        Self {
            name: name.to_string(),
            provider_type: provider_type.to_string(),
            raw: Ok(raw),
            delay: Duration::ZERO,
        }
    }

    pub fn failing(name: &str, error: &str) -> Self {
        Self {
            name: name.to_string(),
            provider_type: name.to_string(),
            raw: Err(error.to_string()),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, millis: u64) -> Self {
        self.delay = Duration::from_millis(millis);
        self
    }

    pub fn boxed(self) -> Box<dyn Controller> {
        Box::new(self)
    }
}

#[async_trait]
impl Controller for FakeController {
    fn name(&self) -> &str {
        &self.name
    }

    async fn info(&self) -> Result<Map<String, Value>, ControllerError> {
        let mut info = Map::new();
        info.insert("Name".to_string(), json!(self.name));
        info.insert("ProviderType".to_string(), json!(self.provider_type));
        Ok(info)
    }

    async fn run_tests(
        &self,
        _plan: &TestPlan,
        _options: &TesterOptions,
    ) -> Result<String, ControllerError> {
        tokio::time::sleep(self.delay).await;
        self.raw.clone().map_err(|stderr| ControllerError::CommandFailed {
            command: "bundletester".to_string(),
            code: 1,
            stderr,
        })
    }

    async fn run_action(&self, unit: &str, action: &str) -> Result<Value, ControllerError> {
        Ok(json!({ "unit": unit, "action": action, "status": "completed" }))
    }
}
