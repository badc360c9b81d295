//! Shell-command backed controller
//!
//! Each operation renders one of the configured command templates and runs it
//! through `sh -c`, reading JSON from stdout. Values are rendered unescaped;
//! `{{shell_quote value}}` quotes one for the shell:
//!
//! ```yaml
//! tester:
//!   command: "bundletester -e {{shell_quote environment}} -t {{shell_quote testdir}} -r json"
//!   info_command: "juju show-controller {{environment}} --format json"
//!   action_command: "juju run-action {{shell_quote unit}} {{shell_quote action}} --wait --format json -m {{shell_quote environment}}"
//! ```

use std::path::Path;
use std::process::{Output, Stdio};

use async_trait::async_trait;
use handlebars::{handlebars_helper, Handlebars};
use serde_json::{json, Map, Value};
use tokio::process::Command;
use tracing::{debug, info};

use super::controller::{Controller, ControllerError, TesterOptions};
use crate::plan::{TestPlan, TesterConfig};

const TEST_TEMPLATE: &str = "test";
const INFO_TEMPLATE: &str = "info";
const ACTION_TEMPLATE: &str = "action";

handlebars_helper!(shell_quote: |value: Json| quote(value));

fn quote(value: &Value) -> String {
    let word = match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    };
    shell_words::quote(&word).into_owned()
}

pub struct CommandController {
    environment: String,
    templates: Handlebars<'static>,
    has_info_command: bool,
}

impl CommandController {
    pub fn new(environment: impl Into<String>, tester: &TesterConfig) -> Result<Self, ControllerError> {
        let mut templates = Handlebars::new();
        templates.register_escape_fn(handlebars::no_escape);
        templates.register_helper("shell_quote", Box::new(shell_quote));

        let mut register = |name: &str, template: &str| {
            templates
                .register_template_string(name, template)
                .map_err(|e| ControllerError::Template(format!("{} command: {}", name, e)))
        };
        register(TEST_TEMPLATE, &tester.command)?;
        register(ACTION_TEMPLATE, &tester.action_command)?;
        if let Some(info_command) = &tester.info_command {
            register(INFO_TEMPLATE, info_command)?;
        }

        Ok(Self {
            environment: environment.into(),
            has_info_command: tester.info_command.is_some(),
            templates,
        })
    }

    fn render(&self, template: &str, data: &Value) -> Result<String, ControllerError> {
        self.templates
            .render(template, data)
            .map_err(|e| ControllerError::Template(format!("{} command: {}", template, e)))
    }

    async fn exec(&self, command: &str, workdir: Option<&Path>) -> Result<Output, ControllerError> {
        info!(environment = %self.environment, "Executing: {}", command);

        let mut cmd = Command::new("sh");
        cmd.args(["-c", command]);
        if let Some(dir) = workdir {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd.output().await?;
        debug!(
            environment = %self.environment,
            exit_code = output.status.code().unwrap_or(-1),
            "Command finished"
        );
        Ok(output)
    }

    /// Template data for the test command: the options plus environment,
    /// test directory and tests
    fn test_data(&self, plan: &TestPlan, options: &TesterOptions) -> Result<Value, ControllerError> {
        let mut data = serde_json::to_value(options)
            .map_err(|e| ControllerError::Template(e.to_string()))?;
        if let Value::Object(map) = &mut data {
            map.insert("environment".to_string(), json!(self.environment));
            map.insert("testdir".to_string(), json!(plan.bundle));
            map.insert("tests".to_string(), json!(plan.tests));
        }
        Ok(data)
    }

    /// Run `command` and require a zero exit status
    async fn exec_checked(&self, command: &str) -> Result<String, ControllerError> {
        let output = self.exec(command, None).await?;
        if !output.status.success() {
            return Err(command_failed(command, &output));
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

fn command_failed(command: &str, output: &Output) -> ControllerError {
    ControllerError::CommandFailed {
        command: command.to_string(),
        code: output.status.code().unwrap_or(-1),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}

#[async_trait]
impl Controller for CommandController {
    fn name(&self) -> &str {
        &self.environment
    }

    async fn info(&self) -> Result<Map<String, Value>, ControllerError> {
        if !self.has_info_command {
            let mut info = Map::new();
            info.insert("Name".to_string(), json!(self.environment));
            info.insert("ProviderType".to_string(), json!(self.environment));
            return Ok(info);
        }

        let command = self.render(INFO_TEMPLATE, &json!({ "environment": self.environment }))?;
        let stdout = self.exec_checked(&command).await?;
        match serde_json::from_str::<Value>(&stdout) {
            Ok(Value::Object(info)) => Ok(info),
            Ok(other) => Err(ControllerError::InvalidOutput {
                command,
                error: format!("expected a JSON object, got {}", other),
            }),
            Err(e) => Err(ControllerError::InvalidOutput {
                command,
                error: e.to_string(),
            }),
        }
    }

    async fn run_tests(
        &self,
        plan: &TestPlan,
        options: &TesterOptions,
    ) -> Result<String, ControllerError> {
        let command = self.render(TEST_TEMPLATE, &self.test_data(plan, options)?)?;
        let output = self.exec(&command, options.workdir.as_deref()).await?;

        // The tester exits non-zero when tests fail; its report is still on stdout.
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() {
            return Err(command_failed(&command, &output));
        }
        Ok(stdout)
    }

    async fn run_action(&self, unit: &str, action: &str) -> Result<Value, ControllerError> {
        let command = self.render(
            ACTION_TEMPLATE,
            &json!({ "environment": self.environment, "unit": unit, "action": action }),
        )?;
        let stdout = self.exec_checked(&command).await?;
        let stdout = stdout.trim();
        Ok(serde_json::from_str(stdout).unwrap_or_else(|_| Value::String(stdout.to_string())))
    }
}
