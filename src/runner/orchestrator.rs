//! Report run orchestration
//!
//! Runs the plan on every controller, normalizes each provider's results in
//! controller-list order, correlates with history and writes the artifacts.
//! A controller that fails or returns malformed results is left out of the
//! report; the remaining providers are still reported.

use chrono::{NaiveDateTime, Utc};
use futures::future::join_all;
use serde_json::{Map, Value};
use tracing::{error, info, instrument, warn};

use super::actions::run_actions;
use super::controller::{Controller, ControllerError, TesterOptions};
use crate::plan::{ReportConfig, TestPlan};
use crate::report::{
    assemble, emit, locate, normalize, BundleInfo, EmitError, Emitted, HtmlRenderer,
    ProviderNames, ProviderResult, RawResults, Render, Report, ReportError, ResultFiles,
};

/// A controller left out of the report
#[derive(Debug)]
pub struct ProviderFailure {
    pub controller: String,
    pub error: String,
}

/// Outcome of one report run
#[derive(Debug)]
pub struct RunSummary {
    pub run_id: String,
    pub report: Report,
    pub files: ResultFiles,
    pub failed_providers: Vec<ProviderFailure>,
    pub emitted: Result<Emitted, EmitError>,
}

impl RunSummary {
    /// Every controller reported and every provider passed all tests
    pub fn success(&self) -> bool {
        self.failed_providers.is_empty() && self.report.document.all_passed()
    }
}

/// Raw output gathered from one controller
struct Execution {
    info: Map<String, Value>,
    raw: String,
    action_results: Vec<Value>,
}

pub struct ReportRunner {
    plan: TestPlan,
    bundle: BundleInfo,
    config: ReportConfig,
    options: TesterOptions,
    renderer: Option<Box<dyn Render + Send + Sync>>,
    started_at: Option<NaiveDateTime>,
}

impl ReportRunner {
    pub fn new(plan: TestPlan, bundle: BundleInfo) -> Self {
        Self {
            plan,
            bundle,
            config: ReportConfig::default(),
            options: TesterOptions::default(),
            renderer: None,
            started_at: None,
        }
    }

    pub fn config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn options(mut self, options: TesterOptions) -> Self {
        self.options = options;
        self
    }

    /// Use a renderer other than the built-in HTML template
    pub fn renderer<R>(mut self, renderer: R) -> Self
    where
        R: Render + Send + Sync + 'static,
    {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Fix the run start time instead of taking the current time
    pub fn started_at(mut self, started_at: NaiveDateTime) -> Self {
        self.started_at = Some(started_at);
        self
    }

    #[instrument(skip_all, fields(bundle = %self.bundle.name, run_id = tracing::field::Empty))]
    pub async fn run(self, controllers: &[Box<dyn Controller>]) -> Result<RunSummary, ReportError> {
        let run_id = uuid::Uuid::new_v4().to_string();
        tracing::Span::current().record("run_id", run_id.as_str());

        let started_at = self.started_at.unwrap_or_else(|| Utc::now().naive_utc());
        let names = ProviderNames::with_overrides(&self.config.providers);

        info!(controllers = controllers.len(), "Starting report run");
        let executions = self.execute_all(controllers).await;

        let mut results: Vec<ProviderResult> = Vec::new();
        let mut failed_providers = Vec::new();
        for (controller, execution) in controllers.iter().zip(executions) {
            let outcome = execution
                .map_err(|e| e.to_string())
                .and_then(|execution| {
                    normalize_execution(controller.name(), &names, execution)
                        .map_err(|e| e.to_string())
                });

            match outcome {
                Ok(result) => {
                    info!(
                        controller = controller.name(),
                        provider = result.provider_name(),
                        outcome = %result.test_outcome(),
                        "Provider results normalized"
                    );
                    results.push(result);
                }
                Err(e) => {
                    error!(controller = controller.name(), error = %e, "Provider left out of report");
                    failed_providers.push(ProviderFailure {
                        controller: controller.name().to_string(),
                        error: e,
                    });
                }
            }
        }

        if results.is_empty() {
            return Err(ReportError::InvalidInput(
                "no controller produced usable results".to_string(),
            ));
        }

        let files = ResultFiles::new(&self.config.results_dir, &self.bundle.name, started_at);
        let reference = files.json_file_name().unwrap_or_default();
        let history = locate(
            &self.bundle.name,
            &self.config.results_dir,
            reference,
            self.config.max_history,
        );

        let report = assemble(self.bundle, results, history, started_at);

        let emitted = match self.renderer {
            Some(renderer) => emit_report(&report, renderer.as_ref(), &files),
            None => emit_report(&report, &HtmlRenderer::new()?, &files),
        };

        Ok(RunSummary {
            run_id,
            report,
            files,
            failed_providers,
            emitted,
        })
    }

    async fn execute_all(
        &self,
        controllers: &[Box<dyn Controller>],
    ) -> Vec<Result<Execution, ControllerError>> {
        if self.config.parallel {
            let futures = controllers
                .iter()
                .map(|controller| execute(controller.as_ref(), &self.plan, &self.options));
            join_all(futures).await
        } else {
            let mut executions = Vec::with_capacity(controllers.len());
            for controller in controllers {
                executions.push(execute(controller.as_ref(), &self.plan, &self.options).await);
            }
            executions
        }
    }
}

#[instrument(skip_all, fields(controller = controller.name()))]
async fn execute(
    controller: &dyn Controller,
    plan: &TestPlan,
    options: &TesterOptions,
) -> Result<Execution, ControllerError> {
    let info = controller.info().await?;
    let raw = controller.run_tests(plan, options).await?;
    let action_results = run_actions(plan, controller).await;
    Ok(Execution {
        info,
        raw,
        action_results,
    })
}

fn normalize_execution(
    controller: &str,
    names: &ProviderNames,
    execution: Execution,
) -> Result<ProviderResult, ReportError> {
    let provider_code = execution
        .info
        .get("ProviderType")
        .and_then(Value::as_str)
        .unwrap_or(controller)
        .to_string();

    let raw = RawResults::from_json(&provider_code, &execution.raw)?;
    if raw.tests.is_empty() {
        warn!(controller, "Tester reported no tests");
    }
    normalize(
        &provider_code,
        names,
        execution.info,
        &raw,
        execution.action_results,
    )
}

fn emit_report<R>(report: &Report, renderer: &R, files: &ResultFiles) -> Result<Emitted, EmitError>
where
    R: Render + ?Sized,
{
    emit(
        &report.document,
        &report.history.documents,
        renderer,
        &files.html,
        &files.json,
    )
}
