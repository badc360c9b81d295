//! HTML rendering of a report

use handlebars::Handlebars;
use serde::Serialize;
use serde_json::Value;

use super::document::{ProviderResult, ResultDocument, TestRecord};
use super::error::ReportError;
use super::outcome::TestOutcome;

const REPORT_TEMPLATE: &str = include_str!("templates/report.html.hbs");

/// Turns a document and its history into markup
pub trait Render {
    fn render(
        &self,
        document: &ResultDocument,
        history: &[ResultDocument],
    ) -> Result<String, ReportError>;
}

/// Handlebars-backed HTML renderer
pub struct HtmlRenderer {
    registry: Handlebars<'static>,
}

impl HtmlRenderer {
    pub fn new() -> Result<Self, ReportError> {
        Self::with_template(REPORT_TEMPLATE)
    }

    /// Use a custom template; it receives the same data as the built-in one
    pub fn with_template(template: &str) -> Result<Self, ReportError> {
        let mut registry = Handlebars::new();
        registry
            .register_template_string("report", template)
            .map_err(|e| ReportError::Render(e.to_string()))?;
        Ok(Self { registry })
    }
}

impl Render for HtmlRenderer {
    fn render(
        &self,
        document: &ResultDocument,
        history: &[ResultDocument],
    ) -> Result<String, ReportError> {
        let view = ReportView::new(document, history);
        self.registry
            .render("report", &view)
            .map_err(|e| ReportError::Render(e.to_string()))
    }
}

#[derive(Serialize)]
struct ReportView<'a> {
    title: &'a str,
    date: String,
    bundle: BundleView,
    providers: Vec<ProviderView<'a>>,
    trend: Vec<TrendRow<'a>>,
}

#[derive(Serialize)]
struct BundleView {
    services: Option<String>,
    relations: Option<String>,
    machines: Option<String>,
}

#[derive(Serialize)]
struct ProviderView<'a> {
    provider_name: &'a str,
    test_outcome: &'static str,
    status: &'static str,
    info: Vec<InfoItem<'a>>,
    tests: &'a [TestRecord],
    action_results: Vec<String>,
}

#[derive(Serialize)]
struct InfoItem<'a> {
    key: &'a str,
    value: String,
}

#[derive(Serialize)]
struct TrendRow<'a> {
    date: String,
    current: bool,
    outcomes: Vec<TrendCell<'a>>,
}

#[derive(Serialize)]
struct TrendCell<'a> {
    provider_name: &'a str,
    test_outcome: &'static str,
    status: &'static str,
}

impl<'a> ReportView<'a> {
    fn new(document: &'a ResultDocument, history: &'a [ResultDocument]) -> Self {
        let trend = std::iter::once((document, true))
            .chain(history.iter().map(|doc| (doc, false)))
            .map(|(doc, current)| TrendRow {
                date: format_date(doc),
                current,
                outcomes: doc
                    .results
                    .iter()
                    .map(|r| TrendCell {
                        provider_name: r.provider_name(),
                        test_outcome: r.test_outcome().label(),
                        status: status_class(r.test_outcome()),
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: &document.bundle.name,
            date: format_date(document),
            bundle: BundleView {
                services: pretty(&document.bundle.services),
                relations: pretty(&document.bundle.relations),
                machines: pretty(&document.bundle.machines),
            },
            providers: document.results.iter().map(ProviderView::new).collect(),
            trend,
        }
    }
}

impl<'a> ProviderView<'a> {
    fn new(result: &'a ProviderResult) -> Self {
        Self {
            provider_name: result.provider_name(),
            test_outcome: result.test_outcome().label(),
            status: status_class(result.test_outcome()),
            info: result
                .info()
                .iter()
                .map(|(key, value)| InfoItem {
                    key,
                    value: scalar(value),
                })
                .collect(),
            tests: result.tests(),
            action_results: result
                .action_results()
                .iter()
                .filter_map(pretty)
                .collect(),
        }
    }
}

fn format_date(document: &ResultDocument) -> String {
    document.date.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn status_class(outcome: TestOutcome) -> &'static str {
    match outcome {
        TestOutcome::AllPassed => "pass",
        TestOutcome::SomeFailed => "partial",
        TestOutcome::AllFailed => "fail",
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn pretty(value: &Value) -> Option<String> {
    if value.is_null() {
        return None;
    }
    serde_json::to_string_pretty(value).ok()
}
