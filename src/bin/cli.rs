use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use cloud_weather_report::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cloud-weather-report")]
#[command(about = "Run a bundle test plan on cloud controllers and report the results", long_about = None)]
#[command(version)]
struct Cli {
    /// Controllers to run the tests on
    #[arg(value_name = "CONTROLLER", required = true, num_args = 1..)]
    controller: Vec<String>,

    /// Path to the test plan YAML file
    #[arg(value_name = "TEST_PLAN")]
    test_plan: PathBuf,

    /// Also write the HTML report to this file
    #[arg(long)]
    result_output: Option<PathBuf>,

    /// Directory the tester runs in
    #[arg(long)]
    testdir: Option<PathBuf>,

    /// Bundle file passed to the tester
    #[arg(long)]
    bundle: Option<String>,

    /// Deployment name within the bundle file
    #[arg(long)]
    deployment: Option<String>,

    /// Keep the deployment after the tests
    #[arg(long)]
    no_destroy: bool,

    /// Log level, also passed to the tester
    #[arg(
        long,
        default_value = "INFO",
        ignore_case = true,
        value_parser = ["TRACE", "DEBUG", "INFO", "WARN", "WARNING", "ERROR", "CRITICAL"]
    )]
    log_level: String,

    /// Print the tester commands without deploying
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Keep running tests after a failure
    #[arg(long)]
    allow_failure: bool,

    /// Skip the tester's implicit tests
    #[arg(long)]
    skip_implicit: bool,

    /// Tests to exclude (repeatable)
    #[arg(long)]
    exclude: Vec<String>,

    /// Tests YAML passed to the tester
    #[arg(long)]
    tests_yaml: Option<String>,

    /// Only run tests matching this pattern
    #[arg(long)]
    test_pattern: Option<String>,

    /// Path to the config file (default: ./cwr.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for result files (overrides config)
    #[arg(long)]
    results_dir: Option<PathBuf>,

    /// Number of earlier runs to show (overrides config)
    #[arg(long)]
    max_history: Option<usize>,
}

impl Cli {
    fn tester_options(&self) -> TesterOptions {
        TesterOptions {
            workdir: self.testdir.clone(),
            bundle: self.bundle.clone(),
            deployment: self.deployment.clone(),
            no_destroy: self.no_destroy,
            log_level: self.log_level.clone(),
            dry_run: self.dry_run,
            verbose: self.verbose,
            failfast: !self.allow_failure,
            skip_implicit: self.skip_implicit,
            exclude: self.exclude.clone(),
            tests_yaml: self.tests_yaml.clone(),
            test_pattern: self.test_pattern.clone(),
        }
    }
}

/// Map a tester log level name to a tracing level
fn tracing_level(log_level: &str) -> &'static str {
    match log_level.to_ascii_uppercase().as_str() {
        "TRACE" => "trace",
        "DEBUG" => "debug",
        "WARN" | "WARNING" => "warn",
        "ERROR" | "CRITICAL" => "error",
        _ => "info",
    }
}

fn init_tracing(verbose: bool, log_level: &str) {
    let level = if verbose { "debug" } else { tracing_level(log_level) };
    let filter = format!("cloud_weather_report={}", level);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, &cli.log_level);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!(error = %e, "Report run failed");
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    if !cli.test_plan.exists() {
        anyhow::bail!("Test plan not found: {}", cli.test_plan.display());
    }

    let plan = TestPlan::load(&cli.test_plan)?;
    let plan_dir = cli.test_plan.parent().unwrap_or_else(|| Path::new("."));
    let bundle = load_bundle_info(&plan, plan_dir)?;

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(dir) = &cli.results_dir {
        config.results_dir = dir.clone();
    }
    if let Some(max) = cli.max_history {
        config.max_history = max;
    }

    let controllers = cli
        .controller
        .iter()
        .map(|name| {
            CommandController::new(name.as_str(), &config.tester)
                .map(|c| Box::new(c) as Box<dyn Controller>)
        })
        .collect::<Result<Vec<_>, _>>()?;

    println!("Testing bundle {} on: {}\n", plan.bundle, cli.controller.join(", "));

    let summary = ReportRunner::new(plan, bundle)
        .config(config)
        .options(cli.tester_options())
        .run(&controllers)
        .await?;

    print_summary(&summary);

    let emitted = match &summary.emitted {
        Ok(emitted) => emitted,
        Err(e) => {
            for failure in &e.failures {
                eprintln!("✗ {}", failure);
            }
            anyhow::bail!("{}", e);
        }
    };

    if let Some(output) = &cli.result_output {
        std::fs::write(output, &emitted.html)?;
        println!("HTML copy: {}", output.display());
    }

    Ok(summary.success())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ReportConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Ok(ReportConfig::load(path)?)
        }
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.exists() {
                Ok(ReportConfig::load(default)?)
            } else {
                Ok(ReportConfig::default())
            }
        }
    }
}

fn print_summary(summary: &RunSummary) {
    let document = &summary.report.document;

    println!("=== Results ===\n");
    println!(
        "Overall: {}\n",
        if summary.success() { "PASS" } else { "FAIL" }
    );

    for result in &document.results {
        let status = if result.test_outcome().is_success() { "✓" } else { "✗" };
        println!("  {} {}: {}", status, result.provider_name(), result.test_outcome());

        for test in result.tests() {
            println!("      {} {} ({}s)", test.result, test.name, test.duration);
        }
    }

    for failure in &summary.failed_providers {
        println!("  ✗ {}: {}", failure.controller, failure.error);
    }

    println!("\nEarlier runs: {}", summary.report.history.len());
    println!("JSON: {}", summary.files.json.display());
    println!("HTML: {}", summary.files.html.display());
}
