//! Test plans, bundles and configuration
//!
//! - `test_plan` - The declarative test plan
//! - `bundle` - Bundle definition loading
//! - `config` - Report configuration (`cwr.yaml`)
//! - `loader` - YAML loading and its errors

pub mod bundle;
pub mod config;
pub mod loader;
pub mod test_plan;

pub use bundle::load_bundle_info;
pub use config::{ReportConfig, TesterConfig, DEFAULT_CONFIG_FILE};
pub use loader::LoadError;
pub use test_plan::{ActionList, TestPlan};
