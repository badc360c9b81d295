//! Bundle definition loading
//!
//! The structural parts of a bundle (services, relations, machines) are
//! carried into the report as-is. A bundle file either has them at the top
//! level or nests a single deployment under its name:
//!
//! ```yaml
//! git-deploy:
//!   services:
//!     git:
//!       charm: cs:trusty/git
//!       num_units: 1
//!   relations: []
//! ```

use std::path::Path;

use serde_json::Value;

use super::loader::{load_yaml, LoadError};
use super::test_plan::TestPlan;
use crate::report::BundleInfo;

const SECTIONS: [&str; 3] = ["services", "relations", "machines"];

/// Bundle info for `plan`, reading its bundle file relative to `base_dir`
pub fn load_bundle_info(plan: &TestPlan, base_dir: &Path) -> Result<BundleInfo, LoadError> {
    let Some(bundle_file) = &plan.bundle_file else {
        return Ok(BundleInfo::named(&plan.bundle));
    };

    let path = base_dir.join(bundle_file);
    let yaml: serde_yaml::Value = load_yaml(&path)?;
    let value = serde_json::to_value(&yaml).map_err(|e| LoadError::Bundle {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let deployment = deployment(&value).ok_or_else(|| LoadError::Bundle {
        file: path.display().to_string(),
        reason: "no services, relations or machines found".to_string(),
    })?;

    let section = |key: &str| deployment.get(key).cloned().unwrap_or(Value::Null);
    Ok(BundleInfo {
        name: plan.bundle.clone(),
        services: section("services"),
        relations: section("relations"),
        machines: section("machines"),
    })
}

fn deployment(value: &Value) -> Option<&Value> {
    let has_sections = |v: &Value| SECTIONS.iter().any(|key| v.get(key).is_some());

    if has_sections(value) {
        return Some(value);
    }

    match value.as_object() {
        Some(map) if map.len() == 1 => map.values().next().filter(|v| has_sections(*v)),
        _ => None,
    }
}
