//! Action probes run against deployed units

use serde_json::{json, Value};
use tracing::{info, warn};

use super::controller::Controller;
use crate::plan::TestPlan;

/// Run every action probe of `plan`, in unit order then listed order.
///
/// There is one result per invocation. A probe that fails is recorded as
/// `{"unit", "action", "error"}` instead of its output.
pub async fn run_actions<C>(plan: &TestPlan, controller: &C) -> Vec<Value>
where
    C: Controller + ?Sized,
{
    let mut results = Vec::new();
    for (unit, action) in plan.action_probes() {
        info!(controller = controller.name(), unit, action, "Running action");
        match controller.run_action(unit, action).await {
            Ok(result) => results.push(result),
            Err(e) => {
                warn!(controller = controller.name(), unit, action, error = %e, "Action failed");
                results.push(json!({
                    "unit": unit,
                    "action": action,
                    "error": e.to_string(),
                }));
            }
        }
    }
    results
}
