//! Combines the current run with its history

use chrono::{NaiveDateTime, Timelike};

use super::document::{BundleInfo, ProviderResult, ResultDocument, FORMAT_VERSION};
use super::history::HistoricalSet;

/// The current run's document together with its trend history.
///
/// Only `document` is persisted; `history` feeds the rendered report.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub document: ResultDocument,
    pub history: HistoricalSet,
}

/// Build the report for one run.
///
/// `results` must already be in controller-list order; it is kept as given.
/// The run date is stored at second precision.
pub fn assemble(
    bundle: BundleInfo,
    results: Vec<ProviderResult>,
    history: HistoricalSet,
    started_at: NaiveDateTime,
) -> Report {
    let date = started_at.with_nanosecond(0).unwrap_or(started_at);
    Report {
        document: ResultDocument {
            version: FORMAT_VERSION,
            date,
            bundle,
            results,
        },
        history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::document::TestRecord;
    use crate::report::outcome::TestResult;
    use chrono::NaiveDate;
    use serde_json::Map;

    fn provider(name: &str) -> ProviderResult {
        ProviderResult::new(
            name,
            Map::new(),
            vec![TestRecord {
                name: "charm-proof".to_string(),
                suite: "git".to_string(),
                result: TestResult::Pass,
                duration: 1.0,
                output: None,
            }],
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn test_assemble_keeps_provider_order() {
        let started = NaiveDate::from_ymd_opt(2016, 3, 1)
            .unwrap()
            .and_hms_milli_opt(10, 0, 0, 750)
            .unwrap();
        let report = assemble(
            BundleInfo::named("git"),
            vec![provider("gce"), provider("aws"), provider("joyent")],
            HistoricalSet::default(),
            started,
        );

        let names: Vec<_> = report
            .document
            .results
            .iter()
            .map(|r| r.provider_name())
            .collect();
        assert_eq!(names, vec!["gce", "aws", "joyent"]);
        assert_eq!(report.document.version, 1);
        assert_eq!(report.document.bundle.name, "git");
        assert_eq!(report.document.date.nanosecond(), 0);
        assert!(report.history.is_empty());
    }
}
