//! Result file naming
//!
//! Every run writes `<dir>/<bundle>-<timestamp>-result.json` and an `.html`
//! sibling. The timestamp is UTC at second precision, written as
//! `2015-12-02T22-22-21`. Older files use colons in the time part
//! (`2015-12-02T22:22:21`) and are still recognised.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

static RESULT_FILE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+)-(\d{4}-\d{2}-\d{2}T\d{2}[-:]\d{2}[-:]\d{2})-result\.json$").unwrap()
});

const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";
const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Output paths for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultFiles {
    pub json: PathBuf,
    pub html: PathBuf,
}

impl ResultFiles {
    pub fn new(results_dir: impl AsRef<Path>, bundle: &str, timestamp: NaiveDateTime) -> Self {
        let stem = format!(
            "{}-{}-result",
            bundle,
            timestamp.format(FILE_TIMESTAMP_FORMAT)
        );
        let dir = results_dir.as_ref();
        Self {
            json: dir.join(format!("{}.json", stem)),
            html: dir.join(format!("{}.html", stem)),
        }
    }

    /// File name of the JSON artifact
    pub fn json_file_name(&self) -> Option<&str> {
        self.json.file_name().and_then(|n| n.to_str())
    }
}

/// Bundle name and run timestamp recovered from a result file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResultName {
    pub bundle: String,
    pub timestamp: NaiveDateTime,
}

/// Parse a JSON result file name. Returns `None` for anything that does not
/// follow the naming convention, including the `.html` siblings.
pub fn parse_result_file_name(file_name: &str) -> Option<ParsedResultName> {
    let captures = RESULT_FILE_REGEX.captures(file_name)?;
    let bundle = captures.get(1)?.as_str();
    let raw_timestamp = captures.get(2)?.as_str();

    let timestamp = NaiveDateTime::parse_from_str(raw_timestamp, FILE_TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw_timestamp, LEGACY_TIMESTAMP_FORMAT))
        .ok()?;

    Some(ParsedResultName {
        bundle: bundle.to_string(),
        timestamp,
    })
}
