//! Writes the JSON and HTML artifacts of a run

use std::path::Path;

use tracing::{error, info};

use super::document::ResultDocument;
use super::error::{Artifact, ArtifactError, EmitError, ReportError};
use super::render::Render;

/// Content of both artifacts as written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emitted {
    pub json: String,
    pub html: String,
}

/// Serialize `document` to `json_path` and render it with `history` to
/// `html_path`.
///
/// The two artifacts are independent: both are always attempted and every
/// failure is returned in the [`EmitError`].
pub fn emit<R>(
    document: &ResultDocument,
    history: &[ResultDocument],
    renderer: &R,
    html_path: &Path,
    json_path: &Path,
) -> Result<Emitted, EmitError>
where
    R: Render + ?Sized,
{
    let mut failures = Vec::new();

    let json = document
        .to_json()
        .and_then(|json| write(json_path, &json).map(|_| json));
    let json = record(Artifact::Json, json_path, json, &mut failures);

    let html = renderer
        .render(document, history)
        .and_then(|html| write(html_path, &html).map(|_| html));
    let html = record(Artifact::Html, html_path, html, &mut failures);

    match (json, html) {
        (Some(json), Some(html)) => Ok(Emitted { json, html }),
        _ => Err(EmitError { failures }),
    }
}

fn record(
    artifact: Artifact,
    path: &Path,
    result: Result<String, ReportError>,
    failures: &mut Vec<ArtifactError>,
) -> Option<String> {
    match result {
        Ok(content) => {
            info!(path = %path.display(), "Wrote {} report", artifact);
            Some(content)
        }
        Err(source) => {
            error!(path = %path.display(), error = %source, "Failed to write {} report", artifact);
            failures.push(ArtifactError {
                artifact,
                path: path.to_path_buf(),
                source,
            });
            None
        }
    }
}

fn write(path: &Path, content: &str) -> Result<(), ReportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| ReportError::io(path, e))
}
