//! Result aggregation and history correlation
//!
//! This module contains:
//! - `outcome` - Per-test results and the provider verdict classifier
//! - `document` - The persisted result document types
//! - `normalizer` - Raw tester output to provider results
//! - `naming` - Result file names and their embedded timestamps
//! - `history` - Lookup of earlier results for the same bundle
//! - `assembler` - Builds the report for one run
//! - `render` - HTML rendering
//! - `emitter` - Writes the JSON and HTML artifacts
//! - `error` - Report error types

pub mod assembler;
pub mod document;
pub mod emitter;
pub mod error;
pub mod history;
pub mod naming;
pub mod normalizer;
pub mod outcome;
pub mod render;

pub use assembler::{assemble, Report};
pub use document::{BundleInfo, ProviderResult, ResultDocument, TestRecord, FORMAT_VERSION};
pub use emitter::{emit, Emitted};
pub use error::{Artifact, ArtifactError, EmitError, ReportError};
pub use history::{locate, HistoricalSet};
pub use naming::{parse_result_file_name, ParsedResultName, ResultFiles};
pub use normalizer::{normalize, ProviderNames, RawResults, RawTestEvent};
pub use outcome::{classify, TestOutcome, TestResult};
pub use render::{HtmlRenderer, Render};
