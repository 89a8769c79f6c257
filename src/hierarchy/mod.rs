//! UI-hierarchy extraction pipeline.
//!
//! A uiautomator dump goes through four stages:
//!
//! 1. `markup`: XML text to a [`Node`](markup::Node) tree
//! 2. `extract`: tree to the ordered list of relevant [`Element`]s
//! 3. `bundle`: elements sorted into overlapping categories
//! 4. `report`: the bundle rendered as a plain-text report
//!
//! ## Module Structure
//!
//! - `geometry`: bounds parsing, center and size
//! - `element`: attribute record and the classified element model
//! - `classifier`: ordered classification rules and the relevance filter
//! - `markup`: quick-xml based tree builder
//! - `extract`: pre-order flattening
//! - `bundle`: category partition
//! - `report`: text rendering

pub mod bundle;
pub mod classifier;
pub mod element;
pub mod extract;
pub mod geometry;
pub mod markup;
pub mod report;

use thiserror::Error;

pub use bundle::{Category, ConfirmationKeywords, UiBundle, aggregate};
pub use element::{Element, ElementKind};
pub use markup::MalformedDocument;

/// A dump that could not be parsed, along with the text that was attempted.
#[derive(Debug, Error)]
#[error("Failed to parse UI XML: {source}")]
pub struct UiParseError {
    raw: String,
    #[source]
    source: MalformedDocument,
}

impl UiParseError {
    /// The markup exactly as it was handed to the parser.
    pub fn raw_markup(&self) -> &str {
        &self.raw
    }

    /// Give up the error for the markup it was raised on.
    pub fn into_raw_markup(self) -> String {
        self.raw
    }
}

/// Result of running the pipeline over one dump.
#[derive(Debug, Clone)]
pub struct Capture {
    pub bundle: UiBundle,
    pub report: String,
}

/// Parse, classify, categorize and render a raw dump.
pub fn capture_and_classify(
    raw: &str,
    keywords: &ConfirmationKeywords,
) -> Result<Capture, UiParseError> {
    let root = markup::parse(raw).map_err(|source| UiParseError {
        raw: raw.to_string(),
        source,
    })?;

    let elements = extract::extract(&root);
    tracing::debug!(elements = elements.len(), "extracted UI elements");

    let bundle = aggregate(elements, keywords);
    let report = report::format(&bundle);

    Ok(Capture { bundle, report })
}
