use super::filter::extract_last_trading_date;
use super::models::{FilteredDocument, OptionChainDocument};
use crate::error::FilterResult;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;
use tracing::info;

const OUTPUT_INDENT: &[u8] = b"    ";

/// Counts reported after a filter run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    pub instruments_in: usize,
    pub instruments_kept: usize,
    pub instruments_skipped: usize,
}

/// Read and parse an option chain snapshot
pub fn load_document(path: &Path) -> FilterResult<OptionChainDocument> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Serialize with 4-space indentation
pub fn to_indented_json(document: &FilteredDocument) -> FilterResult<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(OUTPUT_INDENT));
    document.serialize(&mut serializer)?;
    Ok(buf)
}

pub fn write_document(path: &Path, document: &FilteredDocument) -> FilterResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_indented_json(document)?)?;
    Ok(())
}

/// Load `input`, keep each instrument's latest trading date and write `output`.
/// Nothing is written when the filter fails.
pub fn filter_file(input: &Path, output: &Path) -> FilterResult<FilterSummary> {
    let document = load_document(input)?;
    info!(path = %input.display(), instruments = document.len(), "Loaded option chain");

    let filtered = extract_last_trading_date(&document)?;
    write_document(output, &filtered)?;

    let summary = FilterSummary {
        instruments_in: document.len(),
        instruments_kept: filtered.len(),
        instruments_skipped: document.len() - filtered.len(),
    };
    info!(path = %output.display(), kept = summary.instruments_kept, skipped = summary.instruments_skipped, "Filtered data saved");

    Ok(summary)
}
