use super::models::{
    DATE_FIELD, FilteredDocument, FilteredRecord, OptionChainDocument, SERIES_FIELDS, Series,
    SeriesBlock,
};
use crate::error::{FilterError, FilterResult};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::debug;

// Tried in order after a trailing `Z` has been rewritten to `+00:00`
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 trading date into a comparable instant.
///
/// A trailing `Z` is treated as `+00:00`. Values without an offset (including
/// bare dates) are read as UTC.
pub fn parse_trading_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let normalized = match raw.trim().strip_suffix('Z') {
        Some(head) => format!("{head}+00:00"),
        None => raw.trim().to_string(),
    };

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, fmt) {
            return Some(dt);
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, fmt) {
            return Some(naive.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Indices of `dates` that share the latest instant, in input order.
/// Returns an empty vec for an empty series.
pub fn latest_indices<'a>(instrument: &str, dates: &'a Series) -> FilterResult<Vec<&'a String>> {
    let mut parsed = Vec::with_capacity(dates.len());

    for (index, value) in dates {
        let instant = value
            .as_str()
            .and_then(parse_trading_date)
            .ok_or_else(|| FilterError::MalformedDate {
                instrument: instrument.to_string(),
                index: index.clone(),
                value: value
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| value.to_string()),
            })?;
        parsed.push((index, instant));
    }

    let Some(latest) = parsed.iter().map(|(_, instant)| *instant).max() else {
        return Ok(Vec::new());
    };

    Ok(parsed
        .into_iter()
        .filter(|(_, instant)| *instant == latest)
        .map(|(index, _)| index)
        .collect())
}

/// Keep only the observations of each instrument's latest trading date.
///
/// Instruments without a `data` key, or with an empty `data.date`, are left out
/// of the result. Every other problem is fatal for the whole document, including
/// a `data` that is present but not an object.
pub fn extract_last_trading_date(document: &OptionChainDocument) -> FilterResult<FilteredDocument> {
    let mut filtered = FilteredDocument::with_capacity(document.len());

    for (instrument, record) in document {
        let Some(block) = &record.series else {
            debug!(instrument = %instrument, "No series block, skipping");
            continue;
        };
        let series = as_series(instrument, "data", block)?;

        let dates = series_field(instrument, series, DATE_FIELD)?;

        if dates.is_empty() {
            debug!(instrument = %instrument, "No dated observations, skipping");
            continue;
        }

        let selected = latest_indices(instrument, dates)?;

        let strike_price = record
            .strike_price
            .clone()
            .ok_or_else(|| missing_attribute(instrument, "strike_price"))?;
        let option_type = record
            .option_type
            .clone()
            .ok_or_else(|| missing_attribute(instrument, "ot"))?;

        let mut reduced = SeriesBlock::with_capacity(SERIES_FIELDS.len());
        for field in SERIES_FIELDS {
            let source = series_field(instrument, series, field)?;

            let mut kept = Series::with_capacity(selected.len());
            for &index in &selected {
                let value = source
                    .get(index)
                    .ok_or_else(|| FilterError::MissingIndexInField {
                        instrument: instrument.clone(),
                        field: field.to_string(),
                        index: index.clone(),
                    })?;
                kept.insert(index.clone(), value.clone());
            }
            reduced.insert(field.to_string(), kept);
        }

        filtered.insert(
            instrument.clone(),
            FilteredRecord {
                strike_price,
                option_type,
                series: reduced,
            },
        );
    }

    Ok(filtered)
}

/// Look up a recognized field under `data`; it must be an object.
fn series_field<'a>(instrument: &str, series: &'a Series, field: &str) -> FilterResult<&'a Series> {
    let value = series
        .get(field)
        .ok_or_else(|| FilterError::MissingSeriesField {
            instrument: instrument.to_string(),
            field: field.to_string(),
        })?;
    as_series(instrument, field, value)
}

fn as_series<'a>(instrument: &str, field: &str, value: &'a Value) -> FilterResult<&'a Series> {
    value.as_object().ok_or_else(|| FilterError::MalformedSeries {
        instrument: instrument.to_string(),
        field: field.to_string(),
    })
}

fn missing_attribute(instrument: &str, attribute: &str) -> FilterError {
    FilterError::MissingAttribute {
        instrument: instrument.to_string(),
        attribute: attribute.to_string(),
    }
}
