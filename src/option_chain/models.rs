use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Series fields carried through the last-date filter, in output order.
/// Anything else under `data` is dropped.
pub const SERIES_FIELDS: [&str; 11] = [
    "date",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "oi",
    "vwap",
    "supertrend",
    "trend",
    "sma",
];

pub const DATE_FIELD: &str = "date";

/// index ("0", "1", ...) -> observation
pub type Series = serde_json::Map<String, Value>;

/// field name -> series
pub type SeriesBlock = IndexMap<String, Series>;

/// Whole option chain snapshot keyed by instrument identifier
pub type OptionChainDocument = IndexMap<String, InstrumentRecord>;

/// Result of the last-date filter, same shape as the input
pub type FilteredDocument = IndexMap<String, FilteredRecord>;

/// One instrument as found in the snapshot.
///
/// `strike_price`, `ot` and `data` stay `Some(Value::Null)` when the key is present
/// with a null value, and `None` only when the key is missing. `data` is kept
/// untyped so that fields outside `SERIES_FIELDS` may hold anything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstrumentRecord {
    #[serde(default, deserialize_with = "present")]
    pub strike_price: Option<Value>,

    #[serde(rename = "ot", default, deserialize_with = "present")]
    pub option_type: Option<Value>,

    #[serde(rename = "data", default, deserialize_with = "present")]
    pub series: Option<Value>,
}

/// Reduced instrument written to the filtered document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredRecord {
    pub strike_price: Value,

    #[serde(rename = "ot")]
    pub option_type: Value,

    #[serde(rename = "data")]
    pub series: SeriesBlock,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
