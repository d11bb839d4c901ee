pub mod commands;
pub mod filter;
pub mod io;
pub mod models;

// Re-exports (public API)
pub use commands::OptionChainCommands;
pub use filter::{extract_last_trading_date, latest_indices, parse_trading_date};
pub use io::{FilterSummary, filter_file, load_document, to_indented_json, write_document};
pub use models::{
    DATE_FIELD, FilteredDocument, FilteredRecord, InstrumentRecord, OptionChainDocument,
    SERIES_FIELDS, Series, SeriesBlock,
};
