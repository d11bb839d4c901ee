use nse_index_tools::option_chain::{
    OptionChainDocument, SERIES_FIELDS, extract_last_trading_date, filter_file, load_document,
};
use nse_index_tools::FilterError;
use serde_json::{Value, json};
use std::fs;

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Value {
        json!({
            "NIFTY2411821500CE": {
                "strike_price": 21500,
                "ot": "CE",
                "data": {
                    "date":       { "0": "2024-01-16T00:00:00Z", "1": "2024-01-17T00:00:00Z", "2": "2024-01-17T00:00:00+00:00" },
                    "open":       { "0": 180.0, "1": 150.5, "2": 151.0 },
                    "high":       { "0": 190.0, "1": 160.0, "2": 158.0 },
                    "low":        { "0": 170.0, "1": 120.0, "2": 121.0 },
                    "close":      { "0": 175.0, "1": 125.5, "2": 126.0 },
                    "volume":     { "0": 1000, "1": 2000, "2": 2100 },
                    "oi":         { "0": 50000, "1": 52000, "2": 52500 },
                    "vwap":       { "0": 178.2, "1": 140.1, "2": 139.9 },
                    "supertrend": { "0": 160.0, "1": 165.0, "2": 165.0 },
                    "trend":      { "0": 1, "1": -1, "2": -1 },
                    "sma":        { "0": 172.0, "1": 168.0, "2": 167.5 },
                    "foo":        { "0": "x", "1": "y", "2": "z" },
                    "expiry":     "2024-01-18"
                }
            },
            "NIFTY2411821500PE": {
                "strike_price": 21500,
                "ot": "PE",
                "data": {
                    "date": {}, "open": {}, "high": {}, "low": {}, "close": {}, "volume": {},
                    "oi": {}, "vwap": {}, "supertrend": {}, "trend": {}, "sma": {}
                }
            },
            "NIFTY": { "strike_price": null, "ot": "IDX" }
        })
    }

    #[test]
    fn test_filter_file_writes_latest_date_only() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("NIFTYoption_chain.json");
        let output = dir.path().join("out").join("NIFTYoption_chain_filtered.json");
        fs::write(&input, serde_json::to_string(&snapshot()).unwrap()).unwrap();

        let summary = filter_file(&input, &output).unwrap();
        assert_eq!(summary.instruments_in, 3);
        assert_eq!(summary.instruments_kept, 1);
        assert_eq!(summary.instruments_skipped, 2);

        let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let keys: Vec<&String> = written.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["NIFTY2411821500CE"]);

        let record = &written["NIFTY2411821500CE"];
        assert_eq!(record["strike_price"], json!(21500));
        assert_eq!(record["ot"], json!("CE"));

        let data = record["data"].as_object().unwrap();
        let fields: Vec<&str> = data.keys().map(String::as_str).collect();
        assert_eq!(fields, SERIES_FIELDS.to_vec());
        assert_eq!(data["close"], json!({ "1": 125.5, "2": 126.0 }));
        assert_eq!(data["date"]["1"], json!("2024-01-17T00:00:00Z"));
    }

    #[test]
    fn test_output_uses_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        let output = dir.path().join("out.json");
        fs::write(&input, serde_json::to_string(&snapshot()).unwrap()).unwrap();

        filter_file(&input, &output).unwrap();
        let text = fs::read_to_string(&output).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("{"));
        assert_eq!(lines.next(), Some("    \"NIFTY2411821500CE\": {"));
        assert_eq!(lines.next(), Some("        \"strike_price\": 21500,"));
    }

    #[test]
    fn test_failed_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        let output = dir.path().join("out.json");

        let mut doc = snapshot();
        doc["NIFTY2411821500CE"]["data"]["date"]["0"] = json!("16/01/2024");
        fs::write(&input, serde_json::to_string(&doc).unwrap()).unwrap();

        let err = filter_file(&input, &output).unwrap_err();
        assert!(matches!(err, FilterError::MalformedDate { ref index, .. } if index == "0"));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_document(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, FilterError::Io(_)));
    }

    #[test]
    fn test_invalid_json_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        fs::write(&input, "{ not json").unwrap();
        assert!(matches!(load_document(&input), Err(FilterError::Json(_))));
    }

    #[test]
    fn test_already_filtered_document_is_unchanged() {
        let filtered_once = json!({
            "NIFTY2411821500CE": {
                "strike_price": 21500,
                "ot": "CE",
                "data": {
                    "date": { "4": "2024-01-17T00:00:00Z" },
                    "open": { "4": 1 }, "high": { "4": 2 }, "low": { "4": 0.5 }, "close": { "4": 1.5 },
                    "volume": { "4": 10 }, "oi": { "4": 20 }, "vwap": { "4": 1.2 },
                    "supertrend": { "4": 1.1 }, "trend": { "4": 1 }, "sma": { "4": 1.3 }
                }
            }
        });

        let doc: OptionChainDocument = serde_json::from_value(filtered_once.clone()).unwrap();
        let result = extract_last_trading_date(&doc).unwrap();
        assert_eq!(serde_json::to_value(&result).unwrap(), filtered_once);
    }
}
