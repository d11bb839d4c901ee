use super::models::{DailyBar, FormattedRow, PriceRow};
use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::Path;

pub const CSV_HEADER: [&str; 7] = ["Date", "Open", "High", "Low", "Close", "Adj Close", "Volume"];

fn price(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

/// Render bars as CSV with a blank margin line after the header
pub fn render_bars(bars: &[DailyBar]) -> Result<Vec<u8>> {
    let mut header = csv::Writer::from_writer(Vec::new());
    header.write_record(CSV_HEADER)?;
    let mut buf = header
        .into_inner()
        .map_err(|e| anyhow!("Failed to flush CSV header: {}", e.error()))?;

    // margin for readability
    buf.push(b'\n');

    let mut rows = csv::Writer::from_writer(buf);
    for bar in bars {
        rows.write_record([
            bar.date.format("%Y-%m-%d").to_string(),
            price(bar.open),
            price(bar.high),
            price(bar.low),
            price(bar.close),
            price(bar.adj_close),
            bar.volume.map(|v| v.to_string()).unwrap_or_default(),
        ])?;
    }

    rows.into_inner()
        .map_err(|e| anyhow!("Failed to flush CSV rows: {}", e.error()))
}

pub fn write_bars(path: &Path, bars: &[DailyBar]) -> Result<()> {
    let bytes = render_bars(bars)?;
    fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}

/// Parse saved CSV text. Blank lines (the header margin) are ignored.
pub fn parse_rows(text: &str) -> Result<Vec<PriceRow>> {
    let cleaned: String = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("{line}\n"))
        .collect();

    let mut reader = csv::Reader::from_reader(cleaned.as_bytes());
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: PriceRow = record.context("Failed to parse CSV row")?;
        rows.push(row);
    }
    Ok(rows)
}

pub fn read_rows(path: &Path) -> Result<Vec<PriceRow>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    parse_rows(&text)
}

/// Format a stored row for the API: prices with 2 decimals, integer volume
pub fn format_row(row: &PriceRow) -> Result<FormattedRow> {
    let fmt = |value: Option<f64>| value.map_or_else(|| "nan".to_string(), |v| format!("{:.2}", v));
    let volume = row
        .volume
        .ok_or_else(|| anyhow!("Missing volume on {}", row.date))?;

    Ok(FormattedRow {
        date: row.date.clone(),
        open: fmt(row.open),
        high: fmt(row.high),
        low: fmt(row.low),
        close: fmt(row.close),
        volume: volume as i64,
    })
}
