//! CSV export of the calculation history.

use std::fs;
use std::io;
use std::path::PathBuf;

use time::OffsetDateTime;

use crate::domain::HistoryEntry;

/// Prefix so spreadsheet tools detect UTF-8 and render Korean correctly.
const UTF8_BOM: &str = "\u{FEFF}";

const CSV_HEADER: &str = "Date,SourcingPrice(CNY),SellingPrice(KRW),Margin(%),NetProfit(KRW)";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no history entries to export")]
    EmptyHistory,
    #[error("no writable export directory found")]
    NoTargetDir,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Render the history as a BOM-prefixed UTF-8 CSV table, most recent first
/// (the order the entries are stored in).
pub fn history_to_csv(entries: &[HistoryEntry]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for entry in entries {
        lines.push(format!(
            "{},{},{},{:.1},{}",
            format_date(entry.saved_at),
            entry.sourcing_price,
            entry.selling_price,
            entry.margin_percent,
            entry.net_profit.round() as i64,
        ));
    }
    format!("{UTF8_BOM}{}", lines.join("\n"))
}

/// Write the CSV into the user's download directory (data dir as fallback)
/// as `margin_history_<date>.csv` and return the path.
pub fn export_history(entries: &[HistoryEntry]) -> Result<PathBuf, ExportError> {
    if entries.is_empty() {
        return Err(ExportError::EmptyHistory);
    }

    let dir = dirs::download_dir()
        .or_else(dirs::data_local_dir)
        .ok_or(ExportError::NoTargetDir)?;
    let today = OffsetDateTime::now_utc();
    let path = dir.join(format!("margin_history_{}.csv", format_ymd(&today)));

    fs::write(&path, history_to_csv(entries))?;
    println!("[export] Wrote {} entries to {}", entries.len(), path.display());
    Ok(path)
}

fn format_date(unix_seconds: u64) -> String {
    OffsetDateTime::from_unix_timestamp(unix_seconds as i64)
        .map(|dt| format_ymd(&dt))
        .unwrap_or_else(|_| "unknown".to_string())
}

fn format_ymd(dt: &OffsetDateTime) -> String {
    format!("{:04}-{:02}-{:02}", dt.year(), u8::from(dt.month()), dt.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(saved_at: u64, margin: f64, profit: f64) -> HistoryEntry {
        HistoryEntry {
            id: "test".to_string(),
            saved_at,
            sourcing_price: 100.0,
            selling_price: 40_000.0,
            margin_percent: margin,
            net_profit: profit,
        }
    }

    #[test]
    fn csv_starts_with_bom_and_header() {
        let csv = history_to_csv(&[]);
        assert!(csv.starts_with('\u{FEFF}'));
        assert!(csv["\u{FEFF}".len()..].starts_with("Date,SourcingPrice(CNY)"));
    }

    #[test]
    fn rows_format_margin_and_profit() {
        // 2026-02-02 00:00:00 UTC
        let csv = history_to_csv(&[entry(1_769_990_400, 16.87, 6_748.4)]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "2026-02-02,100,40000,16.9,6748");
    }

    #[test]
    fn negative_profit_rounds_toward_nearest() {
        let csv = history_to_csv(&[entry(0, -12.34, -999.6)]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.ends_with(",-12.3,-1000"));
    }

    #[test]
    fn one_line_per_entry_most_recent_first() {
        let csv = history_to_csv(&[entry(1_769_990_400, 10.0, 1.0), entry(0, 20.0, 2.0)]);
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.lines().nth(1).unwrap().starts_with("2026-02-02"));
        assert!(csv.lines().nth(2).unwrap().starts_with("1970-01-01"));
    }
}
