//! 入力ファイルの読み込み
//!
//! POSエクスポート（CSV/Excel）を `Row` の列に変換する。
//! バイト列の取得とデコードを分け、デコード側はファイルシステムに依存しない。

mod csv;
mod xlsx;

use crate::error::{ReportError, Result};
use ramen_report_common::{CellValue, Row};
use std::path::Path;

/// 入力ファイルの形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Spreadsheet,
}

impl SourceFormat {
    /// 拡張子から形式を判定
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" | "txt" => Ok(SourceFormat::Csv),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(SourceFormat::Spreadsheet),
            _ => Err(ReportError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// ファイルを読み込んで行に変換
pub fn load_rows(path: &Path) -> Result<Vec<Row>> {
    if !path.exists() {
        return Err(ReportError::FileNotFound(path.display().to_string()));
    }

    let format = SourceFormat::from_path(path)?;
    let bytes = std::fs::read(path)?;
    decode_rows(&bytes, format)
}

/// バイト列を行に変換
pub fn decode_rows(bytes: &[u8], format: SourceFormat) -> Result<Vec<Row>> {
    let table = match format {
        SourceFormat::Csv => csv::read_table(bytes)?,
        SourceFormat::Spreadsheet => xlsx::read_table(bytes)?,
    };
    Ok(rows_from_table(table))
}

/// 先頭行を見出しとして行データを組み立てる
///
/// 見出しが空の列は捨てる。全セルが空の行も捨てる。
fn rows_from_table(table: Vec<Vec<CellValue>>) -> Vec<Row> {
    let mut records = table.into_iter();
    let headers: Vec<String> = match records.next() {
        Some(header_row) => header_row.iter().map(|c| c.as_text().trim().to_string()).collect(),
        None => return Vec::new(),
    };

    records
        .map(|record| {
            headers
                .iter()
                .zip(record)
                .filter(|(header, _)| !header.is_empty())
                .map(|(header, value)| (header.clone(), value))
                .collect::<Row>()
        })
        .filter(|row| !row.is_blank())
        .collect()
}
