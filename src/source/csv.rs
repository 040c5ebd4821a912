//! CSV読み込み
//!
//! UTF-8（BOM付き可）を優先し、読めなければ Shift_JIS として扱う。

use crate::error::Result;
use ramen_report_common::CellValue;
use tracing::warn;

/// バイト列を文字列に変換
pub(super) fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (decoded, _, had_errors) = encoding_rs::SHIFT_JIS.decode(bytes);
            if had_errors {
                warn!("CSVの文字コードを判定できませんでした（Shift_JISとして読み込み）");
            }
            decoded.into_owned()
        }
    }
}

pub(super) fn read_table(bytes: &[u8]) -> Result<Vec<Vec<CellValue>>> {
    let content = decode_text(bytes);
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut table = Vec::new();
    for record in reader.records() {
        let record = record?;
        table.push(
            record
                .iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }
    Ok(table)
}
