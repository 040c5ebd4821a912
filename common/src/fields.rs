//! 列の解決
//!
//! 候補見出しを優先順に試し、最初に見つかった列の値を返す。

use crate::text::{normalize, parse_number};
use crate::types::{CellValue, Row};

/// 候補見出しに一致する最初のセル
///
/// 候補の順に評価する（列の並び順ではない）。
pub fn find_cell<'a>(row: &'a Row, candidates: &[&str]) -> Option<&'a CellValue> {
    candidates.iter().find_map(|candidate| {
        let wanted = normalize(candidate);
        row.iter()
            .find(|(header, _)| normalize(header) == wanted)
            .map(|(_, value)| value)
    })
}

/// セルを数値として読む（読めなければ 0）
pub fn cell_number(value: &CellValue) -> f64 {
    match value {
        CellValue::Number(n) if n.is_finite() => *n,
        CellValue::Number(_) => 0.0,
        CellValue::Text(s) => parse_number(s),
        CellValue::Empty => 0.0,
    }
}

/// 候補見出しの列を数値で取得
pub fn resolve_numeric(row: &Row, candidates: &[&str]) -> f64 {
    find_cell(row, candidates).map(cell_number).unwrap_or(0.0)
}

/// 候補見出しの列をテキストで取得
pub fn resolve_text(row: &Row, candidates: &[&str]) -> String {
    find_cell(row, candidates)
        .map(CellValue::as_text)
        .unwrap_or_default()
}
