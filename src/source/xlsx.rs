//! Excel読み込み（先頭シートのみ）

use crate::error::{ReportError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use ramen_report_common::CellValue;
use std::io::Cursor;

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) if s.trim().is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Empty => CellValue::Empty,
        other => CellValue::Text(other.to_string()),
    }
}

pub(super) fn read_table(bytes: &[u8]) -> Result<Vec<Vec<CellValue>>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ReportError::Excel(format!("ファイルを開けません: {}", e)))?;

    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ReportError::Excel("シートがありません".into()))?;

    let range = workbook
        .worksheet_range(&first_sheet)
        .map_err(|e| ReportError::Excel(format!("シート「{}」を読めません: {}", first_sheet, e)))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_value).collect())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value() {
        assert_eq!(cell_value(&Data::Int(3)), CellValue::Number(3.0));
        assert_eq!(cell_value(&Data::Float(1234.5)), CellValue::Number(1234.5));
        assert_eq!(cell_value(&Data::String("PayPay".into())), CellValue::from("PayPay"));
        assert_eq!(cell_value(&Data::String("  ".into())), CellValue::Empty);
        assert_eq!(cell_value(&Data::Bool(true)), CellValue::from("true"));
        assert_eq!(cell_value(&Data::Empty), CellValue::Empty);
    }

    #[test]
    fn test_read_table_invalid_bytes() {
        let result = read_table(b"not a workbook");
        assert!(matches!(result, Err(ReportError::Excel(_))));
    }
}
