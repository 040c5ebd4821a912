//! 日報テキストの保存

use crate::error::Result;
use ramen_report_common::render::{file_name, render};
use ramen_report_common::ReportState;
use std::path::{Path, PathBuf};

/// 保存先のパス（ディレクトリなら「ISO日付.txt」を付ける）
pub fn output_path(output: &Path, state: &ReportState) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(file_name(state))
    } else {
        output.to_path_buf()
    }
}

/// 日報を書き出して保存先を返す
pub fn save_report(state: &ReportState, output: &Path) -> Result<PathBuf> {
    let path = output_path(output, state);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut text = render(state);
    text.push('\n');
    std::fs::write(&path, text)?;
    Ok(path)
}
