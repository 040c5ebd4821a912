//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("入力データがありません: {0}")]
    MissingInput(&'static str),

    #[error("売上集計データが空です")]
    EmptyStatsInput,

    #[error("未分類リストに存在しない番号です: {0}")]
    IndexOutOfRange(usize),

    #[error("不明なラーメン種別: {0}")]
    UnknownVariant(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
