//! 分類パイプライン
//!
//! 商品別売上と決済サマリーから `ReportState` を新しく作る。
//! 片方でも欠けていれば失敗し、途中までの集計は返さない。

use crate::error::{Error, Result};
use crate::payment::classify_payments;
use crate::product::classify_products;
use crate::types::{ReportState, Row};
use chrono::NaiveDate;
use tracing::info;

/// 2つの入力から日報の集計を作る
///
/// # Arguments
/// * `products` - 商品別売上の行
/// * `stats` - 決済サマリーの行（先頭行のみ使用）
/// * `date` - 日報の日付
///
/// # Errors
/// * `MissingInput` - どちらかの入力がない
/// * `EmptyStatsInput` - 決済サマリーが0行
pub fn classify(products: Option<&[Row]>, stats: Option<&[Row]>, date: NaiveDate) -> Result<ReportState> {
    let products = products.ok_or(Error::MissingInput("商品別売上"))?;
    let stats = stats.ok_or(Error::MissingInput("売上集計"))?;
    let summary_row = stats.first().ok_or(Error::EmptyStatsInput)?;

    let payments = classify_payments(summary_row);
    let tally = classify_products(products);

    info!(
        rows = products.len(),
        ramen = tally.ramen.grand_total(),
        courses = tally.courses.len(),
        unassigned = tally.unassigned.len(),
        excluded = tally.excluded,
        dropped = tally.dropped,
        "分類完了"
    );

    Ok(ReportState {
        date,
        payments: payments.totals,
        other_payments: payments.other_payments,
        groups: payments.groups,
        people: payments.people,
        sides: tally.sides,
        ramen: tally.ramen,
        courses: tally.courses,
        unassigned: tally.unassigned,
    })
}
