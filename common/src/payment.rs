//! 決済サマリーの分類
//!
//! 売上集計の1行を決済チャネル別の金額に振り分ける。
//!
//! ## ルール
//! 1. 値が0の列は無視
//! 2. `Total` 以外のチャネル別名に一致 → そのチャネルに加算
//! 3. 除外リスト（組数・人数の別名、税・値引など）に一致 → 無視
//! 4. それ以外で正の値 → その他の決済として記録（初出順、見出しはそのまま）
//!
//! `Total` だけは加算せず、別名の優先順で最初に正の値を持つ列を採用する。

use crate::fields::{cell_number, resolve_numeric};
use crate::text::normalize;
use crate::types::{OtherPayment, PaymentChannel, PaymentTotals, Row};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// 決済として扱わない数値列
pub const IGNORED_COLUMNS: &[&str] = &[
    "組数",
    "人数",
    "客数",
    "消費税",
    "内消費税",
    "外消費税",
    "消費税（10%）",
    "消費税（8%）",
    "税額",
    "値引前売上",
    "売上高（値引前）",
    "値引",
    "値引き",
    "値引額",
    "割引",
    "割引額",
    "クーポン値引",
    "数量",
    "点数",
    "期間",
    "日付",
    "営業日",
];

/// 組数の列見出し
pub const GROUP_COLUMNS: &[&str] = &["組数", "組", "groups"];

/// 人数の列見出し
pub const PEOPLE_COLUMNS: &[&str] = &["人数", "客数", "people"];

lazy_static::lazy_static! {
    static ref ALIAS_LOOKUP: HashMap<String, PaymentChannel> = {
        let mut lookup = HashMap::new();
        for channel in PaymentChannel::ALL {
            for alias in channel.aliases() {
                lookup.entry(normalize(alias)).or_insert(channel);
            }
        }
        lookup
    };

    static ref IGNORED_LOOKUP: HashSet<String> = IGNORED_COLUMNS
        .iter()
        .chain(GROUP_COLUMNS)
        .chain(PEOPLE_COLUMNS)
        .map(|h| normalize(h))
        .collect();
}

/// 決済サマリーの分類結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentSummary {
    pub totals: PaymentTotals,
    pub other_payments: Vec<OtherPayment>,
    pub groups: u32,
    pub people: u32,
}

/// 列見出しに対応するチャネル
pub fn channel_for_header(header: &str) -> Option<PaymentChannel> {
    ALIAS_LOOKUP.get(&normalize(header)).copied()
}

/// 決済として扱わない列か
pub fn is_ignored_header(header: &str) -> bool {
    IGNORED_LOOKUP.contains(&normalize(header))
}

/// 総売上を決める
///
/// 別名を優先順に見て、最初に正の値を持つ列の値を返す。複数列の合算はしない。
pub fn resolve_total(row: &Row) -> i64 {
    for alias in PaymentChannel::Total.aliases() {
        let wanted = normalize(alias);
        let found = row
            .iter()
            .filter(|(header, _)| normalize(header) == wanted)
            .map(|(_, value)| to_yen(cell_number(value)))
            .find(|amount| *amount > 0);

        if let Some(amount) = found {
            debug!(alias, amount, "総売上の列を採用");
            return amount;
        }
    }
    0
}

/// 決済サマリー行を分類する
pub fn classify_payments(row: &Row) -> PaymentSummary {
    let mut summary = PaymentSummary::default();

    for (header, value) in row.iter() {
        let amount = to_yen(cell_number(value));
        if amount == 0 {
            continue;
        }

        match channel_for_header(header) {
            Some(PaymentChannel::Total) => {}
            Some(channel) => summary.totals.add(channel, amount),
            None if is_ignored_header(header) => {
                debug!(header, amount, "決済以外の列をスキップ");
            }
            None if amount > 0 => {
                debug!(header, amount, "未知の決済列");
                summary.other_payments.push(OtherPayment {
                    label: header.to_string(),
                    amount,
                });
            }
            None => {}
        }
    }

    summary.totals.set(PaymentChannel::Total, resolve_total(row));
    summary.groups = to_count(resolve_numeric(row, GROUP_COLUMNS));
    summary.people = to_count(resolve_numeric(row, PEOPLE_COLUMNS));

    summary
}

fn to_yen(value: f64) -> i64 {
    value.round() as i64
}

fn to_count(value: f64) -> u32 {
    if value > 0.0 {
        value.round() as u32
    } else {
        0
    }
}
