//! 日報テキストの生成
//!
//! `ReportState` から日報本文を組み立てる。同じ集計からは常に同じ文字列になる。
//! 中身のないセクションは出力せず、セクション間は空行1つで区切る。

use crate::text::format_yen;
use crate::types::{PaymentChannel, RamenCount, ReportState, SideDish};
use chrono::{Datelike, NaiveDate, Weekday};

/// 日付の見出し（2026年10月17日（土））
pub fn date_label(date: NaiveDate) -> String {
    format!(
        "{}年{}月{}日（{}）",
        date.year(),
        date.month(),
        date.day(),
        weekday_label(date.weekday())
    )
}

fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "月",
        Weekday::Tue => "火",
        Weekday::Wed => "水",
        Weekday::Thu => "木",
        Weekday::Fri => "金",
        Weekday::Sat => "土",
        Weekday::Sun => "日",
    }
}

fn payment_lines(state: &ReportState) -> Vec<String> {
    let channels = PaymentChannel::ALL
        .into_iter()
        .filter(|c| state.payments.get(*c) > 0)
        .map(|c| format!("{} {}", c.label(), format_yen(state.payments.get(c))));

    let others = state
        .other_payments
        .iter()
        .filter(|p| p.amount > 0)
        .map(|p| format!("{} {}", p.label, format_yen(p.amount)));

    channels.chain(others).collect()
}

fn visitor_lines(state: &ReportState) -> Vec<String> {
    let mut lines = Vec::new();
    if state.groups > 0 {
        lines.push(format!("組数 {}組", state.groups));
    }
    if state.people > 0 {
        lines.push(format!("人数 {}名", state.people));
    }
    lines
}

/// 種別1行分の内訳（セット2・コース1）
fn breakdown(count: &RamenCount) -> String {
    let mut parts = Vec::new();
    if count.set > 0 {
        parts.push(format!("セット{}", count.set));
    }
    if count.course > 0 {
        parts.push(format!("コース{}", count.course));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!("（{}）", parts.join("・"))
    }
}

fn ramen_lines(state: &ReportState) -> Vec<String> {
    let total = state.ramen.grand_total();
    if total == 0 {
        return Vec::new();
    }

    let mut lines = vec![format!("ラーメン 計{}杯", total)];
    for (variant, count) in state.ramen.iter() {
        if count.combined() > 0 {
            lines.push(format!("{} {}杯{}", variant.label(), count.combined(), breakdown(&count)));
        }
    }
    lines
}

fn side_lines(state: &ReportState) -> Vec<String> {
    SideDish::ALL
        .into_iter()
        .filter(|s| state.sides.get(*s) > 0)
        .map(|s| format!("{} {}", s.label(), state.sides.get(s)))
        .collect()
}

fn course_lines(state: &ReportState) -> Vec<String> {
    state
        .courses
        .iter()
        .filter(|c| c.people > 0)
        .map(|c| {
            let price = if c.price > 0 { c.price.to_string() } else { String::new() };
            format!("{}{} {}名", c.label, price, c.people)
        })
        .collect()
}

fn unassigned_lines(state: &ReportState) -> Vec<String> {
    if state.unassigned.is_empty() {
        Vec::new()
    } else {
        vec![format!("※未分類 {}件（手動で振り分けてください）", state.unassigned.len())]
    }
}

/// 日報テキストを生成する
pub fn render(state: &ReportState) -> String {
    let sections = [
        vec![date_label(state.date)],
        payment_lines(state),
        visitor_lines(state),
        ramen_lines(state),
        side_lines(state),
        course_lines(state),
        unassigned_lines(state),
    ];

    sections
        .iter()
        .filter(|lines| !lines.is_empty())
        .map(|lines| lines.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// 保存用のファイル名（ISO日付.txt）
pub fn file_name(state: &ReportState) -> String {
    format!("{}.txt", state.date.format("%Y-%m-%d"))
}
