//! 対話式の未分類振り分け
//!
//! 未分類リストを表示し、コマンド入力で振り分けを繰り返す。
//! 操作のたびに日報を再描画する。

use crate::error::{ReportError, Result};
use dialoguer::Input;
use ramen_report_common::reassign::{self, ReassignAction, ReassignOutcome};
use ramen_report_common::{render, DateShift, RamenVariant, ReportState};

/// セッション中の操作
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// 振り分け
    Reassign(ReassignAction),
    /// 日付を前後に移動
    Shift(DateShift),
    /// 日報を表示
    Show,
    /// 終了
    Quit,
}

const HELP: &str = "操作: [番号 種別 (s:セット c:コース) (数量)] 例: 1 花 s 2 / [A]全て既定種別のセットへ / [p]前日 [n]翌日 / [v]表示 / [q]終了";

/// 入力行を操作に変換する
///
/// 番号は1始まり。数量を省略すると残数すべて。
pub fn parse_command(input: &str, default_variant: RamenVariant) -> std::result::Result<SessionCommand, String> {
    let tokens: Vec<&str> = input.split_whitespace().collect();

    match tokens.as_slice() {
        [] | ["v"] => Ok(SessionCommand::Show),
        ["q"] | ["Q"] => Ok(SessionCommand::Quit),
        ["p"] => Ok(SessionCommand::Shift(DateShift::Previous)),
        ["n"] => Ok(SessionCommand::Shift(DateShift::Next)),
        ["A"] => Ok(SessionCommand::Reassign(ReassignAction::BulkToDefault { variant: default_variant })),
        [number, variant, rest @ ..] => {
            let index = number
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .ok_or_else(|| format!("番号が不正です: {}", number))?;
            let variant = RamenVariant::from_label(variant)
                .ok_or_else(|| format!("不明な種別です: {}", variant))?;

            let (portion, amount) = match rest {
                [] => (None, None),
                [token] => match token.parse::<f64>() {
                    Ok(amount) => (None, Some(amount)),
                    Err(_) => (Some(*token), None),
                },
                [portion, amount] => {
                    let amount = amount
                        .parse::<f64>()
                        .map_err(|_| format!("数量が不正です: {}", amount))?;
                    (Some(*portion), Some(amount))
                }
                _ => return Err("入力が多すぎます".into()),
            };

            let action = match portion {
                None => ReassignAction::ToVariant { index, variant, as_set: false, amount },
                Some("s") | Some("S") | Some("セット") => {
                    ReassignAction::ToVariant { index, variant, as_set: true, amount }
                }
                Some("c") | Some("C") | Some("コース") => ReassignAction::ToCourse { index, variant, amount },
                Some(other) => return Err(format!("区分が不正です: {}（s/c）", other)),
            };
            Ok(SessionCommand::Reassign(action))
        }
        _ => Err(format!("入力を解釈できません: {}", input.trim())),
    }
}

fn print_unassigned(state: &ReportState) {
    if state.unassigned.is_empty() {
        println!("✓ 未分類の商品はありません");
        return;
    }

    println!("📋 未分類の商品: {}件", state.unassigned.len());
    for (i, item) in state.unassigned.iter().enumerate() {
        println!("  {}) {} ×{}", i + 1, item.name, item.quantity);
    }
}

fn describe(outcome: &ReassignOutcome) -> String {
    match outcome {
        ReassignOutcome::Moved { quantity, removed: true } => format!("✔ {}個を振り分けました（完了）", quantity),
        ReassignOutcome::Moved { quantity, removed: false } => format!("✔ {}個を振り分けました", quantity),
        ReassignOutcome::Unchanged => "数量が0のため変更なし".into(),
        ReassignOutcome::Bulk { items, quantity } => format!("✔ {}件（{}個）を一括で振り分けました", items, quantity),
        ReassignOutcome::NothingToDo => "未分類の商品はありません".into(),
    }
}

/// 対話式で未分類を振り分ける
pub fn run_interactive_session(state: &mut ReportState, default_variant: RamenVariant) -> Result<()> {
    println!("---");
    println!("{}", HELP);
    println!("---\n");

    loop {
        print_unassigned(state);

        let input: String = Input::new()
            .with_prompt("操作")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ReportError::Interactive(e.to_string()))?;

        match parse_command(&input, default_variant) {
            Ok(SessionCommand::Quit) => break,
            Ok(SessionCommand::Show) => println!("\n{}\n", render(state)),
            Ok(SessionCommand::Shift(shift)) => {
                state.shift_date(shift);
                println!("  → 日付: {}\n", state.date);
            }
            Ok(SessionCommand::Reassign(action)) => match reassign::apply(state, &action) {
                Ok(outcome) => println!("  {}\n\n{}\n", describe(&outcome), render(state)),
                Err(e) => println!("  ⚠ {}\n", e),
            },
            Err(message) => println!("  ⚠ {}\n  {}\n", message, HELP),
        }
    }

    Ok(())
}
