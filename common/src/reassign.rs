//! 未分類商品の手動振り分け
//!
//! 未分類リストの商品を、指定したラーメン種別の単品・セット・コース数へ移す。
//! 移動量は `[0, 残数]` に丸め、整数に切り捨てる。0 以下なら何もしない。

use crate::error::{Error, Result};
use crate::types::{RamenVariant, ReportState};
use tracing::debug;

/// 振り分け先の区分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Portion {
    Plain,
    Set,
    Course,
}

impl Portion {
    pub fn label(&self) -> &'static str {
        match self {
            Portion::Plain => "単品",
            Portion::Set => "セット",
            Portion::Course => "コース",
        }
    }
}

/// 振り分け操作
#[derive(Debug, Clone, PartialEq)]
pub enum ReassignAction {
    /// 単品またはセットへ（amount 省略時は残数すべて）
    ToVariant {
        index: usize,
        variant: RamenVariant,
        as_set: bool,
        amount: Option<f64>,
    },
    /// コースへ
    ToCourse {
        index: usize,
        variant: RamenVariant,
        amount: Option<f64>,
    },
    /// 未分類をすべて既定種別のセットへ
    BulkToDefault { variant: RamenVariant },
}

/// 振り分け結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReassignOutcome {
    /// 移動した（removed: 未分類リストから消えた）
    Moved { quantity: u32, removed: bool },
    /// 移動量が0以下だった
    Unchanged,
    /// 一括振り分けで移動した件数と数量
    Bulk { items: usize, quantity: u32 },
    /// 未分類が空だった
    NothingToDo,
}

/// 要求量を `[0, remaining]` に丸める
pub fn clamp_amount(requested: Option<f64>, remaining: u32) -> u32 {
    match requested {
        None => remaining,
        Some(amount) if amount.is_nan() || amount <= 0.0 => 0,
        Some(amount) => amount.floor().min(remaining as f64) as u32,
    }
}

/// 振り分けを適用する
pub fn apply(state: &mut ReportState, action: &ReassignAction) -> Result<ReassignOutcome> {
    match *action {
        ReassignAction::ToVariant { index, variant, as_set, amount } => {
            let portion = if as_set { Portion::Set } else { Portion::Plain };
            move_item(state, index, variant, portion, amount)
        }
        ReassignAction::ToCourse { index, variant, amount } => {
            move_item(state, index, variant, Portion::Course, amount)
        }
        ReassignAction::BulkToDefault { variant } => Ok(bulk_assign(state, variant)),
    }
}

fn move_item(
    state: &mut ReportState,
    index: usize,
    variant: RamenVariant,
    portion: Portion,
    amount: Option<f64>,
) -> Result<ReassignOutcome> {
    let remaining = state
        .unassigned
        .get(index)
        .map(|item| item.quantity)
        .ok_or(Error::IndexOutOfRange(index))?;

    let quantity = clamp_amount(amount, remaining);
    if quantity == 0 {
        return Ok(ReassignOutcome::Unchanged);
    }

    let count = state.ramen.get_mut(variant);
    match portion {
        Portion::Plain => count.plain = count.plain.saturating_add(quantity),
        Portion::Set => count.set = count.set.saturating_add(quantity),
        Portion::Course => count.course = count.course.saturating_add(quantity),
    }

    let removed = quantity == remaining;
    if removed {
        let item = state.unassigned.remove(index);
        debug!(name = %item.name, quantity, variant = %variant, portion = portion.label(), "振り分け完了");
    } else {
        state.unassigned[index].quantity -= quantity;
        debug!(index, quantity, variant = %variant, portion = portion.label(), "一部を振り分け");
    }

    Ok(ReassignOutcome::Moved { quantity, removed })
}

fn bulk_assign(state: &mut ReportState, variant: RamenVariant) -> ReassignOutcome {
    if state.unassigned.is_empty() {
        return ReassignOutcome::NothingToDo;
    }

    let items = state.unassigned.len();
    let quantity = state
        .unassigned
        .drain(..)
        .map(|item| item.quantity)
        .fold(0, u32::saturating_add);
    let count = state.ramen.get_mut(variant);
    count.set = count.set.saturating_add(quantity);
    debug!(items, quantity, variant = %variant, "未分類を一括振り分け");

    ReassignOutcome::Bulk { items, quantity }
}

/// 単品・セットへ振り分ける
pub fn reassign(
    state: &mut ReportState,
    index: usize,
    variant: RamenVariant,
    as_set: bool,
    amount: Option<f64>,
) -> Result<ReassignOutcome> {
    apply(state, &ReassignAction::ToVariant { index, variant, as_set, amount })
}

/// コースへ振り分ける
pub fn reassign_to_course(
    state: &mut ReportState,
    index: usize,
    variant: RamenVariant,
    amount: Option<f64>,
) -> Result<ReassignOutcome> {
    apply(state, &ReassignAction::ToCourse { index, variant, amount })
}

/// 未分類をすべて既定種別のセットへ振り分ける
pub fn bulk_assign_all_to_default(state: &mut ReportState, variant: RamenVariant) -> ReassignOutcome {
    bulk_assign(state, variant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UnassignedItem;
    use chrono::NaiveDate;

    fn state_with(items: &[(&str, u32)]) -> ReportState {
        let mut state = ReportState::new(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        state.unassigned = items
            .iter()
            .map(|(name, quantity)| UnassignedItem { name: name.to_string(), quantity: *quantity })
            .collect();
        state
    }

    #[test]
    fn test_clamp_amount() {
        assert_eq!(clamp_amount(None, 3), 3);
        assert_eq!(clamp_amount(Some(1.9), 3), 1);
        assert_eq!(clamp_amount(Some(10.0), 3), 3);
        assert_eq!(clamp_amount(Some(0.4), 3), 0);
        assert_eq!(clamp_amount(Some(-2.0), 3), 0);
        assert_eq!(clamp_amount(Some(f64::NAN), 3), 0);
    }

    #[test]
    fn test_partial_reassign() {
        let mut state = state_with(&[("限定ラーメン", 3)]);
        let outcome = reassign(&mut state, 0, RamenVariant::Hana, false, Some(1.0)).unwrap();

        assert_eq!(outcome, ReassignOutcome::Moved { quantity: 1, removed: false });
        assert_eq!(state.unassigned[0].quantity, 2);
        assert_eq!(state.ramen.get(RamenVariant::Hana).plain, 1);
    }

    #[test]
    fn test_full_reassign_removes_item() {
        let mut state = state_with(&[("限定ラーメン", 3), ("麺大盛り", 1)]);
        let outcome = reassign(&mut state, 0, RamenVariant::Yuki, true, None).unwrap();

        assert_eq!(outcome, ReassignOutcome::Moved { quantity: 3, removed: true });
        assert_eq!(state.unassigned.len(), 1);
        assert_eq!(state.unassigned[0].name, "麺大盛り");
        assert_eq!(state.ramen.get(RamenVariant::Yuki).set, 3);
    }

    #[test]
    fn test_over_request_is_clamped() {
        let mut state = state_with(&[("限定ラーメン", 2)]);
        reassign_to_course(&mut state, 0, RamenVariant::Setsugekka, Some(99.0)).unwrap();

        assert!(state.unassigned.is_empty());
        assert_eq!(state.ramen.get(RamenVariant::Setsugekka).course, 2);
    }

    #[test]
    fn test_zero_amount_is_noop() {
        let mut state = state_with(&[("限定ラーメン", 2)]);
        let before = state.clone();
        let outcome = reassign(&mut state, 0, RamenVariant::Hana, false, Some(0.0)).unwrap();

        assert_eq!(outcome, ReassignOutcome::Unchanged);
        assert_eq!(state, before);
    }

    #[test]
    fn test_index_out_of_range() {
        let mut state = state_with(&[]);
        let result = reassign(&mut state, 0, RamenVariant::Hana, false, None);
        assert!(matches!(result, Err(Error::IndexOutOfRange(0))));
    }

    #[test]
    fn test_bulk_assign() {
        let mut state = state_with(&[("限定ラーメン", 2), ("花or月花セット", 3)]);
        state.ramen.get_mut(RamenVariant::Hana).set = 1;

        let outcome = bulk_assign_all_to_default(&mut state, RamenVariant::Hana);
        assert_eq!(outcome, ReassignOutcome::Bulk { items: 2, quantity: 5 });
        assert!(state.unassigned.is_empty());
        assert_eq!(state.ramen.get(RamenVariant::Hana).set, 6);
    }

    #[test]
    fn test_bulk_assign_saturates() {
        let mut state = state_with(&[("限定ラーメン", u32::MAX), ("麺大盛り", 7)]);
        let outcome = bulk_assign_all_to_default(&mut state, RamenVariant::Hana);
        assert_eq!(outcome, ReassignOutcome::Bulk { items: 2, quantity: u32::MAX });
        assert_eq!(state.ramen.get(RamenVariant::Hana).set, u32::MAX);

        let mut state = state_with(&[("限定ラーメン", 3)]);
        state.ramen.get_mut(RamenVariant::Yuki).course = u32::MAX - 1;
        reassign_to_course(&mut state, 0, RamenVariant::Yuki, None).unwrap();
        assert_eq!(state.ramen.get(RamenVariant::Yuki).course, u32::MAX);
    }

    #[test]
    fn test_bulk_assign_empty() {
        let mut state = state_with(&[]);
        let outcome = apply(&mut state, &ReassignAction::BulkToDefault { variant: RamenVariant::Hana }).unwrap();
        assert_eq!(outcome, ReassignOutcome::NothingToDo);
        assert_eq!(state.ramen.grand_total(), 0);
    }
}
