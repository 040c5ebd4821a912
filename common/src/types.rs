//! 集計データの型定義
//!
//! 分類パイプラインとレンダラが共有する型:
//! - Row / CellValue: POSエクスポートの1行
//! - RamenVariant / SideDish / PaymentChannel: 固定の分類先
//! - ReportState: 日報1日分の集計スナップショット

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// セルの値
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl CellValue {
    /// 表示用テキスト（数値は整数なら小数点なし）
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            CellValue::Number(n) => n.to_string(),
            CellValue::Empty => String::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
            CellValue::Empty => true,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

/// 1行分のデータ（列見出し → 値、列順を保持）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// 列を追加（同名の列は後から追加したものも保持する）
    pub fn push(&mut self, header: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.push((header.into(), value.into()));
    }

    /// ビルダー形式で列を追加
    pub fn with(mut self, header: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.push(header, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(h, v)| (h.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// すべてのセルが空か
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.is_blank())
    }
}

impl<H: Into<String>, V: Into<CellValue>> FromIterator<(H, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (H, V)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(|(h, v)| (h.into(), v.into())).collect(),
        }
    }
}

/// ラーメンの種類（表示順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RamenVariant {
    #[serde(rename = "花")]
    Hana,
    #[serde(rename = "月")]
    Tsuki,
    #[serde(rename = "雪")]
    Yuki,
    #[serde(rename = "風")]
    Kaze,
    #[serde(rename = "月花")]
    TsukiHana,
    #[serde(rename = "雪花")]
    YukiHana,
    #[serde(rename = "風花")]
    KazeHana,
    #[serde(rename = "雪月")]
    YukiTsuki,
    #[serde(rename = "雪月花")]
    Setsugekka,
}

impl RamenVariant {
    pub const COUNT: usize = 9;

    /// 表示順の全種類
    pub const ALL: [RamenVariant; Self::COUNT] = [
        RamenVariant::Hana,
        RamenVariant::Tsuki,
        RamenVariant::Yuki,
        RamenVariant::Kaze,
        RamenVariant::TsukiHana,
        RamenVariant::YukiHana,
        RamenVariant::KazeHana,
        RamenVariant::YukiTsuki,
        RamenVariant::Setsugekka,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RamenVariant::Hana => "花",
            RamenVariant::Tsuki => "月",
            RamenVariant::Yuki => "雪",
            RamenVariant::Kaze => "風",
            RamenVariant::TsukiHana => "月花",
            RamenVariant::YukiHana => "雪花",
            RamenVariant::KazeHana => "風花",
            RamenVariant::YukiTsuki => "雪月",
            RamenVariant::Setsugekka => "雪月花",
        }
    }

    /// ラベルから種類を取得（前後の空白・括弧は無視）
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().trim_matches(|c| matches!(c, '「' | '」' | '『' | '』'));
        Self::ALL.into_iter().find(|v| v.label() == label)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for RamenVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for RamenVariant {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| crate::Error::UnknownVariant(s.to_string()))
    }
}

/// サイドメニュー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SideDish {
    #[serde(rename = "よくばりカレー")]
    YokubariCurry,
    #[serde(rename = "餃子")]
    Gyoza,
}

impl SideDish {
    pub const ALL: [SideDish; 2] = [SideDish::YokubariCurry, SideDish::Gyoza];

    pub fn label(&self) -> &'static str {
        match self {
            SideDish::YokubariCurry => "よくばりカレー",
            SideDish::Gyoza => "餃子",
        }
    }
}

/// 決済チャネル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentChannel {
    Total,
    Card,
    TableCheck,
    PayPay,
    Cash,
    Funfo,
}

impl PaymentChannel {
    /// 表示順
    pub const ALL: [PaymentChannel; 6] = [
        PaymentChannel::Total,
        PaymentChannel::Card,
        PaymentChannel::TableCheck,
        PaymentChannel::PayPay,
        PaymentChannel::Cash,
        PaymentChannel::Funfo,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentChannel::Total => "総売上",
            PaymentChannel::Card => "カード",
            PaymentChannel::TableCheck => "TableCheck",
            PaymentChannel::PayPay => "PayPay",
            PaymentChannel::Cash => "現金",
            PaymentChannel::Funfo => "funfo",
        }
    }

    /// 列見出しの別名（優先順）
    ///
    /// `Total` は先頭から順に評価され、最初の正の値だけが採用される。
    /// 税込みが税抜き・値引前より前に並んでいること。
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            PaymentChannel::Total => &[
                "売上高（税込み）",
                "売上高(税込み)",
                "売上高（税込）",
                "売上高(税込)",
                "税込売上",
                "総売上",
                "売上合計",
                "合計",
                "売上高",
                "売上高（税抜き）",
                "税抜売上",
                "純売上",
            ],
            PaymentChannel::Card => &["クレジットカード", "クレジット", "カード", "credit card", "card"],
            PaymentChannel::TableCheck => &["TableCheck", "テーブルチェック", "TableCheck決済"],
            PaymentChannel::PayPay => &["PayPay", "ペイペイ"],
            PaymentChannel::Cash => &["現金", "cash"],
            PaymentChannel::Funfo => &["funfo", "ファンフォ", "funfo決済"],
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// チャネル別の決済合計（円）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTotals {
    amounts: [i64; 6],
}

impl PaymentTotals {
    pub fn get(&self, channel: PaymentChannel) -> i64 {
        self.amounts[channel.index()]
    }

    pub fn set(&mut self, channel: PaymentChannel, amount: i64) {
        self.amounts[channel.index()] = amount;
    }

    pub fn add(&mut self, channel: PaymentChannel, amount: i64) {
        let slot = &mut self.amounts[channel.index()];
        *slot = slot.saturating_add(amount);
    }
}

/// 既知チャネル以外の決済列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherPayment {
    pub label: String,
    pub amount: i64,
}

/// ラーメン1種類の提供数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RamenCount {
    /// 単品
    pub plain: u32,
    /// セット
    pub set: u32,
    /// コース
    pub course: u32,
}

impl RamenCount {
    pub fn combined(&self) -> u32 {
        self.plain.saturating_add(self.set).saturating_add(self.course)
    }
}

/// 種類別のラーメン提供数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RamenTotals {
    counts: [RamenCount; RamenVariant::COUNT],
}

impl RamenTotals {
    pub fn get(&self, variant: RamenVariant) -> RamenCount {
        self.counts[variant.index()]
    }

    pub fn get_mut(&mut self, variant: RamenVariant) -> &mut RamenCount {
        &mut self.counts[variant.index()]
    }

    /// 全種類の合計杯数
    pub fn grand_total(&self) -> u32 {
        self.counts
            .iter()
            .map(RamenCount::combined)
            .fold(0, u32::saturating_add)
    }

    /// 表示順に (種類, 提供数)
    pub fn iter(&self) -> impl Iterator<Item = (RamenVariant, RamenCount)> + '_ {
        RamenVariant::ALL.into_iter().map(move |v| (v, self.get(v)))
    }
}

/// サイドメニューの販売数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideTotals {
    pub yokubari_curry: u32,
    pub gyoza: u32,
}

impl SideTotals {
    pub fn get(&self, side: SideDish) -> u32 {
        match side {
            SideDish::YokubariCurry => self.yokubari_curry,
            SideDish::Gyoza => self.gyoza,
        }
    }

    pub fn add(&mut self, side: SideDish, quantity: u32) {
        match side {
            SideDish::YokubariCurry => self.yokubari_curry = self.yokubari_curry.saturating_add(quantity),
            SideDish::Gyoza => self.gyoza = self.gyoza.saturating_add(quantity),
        }
    }
}

/// コース予約
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoursePeopleEntry {
    pub label: String,
    /// 単価（商品名から取れなければ0）
    pub price: u32,
    /// 人数
    pub people: u32,
}

/// 手動振り分け待ちの商品
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnassignedItem {
    pub name: String,
    pub quantity: u32,
}

/// 日付の前後移動
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateShift {
    Previous,
    Next,
}

/// 日報1日分の集計
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportState {
    pub date: NaiveDate,
    pub payments: PaymentTotals,
    pub other_payments: Vec<OtherPayment>,
    pub groups: u32,
    pub people: u32,
    pub sides: SideTotals,
    pub ramen: RamenTotals,
    pub courses: Vec<CoursePeopleEntry>,
    pub unassigned: Vec<UnassignedItem>,
}

impl ReportState {
    /// 空の集計
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            payments: PaymentTotals::default(),
            other_payments: Vec::new(),
            groups: 0,
            people: 0,
            sides: SideTotals::default(),
            ramen: RamenTotals::default(),
            courses: Vec::new(),
            unassigned: Vec::new(),
        }
    }

    /// 日付を1日ずらす（範囲外なら変更しない）
    pub fn shift_date(&mut self, shift: DateShift) {
        let delta = match shift {
            DateShift::Previous => Duration::days(-1),
            DateShift::Next => Duration::days(1),
        };
        if let Some(date) = self.date.checked_add_signed(delta) {
            self.date = date;
        }
    }

    /// 未分類の合計数量
    pub fn unassigned_quantity(&self) -> u32 {
        self.unassigned.iter().map(|i| i.quantity).fold(0, u32::saturating_add)
    }
}
