//! 商品別売上の分類
//!
//! 商品1行ごとに行き先を1つ決める。ルールは `RULES` の順に評価し、
//! 最初に結論を出したルールで確定する。
//!
//! ## 評価順
//! 1. 数量が0以下 → スキップ
//! 2. 除外商品（月花コース） → 破棄
//! 3. 「花 or 花コンボ」のセット → 必ず手動振り分け
//! 4. サイドメニュー（よくばりカレー・餃子）
//! 5. コース予約 → コース人数（ラーメン数には入れない）
//! 6. ラーメン種別（長い名前から照合）→ 単品/セット
//! 7. 種別不明のラーメン（種別名を含むが照合できない名前も） → 手動振り分け
//!
//! どれにも当たらない行（ドリンク等）は対象外として捨てる。

use crate::fields::{resolve_numeric, resolve_text};
use crate::text::canonical_name;
use crate::types::{CoursePeopleEntry, RamenTotals, RamenVariant, Row, SideDish, SideTotals, UnassignedItem};
use regex::Regex;
use tracing::debug;

/// 商品名の列見出し
pub const NAME_COLUMNS: &[&str] = &["商品名", "メニュー名", "品目", "品名", "商品", "name", "item"];

/// 数量の列見出し
pub const QUANTITY_COLUMNS: &[&str] = &["数量", "販売数", "販売数量", "個数", "点数", "qty", "quantity"];

/// カテゴリの列見出し
pub const CATEGORY_COLUMNS: &[&str] = &["カテゴリ", "カテゴリー", "分類", "部門", "category"];

lazy_static::lazy_static! {
    static ref EXCLUDED_RE: Regex = Regex::new(r"月花コース").unwrap();
    static ref FLOWER_EITHER_RE: Regex =
        Regex::new(r"花\s*(?:(?i:or)|または|/|・)\s*(?:雪月花|月花|雪花|風花)").unwrap();
    static ref SET_RE: Regex = Regex::new(r"セット|(?i:set)").unwrap();
    static ref YOKUBARI_RE: Regex = Regex::new(r"(?:よくばり|欲張り|ヨクバリ)\s*カレー").unwrap();
    static ref GYOZA_RE: Regex = Regex::new(r"餃子|ぎょうざ|ギョーザ|ギョウザ").unwrap();
    static ref COURSE_RE: Regex = Regex::new(r"コース|予約|(?i:course)").unwrap();
    static ref DINNER_RE: Regex = Regex::new(r"ディナー|(?i:dinner)").unwrap();
    static ref CROWDFUND_RE: Regex = Regex::new(r"クラファン|クラウドファンディング|(?i:crowdfunding)").unwrap();
    static ref PRICE_RE: Regex = Regex::new(r"(?:^|\D)(\d{4,5})(?:\D|$)").unwrap();
    static ref PEOPLE_RE: Regex = Regex::new(r"(\d+)\s*名").unwrap();
    static ref GENERIC_RAMEN_RE: Regex = Regex::new(r"ラーメン|らーめん|拉麺|麺|(?i:ramen|noodle)").unwrap();

    /// 照合順の種別パターン（名前の長いものが先）
    static ref VARIANT_PATTERNS: Vec<(RamenVariant, Regex)> = {
        let mut variants = RamenVariant::ALL.to_vec();
        variants.sort_by_key(|v| std::cmp::Reverse(v.label().chars().count()));
        variants
            .into_iter()
            .map(|v| {
                let pattern = format!(
                    r"(?:^|[「『(\s]){}(?:$|[」』)(「『・/+\s\d]|ラーメン|らーめん|セット|(?i:set))",
                    regex::escape(v.label())
                );
                (v, Regex::new(&pattern).unwrap())
            })
            .collect()
    };
}

/// 分類対象の商品行
#[derive(Debug, Clone, PartialEq)]
pub struct ProductLine {
    /// POS上の商品名（表示用）
    pub name: String,
    /// 照合用に正規化した商品名
    pub canonical: String,
    /// 照合用に正規化したカテゴリ
    pub category: String,
    pub quantity: f64,
}

impl ProductLine {
    pub fn new(name: &str, category: &str, quantity: f64) -> Self {
        Self {
            name: name.trim().to_string(),
            canonical: canonical_name(name),
            category: canonical_name(category),
            quantity,
        }
    }

    pub fn from_row(row: &Row) -> Self {
        Self::new(
            &resolve_text(row, NAME_COLUMNS),
            &resolve_text(row, CATEGORY_COLUMNS),
            resolve_numeric(row, QUANTITY_COLUMNS),
        )
    }

    /// 集計用の数量
    ///
    /// 正の端数は四捨五入するが、1未満にはしない。
    pub fn count(&self) -> u32 {
        if self.quantity > 0.0 {
            (self.quantity.round() as u32).max(1)
        } else {
            0
        }
    }

    fn is_flower_either(&self) -> bool {
        FLOWER_EITHER_RE.is_match(&self.canonical)
    }

    fn has_set_marker(&self) -> bool {
        SET_RE.is_match(&self.canonical) || SET_RE.is_match(&self.category)
    }
}

/// 商品行の行き先
#[derive(Debug, Clone, PartialEq)]
pub enum ProductFate {
    /// 数量なし
    Skipped,
    /// 除外商品
    Excluded,
    /// 手動振り分け待ち
    Unassigned,
    Side(SideDish),
    Course(CoursePeopleEntry),
    Ramen { variant: RamenVariant, set: bool },
    /// どのルールにも該当しない
    Dropped,
}

/// 分類ルール
pub struct Rule {
    pub name: &'static str,
    pub decide: fn(&ProductLine) -> Option<ProductFate>,
}

/// 評価順に並んだ分類ルール
pub const RULES: &[Rule] = &[
    Rule { name: "数量なし", decide: skip_without_quantity },
    Rule { name: "除外商品", decide: hard_exclusion },
    Rule { name: "花/花コンボのセット", decide: flower_either_set },
    Rule { name: "サイドメニュー", decide: side_dish },
    Rule { name: "コース予約", decide: course_booking },
    Rule { name: "ラーメン種別", decide: ramen_variant },
    Rule { name: "種別不明ラーメン", decide: generic_ramen },
];

fn skip_without_quantity(line: &ProductLine) -> Option<ProductFate> {
    (line.quantity.is_nan() || line.quantity <= 0.0).then_some(ProductFate::Skipped)
}

fn hard_exclusion(line: &ProductLine) -> Option<ProductFate> {
    EXCLUDED_RE
        .is_match(&line.canonical)
        .then_some(ProductFate::Excluded)
}

fn flower_either_set(line: &ProductLine) -> Option<ProductFate> {
    (line.is_flower_either() && line.has_set_marker())
        .then_some(ProductFate::Unassigned)
}

fn side_dish(line: &ProductLine) -> Option<ProductFate> {
    if YOKUBARI_RE.is_match(&line.canonical) {
        Some(ProductFate::Side(SideDish::YokubariCurry))
    } else if GYOZA_RE.is_match(&line.canonical) {
        Some(ProductFate::Side(SideDish::Gyoza))
    } else {
        None
    }
}

fn course_booking(line: &ProductLine) -> Option<ProductFate> {
    if COURSE_RE.is_match(&line.canonical) || COURSE_RE.is_match(&line.category) {
        Some(ProductFate::Course(parse_course(line)))
    } else {
        None
    }
}

fn ramen_variant(line: &ProductLine) -> Option<ProductFate> {
    if line.is_flower_either() {
        return None;
    }
    match_variant(&line.canonical).map(|variant| ProductFate::Ramen {
        variant,
        set: line.has_set_marker(),
    })
}

fn generic_ramen(line: &ProductLine) -> Option<ProductFate> {
    let mentions_variant = RamenVariant::ALL
        .iter()
        .any(|v| line.canonical.contains(v.label()));

    (GENERIC_RAMEN_RE.is_match(&line.canonical) || mentions_variant).then_some(ProductFate::Unassigned)
}

/// 商品名からラーメン種別を探す
pub fn match_variant(name: &str) -> Option<RamenVariant> {
    VARIANT_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(name))
        .map(|(variant, _)| *variant)
}

/// コース予約の商品名を解析する
///
/// - 名称: ディナー / クラファン / それ以外はコース
/// - 単価: 4〜5桁の数字（なければ0）
/// - 人数: 「N名」（なければ数量）
pub fn parse_course(line: &ProductLine) -> CoursePeopleEntry {
    let label = if DINNER_RE.is_match(&line.canonical) {
        "ディナーコース"
    } else if CROWDFUND_RE.is_match(&line.canonical) {
        "クラファンコース"
    } else {
        "コース"
    };

    let without_commas = line.canonical.replace(',', "");
    let price = PRICE_RE
        .captures(&without_commas)
        .and_then(|cap| cap[1].parse::<u32>().ok())
        .unwrap_or(0);

    let people = PEOPLE_RE
        .captures(&line.canonical)
        .and_then(|cap| cap[1].parse::<u32>().ok())
        .unwrap_or_else(|| line.count());

    CoursePeopleEntry {
        label: label.to_string(),
        price,
        people,
    }
}

/// 1行の行き先を決める（ルール名付き）
pub fn classify_line(line: &ProductLine) -> (&'static str, ProductFate) {
    RULES
        .iter()
        .find_map(|rule| (rule.decide)(line).map(|fate| (rule.name, fate)))
        .unwrap_or(("対象外", ProductFate::Dropped))
}

/// 商品別売上の集計結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductTally {
    pub sides: SideTotals,
    pub ramen: RamenTotals,
    pub courses: Vec<CoursePeopleEntry>,
    pub unassigned: Vec<UnassignedItem>,
    /// 除外した行数
    pub excluded: usize,
    /// 対象外として捨てた行数
    pub dropped: usize,
}

impl ProductTally {
    fn record(&mut self, line: &ProductLine, fate: ProductFate) {
        let quantity = line.count();
        match fate {
            ProductFate::Skipped => {}
            ProductFate::Excluded => self.excluded += 1,
            ProductFate::Dropped => self.dropped += 1,
            ProductFate::Unassigned => self.unassigned.push(UnassignedItem {
                name: line.name.clone(),
                quantity,
            }),
            ProductFate::Side(side) => self.sides.add(side, quantity),
            ProductFate::Course(entry) => self.courses.push(entry),
            ProductFate::Ramen { variant, set } => {
                let count = self.ramen.get_mut(variant);
                if set {
                    count.set = count.set.saturating_add(quantity);
                } else {
                    count.plain = count.plain.saturating_add(quantity);
                }
            }
        }
    }
}

/// 商品別売上の全行を分類する
///
/// 同名の種別不明商品も行ごとに別の未分類エントリになる。
pub fn classify_products(rows: &[Row]) -> ProductTally {
    let mut tally = ProductTally::default();

    for row in rows {
        let line = ProductLine::from_row(row);
        let (rule, fate) = classify_line(&line);
        debug!(name = %line.name, quantity = line.quantity, rule, "商品を分類");
        tally.record(&line, fate);
    }

    tally
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, quantity: f64) -> ProductLine {
        ProductLine::new(name, "", quantity)
    }

    fn fate(name: &str) -> ProductFate {
        classify_line(&line(name, 1.0)).1
    }

    fn product_row(name: &str, quantity: i64) -> Row {
        Row::new().with("商品名", name).with("数量", quantity)
    }

    #[test]
    fn test_rules_are_in_priority_order() {
        let names: Vec<&str> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec!["数量なし", "除外商品", "花/花コンボのセット", "サイドメニュー", "コース予約", "ラーメン種別", "種別不明ラーメン"]
        );
    }

    #[test]
    fn test_skip_without_quantity() {
        assert_eq!(classify_line(&line("豆乳ラーメン「花」", 0.0)).1, ProductFate::Skipped);
        assert_eq!(classify_line(&line("豆乳ラーメン「花」", -2.0)).1, ProductFate::Skipped);
        assert_eq!(classify_line(&line("豆乳ラーメン「花」", f64::NAN)).1, ProductFate::Skipped);
    }

    #[test]
    fn test_fractional_quantity_is_counted() {
        let half = line("豆乳ラーメン「花」", 0.4);
        assert_eq!(classify_line(&half).1, ProductFate::Ramen { variant: RamenVariant::Hana, set: false });
        assert_eq!(half.count(), 1);

        let rows = vec![
            Row::new().with("商品名", "豆乳ラーメン「花」").with("数量", 0.4),
            Row::new().with("商品名", "餃子").with("数量", 2.6),
        ];
        let tally = classify_products(&rows);
        assert_eq!(tally.ramen.get(RamenVariant::Hana).plain, 1);
        assert_eq!(tally.sides.gyoza, 3);
    }

    #[test]
    fn test_hard_exclusion() {
        assert_eq!(fate("月花コース（2名様）"), ProductFate::Excluded);
    }

    #[test]
    fn test_flower_either_set_forced_unassigned() {
        assert_eq!(fate("花or月花セット"), ProductFate::Unassigned);
        assert_eq!(fate("花 OR 雪月花 セット"), ProductFate::Unassigned);
        // セット表記がなければ強制振り分けではなく種別不明として扱う
        let (rule, decided) = classify_line(&line("花or月花", 1.0));
        assert_eq!(rule, "種別不明ラーメン");
        assert_eq!(decided, ProductFate::Unassigned);
        assert_eq!(fate("花・月花"), ProductFate::Unassigned);
    }

    #[test]
    fn test_side_dishes() {
        assert_eq!(fate("よくばりカレー"), ProductFate::Side(SideDish::YokubariCurry));
        assert_eq!(fate("焼き餃子(6個)"), ProductFate::Side(SideDish::Gyoza));
    }

    #[test]
    fn test_side_wins_over_course() {
        assert_eq!(fate("餃子コース"), ProductFate::Side(SideDish::Gyoza));
        let by_category = ProductLine::new("よくばりカレー", "コース", 2.0);
        assert_eq!(classify_line(&by_category).1, ProductFate::Side(SideDish::YokubariCurry));
    }

    #[test]
    fn test_course_wins_over_variant() {
        let (_, decided) = classify_line(&line("雪月花ディナーコース 5,500円(2名様)", 1.0));
        assert_eq!(
            decided,
            ProductFate::Course(CoursePeopleEntry {
                label: "ディナーコース".into(),
                price: 5500,
                people: 2,
            })
        );
    }

    #[test]
    fn test_course_by_category() {
        let course_line = ProductLine::new("花", "コース料理", 3.0);
        let (_, decided) = classify_line(&course_line);
        assert_eq!(
            decided,
            ProductFate::Course(CoursePeopleEntry { label: "コース".into(), price: 0, people: 3 })
        );
    }

    #[test]
    fn test_parse_course_labels() {
        let entry = parse_course(&line("クラファン返礼コース　８０００円", 4.0));
        assert_eq!(entry.label, "クラファンコース");
        assert_eq!(entry.price, 8000);
        assert_eq!(entry.people, 4);
    }

    #[test]
    fn test_compound_variant_before_component() {
        assert_eq!(match_variant("雪月花セット"), Some(RamenVariant::Setsugekka));
        assert_eq!(match_variant("月花ラーメン"), Some(RamenVariant::TsukiHana));
        assert_eq!(match_variant("豆乳ラーメン「花」"), Some(RamenVariant::Hana));
        assert_eq!(match_variant("風花"), Some(RamenVariant::KazeHana));
        assert_eq!(match_variant("醤油ラーメン"), None);
    }

    #[test]
    fn test_variant_followed_by_bracket_or_separator() {
        assert_eq!(match_variant("雪月花（大盛り）"), Some(RamenVariant::Setsugekka));
        assert_eq!(match_variant("花・セット"), Some(RamenVariant::Hana));
        assert_eq!(match_variant("風花/味玉"), Some(RamenVariant::KazeHana));
        assert_eq!(match_variant("月+替玉"), Some(RamenVariant::Tsuki));
        assert_eq!(match_variant("雪2"), Some(RamenVariant::Yuki));
        assert_eq!(match_variant("雪月花「限定」"), Some(RamenVariant::Setsugekka));
    }

    #[test]
    fn test_pos_style_names_are_counted() {
        let rows = vec![product_row("雪月花（大盛り）", 2), product_row("花・セット", 1)];
        let tally = classify_products(&rows);
        assert_eq!(tally.ramen.get(RamenVariant::Setsugekka).plain, 2);
        assert_eq!(tally.ramen.get(RamenVariant::Hana).set, 1);
        assert_eq!(tally.ramen.grand_total(), 3);
        assert_eq!(tally.dropped, 0);
    }

    #[test]
    fn test_unmatched_variant_label_is_unassigned() {
        assert_eq!(fate("春の花ごころ"), ProductFate::Unassigned);
        assert_eq!(fate("雪見だいふく"), ProductFate::Unassigned);
        assert_eq!(fate("ウーロン茶"), ProductFate::Dropped);
    }

    #[test]
    fn test_large_quantities_saturate() {
        let rows = vec![product_row("花ラーメン", 3_000_000_000_i64), product_row("花ラーメン", 3_000_000_000_i64)];
        let tally = classify_products(&rows);
        assert_eq!(tally.ramen.get(RamenVariant::Hana).plain, u32::MAX);
        assert_eq!(tally.ramen.grand_total(), u32::MAX);
    }

    #[test]
    fn test_set_marker_from_name_or_category() {
        assert_eq!(fate("雪月花セット"), ProductFate::Ramen { variant: RamenVariant::Setsugekka, set: true });
        let by_category = ProductLine::new("雪ラーメン", "ランチSET", 1.0);
        assert_eq!(
            classify_line(&by_category).1,
            ProductFate::Ramen { variant: RamenVariant::Yuki, set: true }
        );
    }

    #[test]
    fn test_generic_ramen_is_unassigned() {
        assert_eq!(fate("限定ラーメン"), ProductFate::Unassigned);
        assert_eq!(fate("生ビール"), ProductFate::Dropped);
    }

    #[test]
    fn test_classify_products_scenario() {
        let rows = vec![
            product_row("豆乳ラーメン「花」", 2),
            product_row("雪月花セット", 1),
            product_row("よくばりカレー", 3),
        ];
        let tally = classify_products(&rows);
        assert_eq!(tally.ramen.get(RamenVariant::Hana).plain, 2);
        assert_eq!(tally.ramen.get(RamenVariant::Setsugekka).set, 1);
        assert_eq!(tally.sides.yokubari_curry, 3);
        assert!(tally.unassigned.is_empty());
    }

    #[test]
    fn test_unassigned_rows_are_not_merged() {
        let rows = vec![product_row("限定ラーメン", 1), product_row("限定ラーメン", 2)];
        let tally = classify_products(&rows);
        assert_eq!(
            tally.unassigned,
            vec![
                UnassignedItem { name: "限定ラーメン".into(), quantity: 1 },
                UnassignedItem { name: "限定ラーメン".into(), quantity: 2 },
            ]
        );
    }

    #[test]
    fn test_excluded_and_dropped_counts() {
        let rows = vec![
            product_row("月花コース（2名様）", 1),
            product_row("生ビール", 4),
            product_row("ウーロン茶", 0),
        ];
        let tally = classify_products(&rows);
        assert_eq!(tally.excluded, 1);
        assert_eq!(tally.dropped, 1);
        assert_eq!(tally.ramen.grand_total(), 0);
        assert!(tally.courses.is_empty());
    }
}
