//! 文字列の正規化と数値抽出
//!
//! 列見出し・別名の照合はすべて `normalize` 後の文字列で行う。

use regex::Regex;

/// 照合用に正規化する（NBSP除去・trim・小文字化）
pub fn normalize(s: &str) -> String {
    s.replace('\u{00A0}', "").trim().to_lowercase()
}

/// 商品名の表記揺れを吸収する
///
/// 全角英数字・記号を半角に、全角スペースを半角にする。
/// 「」などの和文括弧はそのまま残す。
pub fn canonical_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '\u{3000}' | '\u{00A0}' => ' ',
            '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// セル文字列から数値を取り出す
///
/// 桁区切りと空白を除いたあと、最初の符号付き整数/小数を採用する。
/// 数値が見つからなければ 0。
pub fn parse_number(text: &str) -> f64 {
    lazy_static::lazy_static! {
        static ref NUMBER_RE: Regex = Regex::new(r"-?\d+(?:\.\d+)?").unwrap();
    }

    let cleaned: String = canonical_name(text)
        .chars()
        .filter(|c| !matches!(c, ',' | '、') && !c.is_whitespace())
        .collect();

    NUMBER_RE
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// 円表記（¥1,234）
pub fn format_yen(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if amount < 0 {
        format!("-¥{}", grouped)
    } else {
        format!("¥{}", grouped)
    }
}
