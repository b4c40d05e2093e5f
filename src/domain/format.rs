//! 表示用フォーマット

use crate::table::{Cell, Tone, Value};
use chrono::{DateTime, NaiveDate};

/// 通貨単位
pub const CURRENCY: &str = "AED";

/// 金額を桁区切り付きで表示（例: `12,500 AED`）
pub fn format_amount(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let whole = abs.trunc() as u64;
    let cents = ((abs - abs.trunc()) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    if cents == 0 {
        format!("{sign}{grouped} {CURRENCY}")
    } else {
        format!("{sign}{grouped}.{cents:02} {CURRENCY}")
    }
}

/// 日付を `dd Mon yyyy` で表示
///
/// - 空文字列は `-`
/// - RFC 3339 と `YYYY-MM-DD` を受け付け、解釈できなければそのまま返す
pub fn format_date(raw: &str) -> String {
    if raw.is_empty() {
        return "-".to_string();
    }
    match parse_date(raw) {
        Some(date) => date.format("%d %b %Y").to_string(),
        None => raw.to_string(),
    }
}

/// 日付文字列を解釈
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .or_else(|| raw.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
}

/// ステータス値のトーン
pub fn status_tone(status: &str) -> Tone {
    match status {
        "نشط" | "مكتمل" | "مكتملة" | "مدفوع" | "ساري" => Tone::Positive,
        "قيد التنفيذ" | "مجدولة" => Tone::Info,
        "معلق" => Tone::Warning,
        "منتهي" | "فاشل" | "متأخر" => Tone::Negative,
        _ => Tone::Plain,
    }
}

/// ステータス値をトーン付きセルにする
pub(crate) fn status_cell(value: &Value) -> Cell {
    let text = value.to_string();
    let tone = status_tone(&text);
    Cell::toned(text, tone)
}

/// 日付値を表示用セルにする
pub(crate) fn date_cell(value: &Value) -> Cell {
    Cell::plain(format_date(&value.to_string()))
}

/// 金額値を表示用セルにする
pub(crate) fn amount_cell(value: &Value) -> Cell {
    match value.as_number() {
        Some(n) => Cell::plain(format_amount(n)),
        None => Cell::plain(value.to_string()),
    }
}
