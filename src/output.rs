//! CLI 出力ヘルパー

use crate::domain::{format_amount, Contract, Invoice, Resource};
use crate::table::{Cell, Header, Tone};
use crate::vat::{VatBreakdown, VAT_RATE};
use comfy_table::{presets::UTF8_FULL, Color, Table};
use owo_colors::OwoColorize;
use serde::Deserialize;
use serde_json::Value;

/// 一覧の件数サマリ
pub struct ListSummary {
    pub prefix: String,
    pub message: String,
}

impl ListSummary {
    pub fn format(shown: usize, total: usize) -> Self {
        match (shown, total) {
            (_, 0) => Self {
                prefix: "•".yellow().to_string(),
                message: "No records".to_string(),
            },
            (0, _) => Self {
                prefix: "•".yellow().to_string(),
                message: "No records matched".to_string(),
            },
            (s, t) if s == t => Self {
                prefix: "✓".green().to_string(),
                message: format!("{} record(s)", s.green()),
            },
            (s, t) => Self {
                prefix: "✓".green().to_string(),
                message: format!("{} of {} record(s) matched", s.green(), t),
            },
        }
    }

    pub fn line(&self) -> String {
        format!("{} {}", self.prefix, self.message)
    }
}

/// ヘッダと描画済みセルから comfy-table を組み立てる
pub fn build_table(headers: &[Header], rows: &[Vec<Cell>]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(headers.iter().map(Header::label));

    for row in rows {
        table.add_row(row.iter().map(|cell| {
            let out = comfy_table::Cell::new(&cell.text);
            match tone_color(cell.tone) {
                Some(color) => out.fg(color),
                None => out,
            }
        }));
    }
    table
}

/// `resource/id` 形式のラベル
pub fn record_label(resource: Resource, record: &Value) -> String {
    let id = record.get("id").and_then(Value::as_str).unwrap_or("?");
    format!("{resource}/{id}")
}

/// VAT 内訳を表示
pub fn print_breakdown(breakdown: &VatBreakdown) {
    println!("{:<10} {}", "Subtotal", format_amount(breakdown.subtotal));
    println!(
        "{:<10} {}",
        format!("VAT {}%", VAT_RATE * 100.0),
        format_amount(breakdown.vat).yellow()
    );
    println!("{:<10} {}", "Total", format_amount(breakdown.total).green().bold());
}

/// 金額を持つレコードなら金額の内訳を表示
pub fn print_record_amounts(resource: Resource, record: &Value) {
    match resource {
        Resource::Invoices => {
            if let Ok(invoice) = Invoice::deserialize(record) {
                print_breakdown(&invoice.vat_breakdown());
            }
        }
        Resource::Contracts => {
            if let Some(value) = Contract::deserialize(record).ok().and_then(|c| c.value()) {
                println!("{:<10} {}", "Value", format_amount(value).green().bold());
            }
        }
        _ => {}
    }
}

fn tone_color(tone: Tone) -> Option<Color> {
    match tone {
        Tone::Plain => None,
        Tone::Positive => Some(Color::Green),
        Tone::Info => Some(Color::Blue),
        Tone::Warning => Some(Color::Yellow),
        Tone::Negative => Some(Color::Red),
    }
}
