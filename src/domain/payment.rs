//! 支払い

use super::format::{amount_cell, date_cell, status_cell};
use super::{ColumnContext, Resource, ResourceRecord};
use crate::store::Database;
use crate::table::{Cell, Column, Record, Value};
use serde::{Deserialize, Serialize};

/// 契約に対する支払い
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Payment {
    pub id: String,
    pub contract_id: String,
    /// 振込（تحويل）/ 小切手（شيك）/ 現金（نقد）
    pub method: String,
    pub amount: f64,
    pub date: String,
    pub notes: String,
    pub status: String,
    pub created_at: String,
}

impl Record for Payment {
    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", Value::from(&self.id)),
            ("contractId", Value::from(&self.contract_id)),
            ("method", Value::from(&self.method)),
            ("amount", Value::from(self.amount)),
            ("date", Value::from(&self.date)),
            ("notes", Value::from(&self.notes)),
            ("status", Value::from(&self.status)),
            ("createdAt", Value::from(&self.created_at)),
        ]
    }
}

impl ResourceRecord for Payment {
    const RESOURCE: Resource = Resource::Payments;

    fn id(&self) -> &str {
        &self.id
    }

    fn select(db: &Database) -> &[Self] {
        &db.payments
    }

    fn columns(ctx: &ColumnContext) -> Vec<Column<Self>> {
        let names = ctx.names.clone();
        vec![
            Column::new("contractId", "Contract", |p: &Payment| {
                Value::from(&p.contract_id)
            })
            .with_renderer(move |v, _| Cell::plain(names.contract_number(&v.to_string()))),
            Column::new("method", "Method", |p: &Payment| Value::from(&p.method)).sortable(),
            Column::new("amount", "Amount", |p: &Payment| Value::from(p.amount))
                .sortable()
                .with_renderer(|v, _| amount_cell(v)),
            Column::new("date", "Date", |p: &Payment| Value::from(&p.date))
                .sortable()
                .with_renderer(|v, _| date_cell(v)),
            Column::new("status", "Status", |p: &Payment| Value::from(&p.status))
                .sortable()
                .with_renderer(|v, _| status_cell(v)),
            Column::new("notes", "Notes", |p: &Payment| Value::from(&p.notes))
                .with_renderer(|v, _| match v.to_string() {
                    s if s.is_empty() => Cell::plain("-"),
                    s => Cell::plain(s),
                }),
            ctx.actions_column(),
        ]
    }
}
