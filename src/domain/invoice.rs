//! 請求書

use super::format::{amount_cell, date_cell, status_cell};
use super::{ColumnContext, Resource, ResourceRecord};
use crate::store::Database;
use crate::table::{Cell, Column, Record, Value};
use crate::vat::VatBreakdown;
use serde::{Deserialize, Serialize};

/// 請求書
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Invoice {
    pub id: String,
    pub invoice_number: String,
    pub client_id: String,
    pub service_description: String,
    pub amount: f64,
    pub payment_method: String,
    pub date: String,
    pub status: String,
    pub created_at: String,
}

impl Invoice {
    /// 請求額（税抜）に対する VAT 内訳
    pub fn vat_breakdown(&self) -> VatBreakdown {
        VatBreakdown::from_amount(self.amount)
    }
}

impl Record for Invoice {
    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", Value::from(&self.id)),
            ("invoiceNumber", Value::from(&self.invoice_number)),
            ("clientId", Value::from(&self.client_id)),
            ("serviceDescription", Value::from(&self.service_description)),
            ("amount", Value::from(self.amount)),
            ("paymentMethod", Value::from(&self.payment_method)),
            ("date", Value::from(&self.date)),
            ("status", Value::from(&self.status)),
            ("createdAt", Value::from(&self.created_at)),
        ]
    }
}

impl ResourceRecord for Invoice {
    const RESOURCE: Resource = Resource::Invoices;

    fn id(&self) -> &str {
        &self.id
    }

    fn select(db: &Database) -> &[Self] {
        &db.invoices
    }

    fn columns(ctx: &ColumnContext) -> Vec<Column<Self>> {
        let names = ctx.names.clone();
        vec![
            Column::new("invoiceNumber", "Invoice No.", |i: &Invoice| {
                Value::from(&i.invoice_number)
            })
            .sortable(),
            Column::new("clientId", "Client", |i: &Invoice| Value::from(&i.client_id))
                .with_renderer(move |v, _| Cell::plain(names.client_name(&v.to_string()))),
            Column::new("serviceDescription", "Service", |i: &Invoice| {
                Value::from(&i.service_description)
            }),
            Column::new("amount", "Amount", |i: &Invoice| Value::from(i.amount))
                .sortable()
                .with_renderer(|v, _| amount_cell(v)),
            Column::new("paymentMethod", "Method", |i: &Invoice| {
                Value::from(&i.payment_method)
            })
            .sortable(),
            Column::new("date", "Date", |i: &Invoice| Value::from(&i.date))
                .sortable()
                .with_renderer(|v, _| date_cell(v)),
            Column::new("status", "Status", |i: &Invoice| Value::from(&i.status))
                .sortable()
                .with_renderer(|v, _| status_cell(v)),
            ctx.actions_column(),
        ]
    }
}
