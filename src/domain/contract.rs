//! 契約

use super::format::{date_cell, status_cell};
use super::{ColumnContext, Resource, ResourceRecord};
use crate::store::Database;
use crate::table::{Cell, Column, Record, Tone, Value};
use crate::vat::VatBreakdown;
use serde::{Deserialize, Serialize};

/// 設置契約の昇降機明細
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElevatorDetails {
    pub elevator_count: u32,
    /// 積載量（例: "450 كجم"）
    pub capacity: String,
    pub stops: u32,
    /// 速度（例: "1m/s"）
    pub speed: String,
    pub price_per_elevator: f64,
    pub vat: f64,
    pub total_price: f64,
    pub warranty_period: String,
}

impl ElevatorDetails {
    /// 単価と台数から VAT と総額を再計算
    pub fn recalculate(&mut self) {
        let breakdown = VatBreakdown::for_units(self.price_per_elevator, self.elevator_count);
        self.vat = breakdown.vat;
        self.total_price = breakdown.total;
    }
}

/// 保守契約の明細
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaintenanceDetails {
    pub elevator_count: u32,
    pub service_location: String,
    pub visit_count: u32,
    pub contract_value: f64,
    pub start_date_hijri: String,
    pub end_date_hijri: String,
    pub first_party_representative: String,
    pub second_party_representative: String,
}

/// 契約（設置・保守・修理）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contract {
    pub id: String,
    pub contract_number: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub project_id: String,
    pub client_id: String,
    pub contract_date: String,

    pub client_name: String,
    pub client_id_number: String,
    pub client_phone: String,
    pub project_name: String,
    pub project_duration: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevator_details: Option<ElevatorDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_details: Option<MaintenanceDetails>,

    pub buyer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_signature: Option<String>,
    pub signature_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_stamp: Option<String>,

    pub status: String,
    pub created_at: String,
}

impl Contract {
    /// 契約金額（設置は VAT 込み総額、保守は契約額）
    pub fn value(&self) -> Option<f64> {
        self.elevator_details
            .as_ref()
            .map(|d| d.total_price)
            .or_else(|| self.maintenance_details.as_ref().map(|d| d.contract_value))
    }
}

impl Record for Contract {
    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", Value::from(&self.id)),
            ("contractNumber", Value::from(&self.contract_number)),
            ("type", Value::from(&self.kind)),
            ("projectId", Value::from(&self.project_id)),
            ("clientId", Value::from(&self.client_id)),
            ("contractDate", Value::from(&self.contract_date)),
            ("clientName", Value::from(&self.client_name)),
            ("clientIdNumber", Value::from(&self.client_id_number)),
            ("clientPhone", Value::from(&self.client_phone)),
            ("projectName", Value::from(&self.project_name)),
            ("projectDuration", Value::from(&self.project_duration)),
            ("value", Value::from(self.value())),
            ("buyerName", Value::from(&self.buyer_name)),
            ("signatureDate", Value::from(&self.signature_date)),
            ("status", Value::from(&self.status)),
            ("createdAt", Value::from(&self.created_at)),
        ]
    }
}

impl ResourceRecord for Contract {
    const RESOURCE: Resource = Resource::Contracts;

    fn id(&self) -> &str {
        &self.id
    }

    fn select(db: &Database) -> &[Self] {
        &db.contracts
    }

    fn columns(ctx: &ColumnContext) -> Vec<Column<Self>> {
        let names = ctx.names.clone();
        vec![
            Column::new("contractNumber", "Contract No.", |c: &Contract| {
                Value::from(&c.contract_number)
            })
            .sortable(),
            Column::new("type", "Type", |c: &Contract| Value::from(&c.kind))
                .sortable()
                .with_renderer(|v, _| Cell::toned(v.to_string(), Tone::Info)),
            Column::new("clientId", "Client", |c: &Contract| Value::from(&c.client_id))
                .with_renderer(move |v, _| Cell::plain(names.client_name(&v.to_string()))),
            Column::new("contractDate", "Date", |c: &Contract| {
                Value::from(&c.contract_date)
            })
            .sortable()
            .with_renderer(|v, _| date_cell(v)),
            Column::new("status", "Status", |c: &Contract| Value::from(&c.status))
                .sortable()
                .with_renderer(|v, _| status_cell(v)),
            Column::new("createdAt", "Created", |c: &Contract| Value::from(&c.created_at))
                .sortable()
                .with_renderer(|v, _| date_cell(v)),
            ctx.actions_column(),
        ]
    }
}
