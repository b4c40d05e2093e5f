//! 保守作業

use super::format::{date_cell, status_cell};
use super::{ColumnContext, Resource, ResourceRecord};
use crate::store::Database;
use crate::table::{Cell, Column, Record, Value};
use serde::{Deserialize, Serialize};

/// 保守作業（定期・緊急・予防）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Maintenance {
    pub id: String,
    pub client_id: String,
    pub elevator_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub date: String,
    pub technician: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
}

impl Record for Maintenance {
    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", Value::from(&self.id)),
            ("clientId", Value::from(&self.client_id)),
            ("elevatorId", Value::from(&self.elevator_id)),
            ("type", Value::from(&self.kind)),
            ("description", Value::from(&self.description)),
            ("date", Value::from(&self.date)),
            ("technician", Value::from(&self.technician)),
            ("status", Value::from(&self.status)),
            ("notes", Value::from(self.notes.as_deref())),
            ("createdAt", Value::from(&self.created_at)),
        ]
    }
}

impl ResourceRecord for Maintenance {
    const RESOURCE: Resource = Resource::Maintenances;

    fn id(&self) -> &str {
        &self.id
    }

    fn select(db: &Database) -> &[Self] {
        &db.maintenances
    }

    fn columns(ctx: &ColumnContext) -> Vec<Column<Self>> {
        let names = ctx.names.clone();
        vec![
            Column::new("date", "Date", |m: &Maintenance| Value::from(&m.date))
                .sortable()
                .with_renderer(|v, _| date_cell(v)),
            Column::new("clientId", "Client", |m: &Maintenance| Value::from(&m.client_id))
                .with_renderer(move |v, _| Cell::plain(names.client_name(&v.to_string()))),
            Column::new("elevatorId", "Elevator", |m: &Maintenance| {
                Value::from(&m.elevator_id)
            }),
            Column::new("type", "Type", |m: &Maintenance| Value::from(&m.kind)).sortable(),
            Column::new("technician", "Technician", |m: &Maintenance| {
                Value::from(&m.technician)
            })
            .sortable(),
            Column::new("status", "Status", |m: &Maintenance| Value::from(&m.status))
                .sortable()
                .with_renderer(|v, _| status_cell(v)),
            ctx.actions_column(),
        ]
    }
}
