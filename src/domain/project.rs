//! プロジェクト

use super::format::{date_cell, status_cell};
use super::{ColumnContext, Resource, ResourceRecord};
use crate::store::Database;
use crate::table::{Cell, Column, Record, Value};
use serde::{Deserialize, Serialize};

/// プロジェクト（設置・保守・修理）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub client_id: String,
    pub status: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub created_at: String,
}

impl Record for Project {
    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", Value::from(&self.id)),
            ("name", Value::from(&self.name)),
            ("type", Value::from(&self.kind)),
            ("clientId", Value::from(&self.client_id)),
            ("status", Value::from(&self.status)),
            ("startDate", Value::from(&self.start_date)),
            ("endDate", Value::from(&self.end_date)),
            ("description", Value::from(&self.description)),
            ("createdAt", Value::from(&self.created_at)),
        ]
    }
}

impl ResourceRecord for Project {
    const RESOURCE: Resource = Resource::Projects;

    fn id(&self) -> &str {
        &self.id
    }

    fn select(db: &Database) -> &[Self] {
        &db.projects
    }

    fn columns(ctx: &ColumnContext) -> Vec<Column<Self>> {
        let names = ctx.names.clone();
        vec![
            Column::new("name", "Project", |p: &Project| Value::from(&p.name)).sortable(),
            Column::new("type", "Type", |p: &Project| Value::from(&p.kind)).sortable(),
            Column::new("clientId", "Client", |p: &Project| Value::from(&p.client_id))
                .with_renderer(move |v, _| Cell::plain(names.client_name(&v.to_string()))),
            Column::new("status", "Status", |p: &Project| Value::from(&p.status))
                .sortable()
                .with_renderer(|v, _| status_cell(v)),
            Column::new("startDate", "Start", |p: &Project| Value::from(&p.start_date))
                .sortable()
                .with_renderer(|v, _| date_cell(v)),
            Column::new("endDate", "End", |p: &Project| Value::from(&p.end_date))
                .sortable()
                .with_renderer(|v, _| date_cell(v)),
            ctx.actions_column(),
        ]
    }
}
