//! 顧客

use super::format::status_cell;
use super::{ColumnContext, Resource, ResourceRecord};
use crate::store::Database;
use crate::table::{Cell, Column, Record, Tone, Value};
use serde::{Deserialize, Serialize};

/// 顧客
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Client {
    pub id: String,
    pub client_number: String,
    pub name: String,
    /// 個人（فرد）/ 法人（شركة）
    #[serde(rename = "type")]
    pub kind: String,
    pub phone: String,
    pub email: String,
    pub location: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub building_images: Vec<String>,
    pub contract_status: String,
    pub warranty_status: String,
    pub created_at: String,
}

impl Record for Client {
    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", Value::from(&self.id)),
            ("clientNumber", Value::from(&self.client_number)),
            ("name", Value::from(&self.name)),
            ("type", Value::from(&self.kind)),
            ("phone", Value::from(&self.phone)),
            ("email", Value::from(&self.email)),
            ("location", Value::from(&self.location)),
            ("buildingImages", Value::from(self.building_images.join(","))),
            ("contractStatus", Value::from(&self.contract_status)),
            ("warrantyStatus", Value::from(&self.warranty_status)),
            ("createdAt", Value::from(&self.created_at)),
        ]
    }
}

impl ResourceRecord for Client {
    const RESOURCE: Resource = Resource::Clients;

    fn id(&self) -> &str {
        &self.id
    }

    fn select(db: &Database) -> &[Self] {
        &db.clients
    }

    fn columns(ctx: &ColumnContext) -> Vec<Column<Self>> {
        vec![
            Column::new("clientNumber", "Client No.", |c: &Client| {
                Value::from(&c.client_number)
            })
            .sortable(),
            Column::new("name", "Name", |c: &Client| Value::from(&c.name)).sortable(),
            Column::new("type", "Type", |c: &Client| Value::from(&c.kind))
                .sortable()
                .with_renderer(|v, _| Cell::toned(v.to_string(), Tone::Info)),
            Column::new("phone", "Phone", |c: &Client| Value::from(&c.phone)),
            Column::new("email", "Email", |c: &Client| Value::from(&c.email)),
            Column::new("contractStatus", "Contract", |c: &Client| {
                Value::from(&c.contract_status)
            })
            .sortable()
            .with_renderer(|v, _| status_cell(v)),
            Column::new("warrantyStatus", "Warranty", |c: &Client| {
                Value::from(&c.warranty_status)
            })
            .sortable()
            .with_renderer(|v, _| status_cell(v)),
            ctx.actions_column(),
        ]
    }
}

