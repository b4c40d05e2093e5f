//! ドメインモデル
//!
//! 各リソース（顧客・プロジェクト・契約・支払い・請求書・保守・ユーザー）の
//! レコード型と、画面ごとの列定義を提供する。

mod client;
mod contract;
pub mod draft;
mod format;
mod invoice;
mod maintenance;
mod payment;
mod project;
mod resource;
mod user;

pub use client::Client;
pub use contract::{Contract, ElevatorDetails, MaintenanceDetails};
pub use format::{format_amount, format_date, parse_date, status_tone};
pub use invoice::Invoice;
pub use maintenance::Maintenance;
pub use payment::Payment;
pub use project::Project;
pub use resource::Resource;
pub use user::User;

use crate::auth::Role;
use crate::store::Database;
use crate::table::{Cell, Column, Record, Tone};
use std::collections::HashMap;
use std::sync::Arc;

// ============================================================================
// ResourceRecord（リソースとテーブルの接続）
// ============================================================================

/// テーブル表示可能なリソースレコード
pub trait ResourceRecord: Record + Sized + 'static {
    /// 対応するリソース
    const RESOURCE: Resource;

    /// レコードID
    fn id(&self) -> &str;

    /// データベースから該当リソースの配列を取り出す
    fn select(db: &Database) -> &[Self];

    /// 画面の列定義
    fn columns(ctx: &ColumnContext) -> Vec<Column<Self>>;
}

// ============================================================================
// ColumnContext（列定義の作成に必要な情報）
// ============================================================================

/// 列定義の作成時に参照する情報
#[derive(Debug, Clone)]
pub struct ColumnContext {
    pub names: Arc<NameIndex>,
    pub role: Role,
}

impl ColumnContext {
    pub fn new(db: &Database, role: Role) -> Self {
        Self {
            names: Arc::new(NameIndex::build(db)),
            role,
        }
    }

    /// ロールに応じた操作列
    pub(crate) fn actions_column<R: ResourceRecord>(&self) -> Column<R> {
        let label = actions_label(self.role);
        Column::new("id", "Actions", |r: &R| r.id().into())
            .with_renderer(move |_, _| Cell::toned(label, Tone::Plain))
    }
}

/// ロールで許可された操作の表示
fn actions_label(role: Role) -> &'static str {
    match (role.can_edit(), role.can_delete()) {
        (true, true) => "edit · delete",
        (true, false) => "edit",
        _ => "-",
    }
}

// ============================================================================
// NameIndex（ID から表示名への参照）
// ============================================================================

/// 他リソースの ID を表示名に解決する索引
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    clients: HashMap<String, String>,
    projects: HashMap<String, String>,
    contracts: HashMap<String, String>,
}

impl NameIndex {
    pub fn build(db: &Database) -> Self {
        Self {
            clients: db
                .clients
                .iter()
                .map(|c| (c.id.clone(), c.name.clone()))
                .collect(),
            projects: db
                .projects
                .iter()
                .map(|p| (p.id.clone(), p.name.clone()))
                .collect(),
            contracts: db
                .contracts
                .iter()
                .map(|c| (c.id.clone(), c.contract_number.clone()))
                .collect(),
        }
    }

    /// 顧客名（見つからなければ "Unknown"）
    pub fn client_name(&self, id: &str) -> &str {
        self.clients.get(id).map(String::as_str).unwrap_or("Unknown")
    }

    /// プロジェクト名
    pub fn project_name(&self, id: &str) -> &str {
        self.projects.get(id).map(String::as_str).unwrap_or("Unknown")
    }

    /// 契約番号
    pub fn contract_number(&self, id: &str) -> &str {
        self.contracts.get(id).map(String::as_str).unwrap_or("Unknown")
    }
}

#[cfg(test)]
#[path = "domain_test.rs"]
mod tests;
