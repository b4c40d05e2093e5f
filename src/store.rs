//! リソースストア
//!
//! 全リソースの配列を一度に読み込んでメモリに保持する。
//! 読み込み元は JSON ファイル（`db.json`）または REST のベース URL。
//!
//! - `source`: 読み込み元の指定
//! - `http`: REST バックエンドとの読み書き
//! - `file`: `db.json` への書き込み

mod file;
mod http;
mod source;

pub use http::HttpConfig;
pub use source::DataSource;

use crate::domain::{
    Client, Contract, Invoice, Maintenance, Payment, Project, Resource, User,
};
use crate::error::{DeskError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// 読み込み済みの全リソース
///
/// ファイルに存在しないリソースは空配列として扱う。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Database {
    pub clients: Vec<Client>,
    pub projects: Vec<Project>,
    pub contracts: Vec<Contract>,
    pub payments: Vec<Payment>,
    pub invoices: Vec<Invoice>,
    pub maintenances: Vec<Maintenance>,
    pub users: Vec<User>,
}

impl Database {
    /// JSON 文字列から読み込む
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// リソースの件数
    pub fn count(&self, resource: Resource) -> usize {
        match resource {
            Resource::Clients => self.clients.len(),
            Resource::Projects => self.projects.len(),
            Resource::Contracts => self.contracts.len(),
            Resource::Payments => self.payments.len(),
            Resource::Invoices => self.invoices.len(),
            Resource::Maintenances => self.maintenances.len(),
            Resource::Users => self.users.len(),
        }
    }
}

/// 読み込み元から全リソースを読み込む
pub async fn load(source: &DataSource, http: &HttpConfig) -> Result<Database> {
    log::debug!("loading data from {source}");
    let db = match source {
        DataSource::File(path) => load_file(path).await?,
        DataSource::Http(base) => http::load_all(&http.build_client()?, base).await?,
    };
    let counts: Vec<String> = Resource::all()
        .iter()
        .map(|&r| format!("{} {r}", db.count(r)))
        .collect();
    log::info!("loaded {}", counts.join(", "));
    Ok(db)
}

/// 認証に必要なユーザー一覧だけを読み込む
pub async fn load_users(source: &DataSource, http: &HttpConfig) -> Result<Vec<User>> {
    match source {
        DataSource::File(path) => Ok(load_file(path).await?.users),
        DataSource::Http(base) => http::fetch(&http.build_client()?, base, Resource::Users).await,
    }
}

// ============================================================================
// 書き込み
// ============================================================================

/// レコードを作成し、保存されたレコードを返す
pub async fn create(
    source: &DataSource,
    http: &HttpConfig,
    resource: Resource,
    record: Value,
) -> Result<Value> {
    let created = match source {
        DataSource::File(path) => file::create(path, resource, record).await?,
        DataSource::Http(base) => {
            http::create(&http.build_client()?, base, resource, &record).await?
        }
    };
    log::info!("created {resource}/{}", record_id(&created));
    Ok(created)
}

/// レコードを部分更新し、更新後のレコードを返す
pub async fn update(
    source: &DataSource,
    http: &HttpConfig,
    resource: Resource,
    id: &str,
    patch: Value,
) -> Result<Value> {
    let updated = match source {
        DataSource::File(path) => file::update(path, resource, id, patch).await?,
        DataSource::Http(base) => {
            http::update(&http.build_client()?, base, resource, id, &patch).await?
        }
    };
    log::info!("updated {resource}/{id}");
    Ok(updated)
}

/// レコードを削除
pub async fn delete(source: &DataSource, http: &HttpConfig, resource: Resource, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(DeskError::InvalidRecord("empty id".to_string()));
    }
    match source {
        DataSource::File(path) => file::delete(path, resource, id).await?,
        DataSource::Http(base) => http::delete(&http.build_client()?, base, resource, id).await?,
    }
    log::info!("deleted {resource}/{id}");
    Ok(())
}

fn record_id(record: &Value) -> &str {
    record.get("id").and_then(Value::as_str).unwrap_or("?")
}

async fn load_file(path: &Path) -> Result<Database> {
    let content = tokio::fs::read_to_string(path).await?;
    Database::from_json(&content)
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
