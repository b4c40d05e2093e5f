//! REST バックエンドからの取得

use super::Database;
use crate::domain::Resource;
use crate::error::{DeskError, Result};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// 1 リソースあたりの最大試行回数
const MAX_ATTEMPTS: u32 = 3;
/// 再試行までの待ち時間
const RETRY_DELAY: Duration = Duration::from_millis(300);

/// HTTP設定
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// タイムアウト
    pub timeout: Option<Duration>,
    /// User-Agent
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            user_agent: "elevdesk".to_string(),
        }
    }
}

impl HttpConfig {
    /// reqwest::Client を構築
    pub fn build_client(&self) -> Result<Client> {
        let mut builder = Client::builder().user_agent(&self.user_agent);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(builder.build()?)
    }
}

/// 全リソースを並行に取得
pub(super) async fn load_all(client: &Client, base: &str) -> Result<Database> {
    let (clients, projects, contracts, payments, invoices, maintenances, users) = tokio::try_join!(
        fetch(client, base, Resource::Clients),
        fetch(client, base, Resource::Projects),
        fetch(client, base, Resource::Contracts),
        fetch(client, base, Resource::Payments),
        fetch(client, base, Resource::Invoices),
        fetch(client, base, Resource::Maintenances),
        fetch(client, base, Resource::Users),
    )?;

    Ok(Database {
        clients,
        projects,
        contracts,
        payments,
        invoices,
        maintenances,
        users,
    })
}

/// `GET {base}/{resource}` でリソース配列を取得
///
/// タイムアウト・接続失敗・5xx の場合は間隔を空けて再試行する。
pub(super) async fn fetch<T: DeserializeOwned>(
    client: &Client,
    base: &str,
    resource: Resource,
) -> Result<Vec<T>> {
    let mut attempt = 1;
    loop {
        match fetch_once(client, base, resource).await {
            Err(e) if e.is_retryable() && attempt < MAX_ATTEMPTS => {
                log::warn!("fetching {resource} failed (attempt {attempt}): {e}");
                tokio::time::sleep(RETRY_DELAY).await;
                attempt += 1;
            }
            result => return result,
        }
    }
}

async fn fetch_once<T: DeserializeOwned>(
    client: &Client,
    base: &str,
    resource: Resource,
) -> Result<Vec<T>> {
    let url = collection_url(base, resource);
    log::debug!("GET {url}");

    let response = client.get(&url).send().await?;
    let response = check_status(response, || resource.as_str().to_string()).await?;
    Ok(response.json().await?)
}

// ============================================================================
// 書き込み
// ============================================================================
//
// 書き込みは冪等とは限らないため再試行しない。

/// `POST {base}/{resource}` でレコードを作成
///
/// レスポンス本文が空なら送ったレコードをそのまま返す。
pub(super) async fn create(
    client: &Client,
    base: &str,
    resource: Resource,
    record: &Value,
) -> Result<Value> {
    let url = collection_url(base, resource);
    log::debug!("POST {url}");

    let response = client.post(&url).json(record).send().await?;
    let response = check_status(response, || resource.as_str().to_string()).await?;
    body_or(response, record).await
}

/// `PATCH {base}/{resource}/{id}` でレコードを部分更新
pub(super) async fn update(
    client: &Client,
    base: &str,
    resource: Resource,
    id: &str,
    patch: &Value,
) -> Result<Value> {
    let url = record_url(base, resource, id)?;
    log::debug!("PATCH {url}");

    let response = client.patch(url).json(patch).send().await?;
    let response = check_status(response, || format!("{resource}/{id}")).await?;
    body_or(response, patch).await
}

/// `DELETE {base}/{resource}/{id}` でレコードを削除
pub(super) async fn delete(client: &Client, base: &str, resource: Resource, id: &str) -> Result<()> {
    let url = record_url(base, resource, id)?;
    log::debug!("DELETE {url}");

    let response = client.delete(url).send().await?;
    check_status(response, || format!("{resource}/{id}")).await?;
    Ok(())
}

// ============================================================================
// 共通
// ============================================================================

fn collection_url(base: &str, resource: Resource) -> String {
    format!("{}/{}", base.trim_end_matches('/'), resource.as_str())
}

/// ID をパスセグメントとしてエスケープした URL
fn record_url(base: &str, resource: Resource, id: &str) -> Result<Url> {
    let invalid = || DeskError::InvalidSource(base.to_string());
    let mut url = Url::parse(&collection_url(base, resource)).map_err(|_| invalid())?;
    url.path_segments_mut().map_err(|_| invalid())?.push(id);
    Ok(url)
}

/// ステータスをエラーに変換（404 は `not_found` の名前で ResourceNotFound）
async fn check_status(response: Response, not_found: impl FnOnce() -> String) -> Result<Response> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(DeskError::ResourceNotFound(not_found()));
    }
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(DeskError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response)
}

async fn body_or(response: Response, sent: &Value) -> Result<Value> {
    let body = response.text().await?;
    if body.trim().is_empty() {
        return Ok(sent.clone());
    }
    Ok(serde_json::from_str(&body)?)
}
