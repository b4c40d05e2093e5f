//! `db.json` ファイルへの書き込み
//!
//! ファイル全体を読み込み、対象リソースの配列を書き換えてから書き戻す。

use crate::domain::Resource;
use crate::error::{DeskError, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// レコードを追加
pub(super) async fn create(path: &Path, resource: Resource, record: Value) -> Result<Value> {
    let mut doc = read(path).await?;
    let records = collection(&mut doc, resource)?;

    let id = record_id(&record)
        .ok_or_else(|| DeskError::InvalidRecord("record has no id".to_string()))?
        .to_string();
    if records.iter().any(|r| record_id(r) == Some(id.as_str())) {
        return Err(DeskError::InvalidRecord(format!(
            "{resource}/{id} already exists"
        )));
    }

    records.push(record.clone());
    write(path, &doc).await?;
    Ok(record)
}

/// レコードを部分更新（トップレベルのフィールドを上書き）
pub(super) async fn update(path: &Path, resource: Resource, id: &str, patch: Value) -> Result<Value> {
    let mut doc = read(path).await?;
    let records = collection(&mut doc, resource)?;

    let Value::Object(fields) = patch else {
        return Err(DeskError::InvalidRecord("patch must be a JSON object".to_string()));
    };
    let target = records
        .iter_mut()
        .find(|r| record_id(r) == Some(id))
        .ok_or_else(|| not_found(resource, id))?;
    let Value::Object(existing) = &mut *target else {
        return Err(DeskError::InvalidRecord(format!(
            "{resource}/{id} is not a JSON object"
        )));
    };
    existing.extend(fields);
    let updated = target.clone();

    write(path, &doc).await?;
    Ok(updated)
}

/// レコードを削除
pub(super) async fn delete(path: &Path, resource: Resource, id: &str) -> Result<()> {
    let mut doc = read(path).await?;
    let records = collection(&mut doc, resource)?;

    let index = records
        .iter()
        .position(|r| record_id(r) == Some(id))
        .ok_or_else(|| not_found(resource, id))?;
    records.remove(index);

    write(path, &doc).await
}

fn not_found(resource: Resource, id: &str) -> DeskError {
    DeskError::ResourceNotFound(format!("{resource}/{id}"))
}

fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

async fn read(path: &Path) -> Result<Map<String, Value>> {
    let content = tokio::fs::read_to_string(path).await?;
    match serde_json::from_str::<Value>(&content)? {
        Value::Object(doc) => Ok(doc),
        _ => Err(DeskError::InvalidSource(format!(
            "{} is not a JSON object",
            path.display()
        ))),
    }
}

/// リソースの配列（なければ空配列を作る）
fn collection(doc: &mut Map<String, Value>, resource: Resource) -> Result<&mut Vec<Value>> {
    let entry = doc
        .entry(resource.as_str())
        .or_insert_with(|| Value::Array(Vec::new()));
    match entry {
        Value::Array(records) => Ok(records),
        _ => Err(DeskError::InvalidSource(format!(
            "`{resource}` is not an array"
        ))),
    }
}

async fn write(path: &Path, doc: &Map<String, Value>) -> Result<()> {
    let mut content = serde_json::to_string_pretty(doc)?;
    content.push('\n');
    tokio::fs::write(path, content).await?;
    log::debug!("wrote {}", path.display());
    Ok(())
}
