//! 作成・更新用のレコード下書き
//!
//! 入力 JSON を保存前に整える。新規作成では ID と作成日時を付与し、
//! どちらの場合も対象リソースの型として解釈できるかを検証する。

use super::{Client, Contract, ElevatorDetails, Invoice, Maintenance, Payment, Project, Resource, User};
use crate::error::{DeskError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// 新規レコードを整える
///
/// - `id` がない・空なら作成時刻（ミリ秒）を ID にする
/// - ユーザー以外は `createdAt` がなければ作成時刻を入れる
/// - 契約の `elevatorDetails` は VAT と総額を再計算する
pub fn prepare_new(resource: Resource, input: Value, now: DateTime<Utc>) -> Result<Value> {
    let mut record = into_object(input)?;

    let needs_id = match record.get("id") {
        None | Some(Value::Null) => true,
        Some(Value::String(id)) => id.trim().is_empty(),
        Some(_) => false,
    };
    if needs_id {
        record.insert("id".to_string(), now.timestamp_millis().to_string().into());
    }

    if resource == Resource::Users {
        let username = record.get("username").and_then(Value::as_str).unwrap_or("");
        if username.trim().is_empty() {
            return Err(DeskError::InvalidRecord(
                "a user needs a non-empty username".to_string(),
            ));
        }
    } else if !record.contains_key("createdAt") {
        record.insert(
            "createdAt".to_string(),
            now.to_rfc3339_opts(SecondsFormat::Millis, true).into(),
        );
    }

    if resource == Resource::Contracts {
        recalculate_elevator_details(&mut record)?;
    }

    let record = Value::Object(record);
    validate(resource, &record)?;
    Ok(record)
}

/// 部分更新を整える
///
/// `id` の変更は受け付けない。ユーザーの空パスワードは「変更なし」として取り除く。
pub fn prepare_patch(resource: Resource, id: &str, input: Value) -> Result<Value> {
    let mut patch = into_object(input)?;

    match patch.get("id") {
        None => {}
        Some(Value::String(given)) if given == id => {}
        Some(other) => {
            return Err(DeskError::InvalidRecord(format!(
                "id cannot be changed (got {other})"
            )));
        }
    }

    if resource == Resource::Users {
        let keep = match patch.get("password") {
            Some(Value::String(p)) => !p.is_empty(),
            Some(Value::Null) => false,
            _ => true,
        };
        if !keep {
            patch.remove("password");
        }
    }

    if resource == Resource::Contracts {
        recalculate_elevator_details(&mut patch)?;
    }

    if patch.is_empty() {
        return Err(DeskError::InvalidRecord("nothing to update".to_string()));
    }

    let patch = Value::Object(patch);
    validate(resource, &patch)?;
    Ok(patch)
}

fn into_object(input: Value) -> Result<Map<String, Value>> {
    match input {
        Value::Object(map) => Ok(map),
        other => Err(DeskError::InvalidRecord(format!(
            "expected a JSON object, got {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// `elevatorDetails` があれば単価と台数から VAT と総額を入れ直す
fn recalculate_elevator_details(record: &mut Map<String, Value>) -> Result<()> {
    let Some(raw) = record.get("elevatorDetails") else {
        return Ok(());
    };
    if raw.is_null() {
        return Ok(());
    }

    let mut details = ElevatorDetails::deserialize(raw)
        .map_err(|e| DeskError::InvalidRecord(format!("elevatorDetails: {e}")))?;
    details.recalculate();
    let value = serde_json::to_value(&details)?;
    record.insert("elevatorDetails".to_string(), value);
    Ok(())
}

/// リソースの型として解釈できるか検証
fn validate(resource: Resource, record: &Value) -> Result<()> {
    match resource {
        Resource::Clients => check::<Client>(resource, record),
        Resource::Projects => check::<Project>(resource, record),
        Resource::Contracts => check::<Contract>(resource, record),
        Resource::Payments => check::<Payment>(resource, record),
        Resource::Invoices => check::<Invoice>(resource, record),
        Resource::Maintenances => check::<Maintenance>(resource, record),
        Resource::Users => check::<User>(resource, record),
    }
}

fn check<R: DeserializeOwned>(resource: Resource, record: &Value) -> Result<()> {
    R::deserialize(record)
        .map(drop)
        .map_err(|e| DeskError::InvalidRecord(format!("not a valid {resource} record: {e}")))
}

#[cfg(test)]
#[path = "draft_test.rs"]
mod tests;
