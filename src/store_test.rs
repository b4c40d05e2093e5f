use super::*;
use crate::error::DeskError;
use std::io::Write;
use tempfile::NamedTempFile;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const FIXTURE: &str = include_str!("../tests/fixtures/db.json");

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// ============================================================================
// ファイル読み込み
// ============================================================================

#[test]
fn test_from_json_reads_all_resources() {
    let db = Database::from_json(FIXTURE).unwrap();
    assert_eq!(db.count(Resource::Clients), 3);
    assert_eq!(db.count(Resource::Projects), 2);
    assert_eq!(db.count(Resource::Contracts), 2);
    assert_eq!(db.count(Resource::Payments), 3);
    assert_eq!(db.count(Resource::Invoices), 2);
    assert_eq!(db.count(Resource::Maintenances), 1);
    assert_eq!(db.count(Resource::Users), 3);
}

#[test]
fn test_contract_details_are_optional() {
    let db = Database::from_json(FIXTURE).unwrap();
    assert!(db.contracts[0].elevator_details.is_some());
    assert!(db.contracts[0].maintenance_details.is_none());
    assert!(db.contracts[1].maintenance_details.is_some());
}

#[test]
fn test_missing_resources_are_empty() {
    let db = Database::from_json(r#"{ "clients": [] }"#).unwrap();
    assert!(db.users.is_empty());
    assert!(db.invoices.is_empty());
}


#[tokio::test]
async fn test_load_from_file() {
    let file = write_temp(FIXTURE);
    let source = DataSource::File(file.path().to_path_buf());
    let db = load(&source, &HttpConfig::default()).await.unwrap();
    assert_eq!(db.clients.len(), 3);
}

#[tokio::test]
async fn test_load_missing_file_is_io_error() {
    let source = DataSource::File("/nonexistent/elevdesk/db.json".into());
    let result = load(&source, &HttpConfig::default()).await;
    assert!(matches!(result, Err(DeskError::Io(_))));
}

#[tokio::test]
async fn test_load_invalid_json_is_json_error() {
    let file = write_temp("{ not json");
    let source = DataSource::File(file.path().to_path_buf());
    let result = load(&source, &HttpConfig::default()).await;
    assert!(matches!(result, Err(DeskError::Json(_))));
}

// ============================================================================
// HTTP 読み込み
// ============================================================================

/// `db` の各配列を `GET /{resource}` で返す簡易サーバー
async fn serve(db: serde_json::Value) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let db = db.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]);
                let path = request.split_whitespace().nth(1).unwrap_or("/");
                let resource = path.trim_start_matches('/');

                let (status, body) = match db.get(resource) {
                    Some(value) => ("200 OK", value.to_string()),
                    None => ("404 Not Found", r#"{"error":"Not Found"}"#.to_string()),
                };
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
            });
        }
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn test_load_from_http() {
    let db: serde_json::Value = serde_json::from_str(FIXTURE).unwrap();
    let base = serve(db).await;

    let loaded = load(&DataSource::Http(base), &HttpConfig::default())
        .await
        .unwrap();
    assert_eq!(loaded.clients.len(), 3);
    assert_eq!(loaded.users.len(), 3);
}

#[tokio::test]
async fn test_http_missing_resource_is_not_found() {
    let mut db: serde_json::Value = serde_json::from_str(FIXTURE).unwrap();
    db.as_object_mut().unwrap().remove("maintenances");
    let base = serve(db).await;

    let result = load(&DataSource::Http(base), &HttpConfig::default()).await;
    assert!(matches!(
        result,
        Err(DeskError::ResourceNotFound(ref r)) if r == "maintenances"
    ));
}

// ============================================================================
// HTTP 書き込み
// ============================================================================

/// 受信したリクエスト（メソッド・パス・本文）
#[derive(Debug, Clone, PartialEq)]
struct Received {
    method: String,
    path: String,
    body: String,
}

/// ヘッダ終端と Content-Length 分の本文まで読み込む
async fn read_request(socket: &mut tokio::net::TcpStream) -> Received {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let length = text[..end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }

    let text = String::from_utf8_lossy(&buf).to_string();
    let (head, body) = text.split_once("\r\n\r\n").unwrap_or((text.as_str(), ""));
    let mut request_line = head.lines().next().unwrap_or("").split_whitespace();
    Received {
        method: request_line.next().unwrap_or("").to_string(),
        path: request_line.next().unwrap_or("").to_string(),
        body: body.to_string(),
    }
}

/// 固定のステータスと本文を返し、受信したリクエストを記録するサーバー
async fn serve_recording(
    status: &'static str,
    body: &'static str,
) -> (String, std::sync::Arc<std::sync::Mutex<Vec<Received>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let received = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let log = received.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let log = log.clone();
            tokio::spawn(async move {
                let request = read_request(&mut socket).await;
                log.lock().unwrap().push(request);
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
            });
        }
    });

    (format!("http://{addr}"), received)
}

#[tokio::test]
async fn test_http_create_posts_record() {
    let (base, received) = serve_recording("201 Created", r#"{"id":"c9","name":"Gulf Tower"}"#).await;
    let record = serde_json::json!({ "id": "c9", "name": "Gulf Tower" });

    let created = create(
        &DataSource::Http(base),
        &HttpConfig::default(),
        Resource::Clients,
        record.clone(),
    )
    .await
    .unwrap();
    assert_eq!(created["id"], "c9");

    let requests = received.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/clients");
    let sent: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(sent, record);
}

#[tokio::test]
async fn test_http_update_patches_record_path() {
    let (base, received) = serve_recording("200 OK", "").await;
    let patch = serde_json::json!({ "status": "مدفوع" });

    let updated = update(
        &DataSource::Http(base),
        &HttpConfig::default(),
        Resource::Invoices,
        "i 2",
        patch.clone(),
    )
    .await
    .unwrap();
    // 本文が空なら送った内容を返す
    assert_eq!(updated, patch);

    let requests = received.lock().unwrap().clone();
    assert_eq!(requests[0].method, "PATCH");
    assert_eq!(requests[0].path, "/invoices/i%202");
    let sent: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(sent, patch);
}

#[tokio::test]
async fn test_http_delete_sends_delete() {
    let (base, received) = serve_recording("200 OK", "{}").await;
    delete(
        &DataSource::Http(base),
        &HttpConfig::default(),
        Resource::Payments,
        "pay2",
    )
    .await
    .unwrap();

    let requests = received.lock().unwrap().clone();
    assert_eq!(requests[0].method, "DELETE");
    assert_eq!(requests[0].path, "/payments/pay2");
}

#[tokio::test]
async fn test_http_write_status_mapping() {
    let (base, _) = serve_recording("404 Not Found", r#"{"error":"Not Found"}"#).await;
    let result = delete(&DataSource::Http(base), &HttpConfig::default(), Resource::Clients, "c9").await;
    assert!(matches!(
        result,
        Err(DeskError::ResourceNotFound(ref r)) if r == "clients/c9"
    ));

    let (base, received) = serve_recording("500 Internal Server Error", "boom").await;
    let result = create(
        &DataSource::Http(base),
        &HttpConfig::default(),
        Resource::Clients,
        serde_json::json!({ "id": "c9" }),
    )
    .await;
    assert!(matches!(result, Err(DeskError::Api { status: 500, .. })));
    // 書き込みは再試行しない
    assert_eq!(received.lock().unwrap().len(), 1);
}

// ============================================================================
// ファイル書き込み
// ============================================================================

#[tokio::test]
async fn test_file_create_update_delete() {
    let file = write_temp(FIXTURE);
    let source = DataSource::File(file.path().to_path_buf());
    let http = HttpConfig::default();

    create(
        &source,
        &http,
        Resource::Maintenances,
        serde_json::json!({ "id": "m2", "clientId": "c1", "status": "مجدولة" }),
    )
    .await
    .unwrap();

    let updated = update(
        &source,
        &http,
        Resource::Maintenances,
        "m2",
        serde_json::json!({ "status": "مكتملة" }),
    )
    .await
    .unwrap();
    assert_eq!(updated["clientId"], "c1");
    assert_eq!(updated["status"], "مكتملة");

    let db = load(&source, &http).await.unwrap();
    assert_eq!(db.maintenances.len(), 2);
    assert_eq!(db.maintenances[1].status, "مكتملة");

    delete(&source, &http, Resource::Maintenances, "m1").await.unwrap();
    let db = load(&source, &http).await.unwrap();
    assert_eq!(db.maintenances.len(), 1);
    assert_eq!(db.maintenances[0].id, "m2");
    // 他のリソースはそのまま
    assert_eq!(db.count(Resource::Clients), 3);
}

#[tokio::test]
async fn test_file_create_duplicate_id_is_rejected() {
    let file = write_temp(FIXTURE);
    let source = DataSource::File(file.path().to_path_buf());
    let result = create(
        &source,
        &HttpConfig::default(),
        Resource::Clients,
        serde_json::json!({ "id": "c1", "name": "dup" }),
    )
    .await;
    assert!(matches!(result, Err(DeskError::InvalidRecord(_))));
}

#[tokio::test]
async fn test_file_missing_record_is_not_found() {
    let file = write_temp(FIXTURE);
    let source = DataSource::File(file.path().to_path_buf());
    let http = HttpConfig::default();

    let result = update(&source, &http, Resource::Clients, "c404", serde_json::json!({ "name": "x" })).await;
    assert!(matches!(
        result,
        Err(DeskError::ResourceNotFound(ref r)) if r == "clients/c404"
    ));
    let result = delete(&source, &http, Resource::Clients, "c404").await;
    assert!(matches!(result, Err(DeskError::ResourceNotFound(_))));
}

#[tokio::test]
async fn test_load_users_from_file() {
    let file = write_temp(FIXTURE);
    let users = load_users(&DataSource::File(file.path().to_path_buf()), &HttpConfig::default())
        .await
        .unwrap();
    assert_eq!(users.len(), 3);
    assert_eq!(users[0].username, "admin");
}
