//! 作成・更新コマンドのレコード入力

use clap::Args;
use serde_json::Value;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

/// `--data` または `--file` で渡すレコード（JSON オブジェクト）
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct RecordInput {
    /// Record fields as a JSON object, e.g. '{"name":"Gulf Tower"}'
    #[arg(long)]
    pub data: Option<String>,

    /// Read the JSON object from a file ("-" reads stdin)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl RecordInput {
    /// 入力を読み込んで JSON として解釈
    pub async fn read(&self) -> Result<Value, String> {
        let (origin, content) = match (&self.data, &self.file) {
            (Some(data), _) => ("--data".to_string(), data.clone()),
            (None, Some(path)) if path.as_os_str() == "-" => {
                let mut content = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut content)
                    .await
                    .map_err(|e| format!("Failed to read stdin: {e}"))?;
                ("stdin".to_string(), content)
            }
            (None, Some(path)) => {
                let content = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
                (path.display().to_string(), content)
            }
            (None, None) => return Err("Either --data or --file is required".to_string()),
        };

        serde_json::from_str(&content).map_err(|e| format!("Invalid JSON in {origin}: {e}"))
    }
}
