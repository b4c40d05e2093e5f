//! アプリケーション設定
//!
//! `~/.elevdesk/config.toml` を読み込む。ファイルがなければ既定値を使う。
//! 優先順位: CLI 引数 > 環境変数 > 設定ファイル > 既定値

use crate::error::{DeskError, Result};
use crate::store::HttpConfig;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 読み込み元を上書きする環境変数
pub const SOURCE_ENV: &str = "ELEVDESK_SOURCE";

/// セッション有効期間の上限（分、1 年）
pub const MAX_SESSION_MINUTES: i64 = 525_600;

/// 設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// データの読み込み元（ファイルパスまたは URL）
    pub source: String,
    /// セッションユーザー名
    pub user: Option<String>,
    /// ログレベル（error / warn / info / debug / trace / off）
    pub log_level: String,
    /// ログファイル（未指定なら `~/.elevdesk/elevdesk.log`）
    pub log_file: Option<PathBuf>,
    /// セッション有効期間（分）
    pub session_minutes: i64,
    /// HTTP タイムアウト（秒）
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: "http://localhost:3001".to_string(),
            user: None,
            log_level: "info".to_string(),
            log_file: None,
            session_minutes: crate::auth::DEFAULT_SESSION_MINUTES,
            timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// 設定ディレクトリ（`~/.elevdesk`）
    pub fn default_dir() -> Result<PathBuf> {
        let home = env_var("HOME")
            .ok_or_else(|| DeskError::Config("HOME environment variable not set".to_string()))?;
        Ok(PathBuf::from(home).join(".elevdesk"))
    }

    /// 既定の設定ファイルパス
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::default_dir()?.join("config.toml"))
    }

    /// 設定ファイルを読み込む（存在しなければ既定値）
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(DeskError::Io(e)),
        }
    }

    /// 環境変数で上書き
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(source) = env_var(SOURCE_ENV) {
            self.source = source;
        }
        self
    }

    /// ログファイルのパス
    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::default_dir()?.join("elevdesk.log")),
        }
    }

    /// ログレベル（解釈できなければ Info）
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    /// セッション有効期間
    ///
    /// `session_minutes` は 1 から `MAX_SESSION_MINUTES` の範囲でなければならない。
    pub fn session_ttl(&self) -> Result<chrono::Duration> {
        if !(1..=MAX_SESSION_MINUTES).contains(&self.session_minutes) {
            return Err(DeskError::Config(format!(
                "session_minutes must be between 1 and {MAX_SESSION_MINUTES}, got {}",
                self.session_minutes
            )));
        }
        chrono::Duration::try_minutes(self.session_minutes).ok_or_else(|| {
            DeskError::Config(format!(
                "session_minutes out of range: {}",
                self.session_minutes
            ))
        })
    }

    /// HTTP 設定
    pub fn http(&self) -> HttpConfig {
        HttpConfig {
            timeout: Some(Duration::from_secs(self.timeout_secs)),
            ..HttpConfig::default()
        }
    }
}

/// 環境変数を取得（空文字列は None として扱う）
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
