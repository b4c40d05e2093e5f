//! コマンド共通のコンテキスト
//!
//! 設定の解決、ロガー初期化、データ読み込み、セッション開始をまとめる。

use crate::auth::{Permission, Role, Session};
use crate::domain::User;
use crate::cli::Cli;
use crate::config::AppConfig;
use crate::logging;
use crate::store::{self, DataSource, Database};
use chrono::Utc;

/// コマンド実行時のコンテキスト
#[derive(Debug, Clone)]
pub struct Context {
    pub config: AppConfig,
    pub source: DataSource,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl Context {
    /// CLI 引数・環境変数・設定ファイルからコンテキストを作成
    pub fn from_cli(cli: &Cli) -> Result<Self, String> {
        let config_path = match &cli.config {
            Some(path) => path.clone(),
            None => AppConfig::default_path().map_err(|e| e.to_string())?,
        };
        let config = AppConfig::load(&config_path)
            .map_err(|e| e.to_string())?
            .with_env_overrides();

        if let Err(e) = logging::init(&config) {
            eprintln!("warning: logging disabled: {e}");
        }

        let raw_source = cli.source.as_deref().unwrap_or(&config.source);
        let source = DataSource::parse(raw_source).map_err(|e| e.to_string())?;
        let user = cli.user.clone().or_else(|| config.user.clone());
        if cli.password.is_some() && user.is_none() {
            return Err("--password requires --user (or `user` in the config file)".to_string());
        }
        config.session_ttl().map_err(|e| e.to_string())?;

        Ok(Self {
            config,
            source,
            user,
            password: cli.password.clone(),
        })
    }

    /// 全リソースを読み込む
    pub async fn load(&self) -> Result<Database, String> {
        store::load(&self.source, &self.config.http())
            .await
            .map_err(|e| format!("Failed to load data from {}: {e}", self.source))
    }

    /// 認証用のユーザー一覧だけを読み込む
    pub async fn load_users(&self) -> Result<Vec<User>, String> {
        store::load_users(&self.source, &self.config.http())
            .await
            .map_err(|e| format!("Failed to load users from {}: {e}", self.source))
    }

    /// セッションを開始して権限を確認し、ロールを返す
    pub fn authorize(&self, db: &Database, permission: Permission) -> Result<Role, String> {
        self.authorize_all(&db.users, &[permission])
    }

    /// 1 つのセッションで複数の権限をすべて確認する
    pub fn authorize_all(&self, users: &[User], permissions: &[Permission]) -> Result<Role, String> {
        let now = Utc::now();
        let ttl = self.config.session_ttl().map_err(|e| e.to_string())?;
        let mut session = Session::open(
            users,
            self.user.as_deref(),
            self.password.as_deref(),
            now,
            ttl,
        )
        .map_err(|e| e.to_string())?;

        let mut role = session.ensure_active(now).map_err(|e| e.to_string())?.role;
        for &permission in permissions {
            role = session.authorize(permission, now).map_err(|e| e.to_string())?;
        }
        Ok(role)
    }
}
