//! セッション（状態マシン）
//!
//! ## 状態遷移図
//!
//! ```text
//!              ┌──────────────────┐
//!        ┌────▶│ Unauthenticated  │◀──────────────┐
//!        │     └────────┬─────────┘               │
//!        │              │ login() / assume()      │
//!        │              ▼                         │
//!        │     ┌──────────────────┐               │
//!   logout()   │  Authenticated   │──┐            │
//!        │     └────────┬─────────┘  │ login()    │
//!        │              │ ensure_active()         │
//!        │              │ (expires_at 経過)        │ logout()
//!        │              ▼                         │
//!        │     ┌──────────────────┐               │
//!        └─────│     Expired      │───────────────┘
//!              └──────────────────┘
//! ```

use super::role::{Permission, Role};
use crate::domain::User;
use crate::error::{DeskError, Result};
use chrono::{DateTime, Duration, Utc};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// 既定のセッション有効期間（分）
pub const DEFAULT_SESSION_MINUTES: i64 = 480;

/// 認証済みセッションの情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub user_id: String,
    pub username: String,
    pub name: String,
    pub role: Role,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// セッション状態
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Unauthenticated,
    Authenticated(ActiveSession),
    Expired { username: String },
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// ユーザー名でセッションを開く
    ///
    /// - ユーザー名とパスワード: 資格情報を検証してログイン
    /// - ユーザー名のみ: ユーザー一覧から検索（見つからなければエラー）
    /// - 指定なし: 閲覧専用のゲストとして開始
    pub fn open(
        users: &[User],
        username: Option<&str>,
        password: Option<&str>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self> {
        let mut session = Self::new();
        match (username, password) {
            (Some(name), Some(password)) => {
                session.login(users, name, password, now, ttl)?;
            }
            (Some(name), None) => {
                let user = users.iter().find(|u| u.username == name).ok_or_else(|| {
                    DeskError::Unauthorized(format!("unknown user '{name}'"))
                })?;
                session.assume(user, now, ttl);
            }
            (None, _) => {
                session.assume(&guest(), now, ttl);
            }
        }
        Ok(session)
    }

    /// 資格情報を検証してログイン（→ Authenticated）
    pub fn login(
        &mut self,
        users: &[User],
        username: &str,
        password: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<ActiveSession> {
        let user = users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .ok_or_else(|| {
                log::warn!("login failed for `{username}`");
                DeskError::Unauthorized(format!("invalid credentials for '{username}'"))
            })?;
        Ok(self.start(user, now, ttl))
    }

    /// 資格情報を検証せずにユーザーとしてセッションを開始（→ Authenticated）
    ///
    /// CLI のように呼び出し元が既にユーザーを特定している場合に使う。
    pub fn assume(&mut self, user: &User, now: DateTime<Utc>, ttl: Duration) -> ActiveSession {
        self.start(user, now, ttl)
    }

    fn start(&mut self, user: &User, now: DateTime<Utc>, ttl: Duration) -> ActiveSession {
        let active = ActiveSession {
            user_id: user.id.clone(),
            username: user.username.clone(),
            name: user.name.clone(),
            role: user.role,
            token: issue_token(&user.username, now),
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        log::info!(
            "session started for `{}` ({})",
            active.username,
            active.role.as_str()
        );
        log::debug!(
            "user id {} issued token {} valid until {}",
            active.user_id,
            active.token,
            active.expires_at
        );
        *self = Session::Authenticated(active.clone());
        active
    }

    /// 有効なセッションを取得
    ///
    /// 有効期限を過ぎていれば Expired へ遷移してエラーを返す。
    pub fn ensure_active(&mut self, now: DateTime<Utc>) -> Result<&ActiveSession> {
        let expired = matches!(self, Session::Authenticated(a) if now >= a.expires_at);
        if expired {
            if let Session::Authenticated(active) = std::mem::take(self) {
                log::info!("session for `{}` expired", active.username);
                *self = Session::Expired {
                    username: active.username,
                };
            }
        }

        match self {
            Session::Authenticated(active) => Ok(active),
            Session::Expired { username } => Err(DeskError::SessionExpired(username.clone())),
            Session::Unauthenticated => {
                Err(DeskError::Unauthorized("no active session".to_string()))
            }
        }
    }

    /// 権限を確認し、セッションのロールを返す
    pub fn authorize(&mut self, permission: Permission, now: DateTime<Utc>) -> Result<Role> {
        let role = self.ensure_active(now)?.role;
        if role.allows(permission) {
            Ok(role)
        } else {
            Err(DeskError::PermissionDenied {
                role: role.as_str().to_string(),
                permission: permission.as_str().to_string(),
            })
        }
    }

    /// ログアウト（→ Unauthenticated）
    pub fn logout(&mut self) {
        *self = Session::Unauthenticated;
    }
}

/// ユーザー未指定時のゲスト
fn guest() -> User {
    User {
        id: "guest".to_string(),
        username: "guest".to_string(),
        name: "Guest".to_string(),
        role: Role::Viewer,
        ..User::default()
    }
}

/// セッショントークンを発行
fn issue_token(username: &str, now: DateTime<Utc>) -> String {
    let mut hasher = DefaultHasher::new();
    username.hash(&mut hasher);
    now.timestamp_nanos_opt().unwrap_or_default().hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
