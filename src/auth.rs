//! 認証と権限
//!
//! - `role`: ロールと権限
//! - `session`: セッション状態マシン

mod role;
mod session;

pub use role::{Permission, Role};
pub use session::{ActiveSession, Session, DEFAULT_SESSION_MINUTES};
