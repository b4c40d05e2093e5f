//! ユーザー

use super::{ColumnContext, Resource, ResourceRecord};
use crate::auth::Role;
use crate::store::Database;
use crate::table::{Cell, Column, Record, Tone, Value};
use serde::{Deserialize, Serialize};

/// アプリケーションのユーザー
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub username: String,
    /// 平文パスワード（モックバックエンドの仕様）。出力には含めない
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
    pub name: String,
    pub email: String,
}

impl Record for User {
    // password は平文で保存されているため、検索対象にも詳細パネルにも含めない。
    // 含めると一部の文字列で検索するだけで該当ユーザーのパスワードが推測できてしまう
    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", Value::from(&self.id)),
            ("username", Value::from(&self.username)),
            ("role", Value::from(self.role.as_str())),
            ("name", Value::from(&self.name)),
            ("email", Value::from(&self.email)),
        ]
    }
}

impl ResourceRecord for User {
    const RESOURCE: Resource = Resource::Users;

    fn id(&self) -> &str {
        &self.id
    }

    fn select(db: &Database) -> &[Self] {
        &db.users
    }

    fn columns(ctx: &ColumnContext) -> Vec<Column<Self>> {
        vec![
            Column::new("username", "Username", |u: &User| Value::from(&u.username)).sortable(),
            Column::new("name", "Full name", |u: &User| Value::from(&u.name)).sortable(),
            Column::new("email", "Email", |u: &User| Value::from(&u.email)).sortable(),
            Column::new("role", "Role", |u: &User| Value::from(u.role.as_str()))
                .sortable()
                .with_renderer(|_, user: &User| role_cell(user.role)),
            ctx.actions_column(),
        ]
    }
}

fn role_cell(role: Role) -> Cell {
    let tone = match role {
        Role::Admin => Tone::Negative,
        Role::Supervisor => Tone::Info,
        Role::Viewer => Tone::Positive,
    };
    Cell::toned(role.display_name(), tone)
}
