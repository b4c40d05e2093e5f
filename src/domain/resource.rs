//! リソース種別

use crate::auth::Permission;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// バックエンドが提供するリソース
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Clients,
    Projects,
    Contracts,
    Payments,
    Invoices,
    Maintenances,
    Users,
}

impl Resource {
    /// エンドポイント名（`GET {base}/{name}`）
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Clients => "clients",
            Resource::Projects => "projects",
            Resource::Contracts => "contracts",
            Resource::Payments => "payments",
            Resource::Invoices => "invoices",
            Resource::Maintenances => "maintenances",
            Resource::Users => "users",
        }
    }

    /// 表示名
    pub fn title(&self) -> &'static str {
        match self {
            Resource::Clients => "Clients",
            Resource::Projects => "Projects",
            Resource::Contracts => "Contracts",
            Resource::Payments => "Payments",
            Resource::Invoices => "Invoices",
            Resource::Maintenances => "Maintenance",
            Resource::Users => "Users",
        }
    }

    /// 一覧表示に必要な権限
    pub fn required_permission(&self) -> Permission {
        match self {
            Resource::Users => Permission::ManageUsers,
            _ => Permission::View,
        }
    }

    /// 全リソース
    pub fn all() -> &'static [Resource] {
        &[
            Resource::Clients,
            Resource::Projects,
            Resource::Contracts,
            Resource::Payments,
            Resource::Invoices,
            Resource::Maintenances,
            Resource::Users,
        ]
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
