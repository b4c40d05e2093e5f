//! ロールと権限

use serde::{Deserialize, Serialize};

/// ユーザーロール
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 全権限
    Admin,
    /// 閲覧・作成・編集
    Supervisor,
    /// 閲覧のみ
    #[default]
    Viewer,
}

/// 操作権限
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    View,
    Create,
    Edit,
    Delete,
    ManageUsers,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Supervisor => "supervisor",
            Role::Viewer => "viewer",
        }
    }

    /// 表示名
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Supervisor => "Supervisor",
            Role::Viewer => "Viewer",
        }
    }

    /// 権限を持つかどうか
    pub fn allows(&self, permission: Permission) -> bool {
        match self {
            Role::Admin => true,
            Role::Supervisor => matches!(
                permission,
                Permission::View | Permission::Create | Permission::Edit
            ),
            Role::Viewer => permission == Permission::View,
        }
    }

    pub fn can_edit(&self) -> bool {
        self.allows(Permission::Edit)
    }

    pub fn can_delete(&self) -> bool {
        self.allows(Permission::Delete)
    }
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::View => "view",
            Permission::Create => "create",
            Permission::Edit => "edit",
            Permission::Delete => "delete",
            Permission::ManageUsers => "manage users",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_has_every_permission() {
        for p in [
            Permission::View,
            Permission::Create,
            Permission::Edit,
            Permission::Delete,
            Permission::ManageUsers,
        ] {
            assert!(Role::Admin.allows(p));
        }
    }

    #[test]
    fn test_supervisor_cannot_delete_or_manage_users() {
        assert!(Role::Supervisor.allows(Permission::Edit));
        assert!(Role::Supervisor.allows(Permission::Create));
        assert!(!Role::Supervisor.allows(Permission::Delete));
        assert!(!Role::Supervisor.allows(Permission::ManageUsers));
    }

    #[test]
    fn test_viewer_is_read_only() {
        assert!(Role::Viewer.allows(Permission::View));
        assert!(!Role::Viewer.can_edit());
        assert!(!Role::Viewer.can_delete());
    }

    #[test]
    fn test_role_deserializes_lowercase() {
        let role: Role = serde_json::from_str("\"supervisor\"").unwrap();
        assert_eq!(role, Role::Supervisor);
    }
}
