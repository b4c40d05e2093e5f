//! ダッシュボード統計

use crate::domain::{format_amount, parse_date};
use crate::store::Database;
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// 契約の想定期間（日）
const CONTRACT_TERM_DAYS: i64 = 365;
/// 期限切れ間近とみなす日数
const EXPIRY_WINDOW_DAYS: i64 = 30;
/// 最近の活動とみなす日数
const RECENT_DAYS: i64 = 7;

/// ダッシュボードの集計値
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_clients: usize,
    pub active_projects: usize,
    pub completed_projects: usize,
    pub total_contracts: usize,
    pub total_payments: f64,
    pub pending_invoices: usize,
    pub expiring_contracts: usize,
    pub recent_projects: usize,
    /// 種別ごとのプロジェクト数（تركيب / صيانة / إصلاح）
    pub installation_projects: usize,
    pub maintenance_projects: usize,
    pub repair_projects: usize,
    pub active_contracts: usize,
}

impl DashboardStats {
    /// ストアから集計する（日付を解釈できないレコードは日付条件から除外）
    pub fn compute(db: &Database, today: NaiveDate) -> Self {
        let active_projects = db
            .projects
            .iter()
            .filter(|p| p.status == "نشط" || p.status == "قيد التنفيذ")
            .count();
        let completed_projects = db.projects.iter().filter(|p| p.status == "مكتمل").count();
        let pending_invoices = db.invoices.iter().filter(|i| i.status == "معلق").count();
        let total_payments = db.payments.iter().map(|p| p.amount).sum();
        let projects_of = |kind: &str| db.projects.iter().filter(|p| p.kind == kind).count();
        let active_contracts = db.contracts.iter().filter(|c| c.status == "نشط").count();

        let window_end = today + Duration::days(EXPIRY_WINDOW_DAYS);
        let expiring_contracts = db
            .contracts
            .iter()
            .filter_map(|c| parse_date(&c.created_at))
            .map(|created| created + Duration::days(CONTRACT_TERM_DAYS))
            .filter(|expiry| *expiry > today && *expiry <= window_end)
            .count();

        let recent_start = today - Duration::days(RECENT_DAYS);
        let recent_projects = db
            .projects
            .iter()
            .filter_map(|p| parse_date(&p.created_at))
            .filter(|created| *created > recent_start)
            .count();

        Self {
            total_clients: db.clients.len(),
            active_projects,
            completed_projects,
            total_contracts: db.contracts.len(),
            total_payments,
            pending_invoices,
            expiring_contracts,
            recent_projects,
            installation_projects: projects_of("تركيب"),
            maintenance_projects: projects_of("صيانة"),
            repair_projects: projects_of("إصلاح"),
            active_contracts,
        }
    }

    /// 表示用のラベルと値の一覧
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Clients", self.total_clients.to_string()),
            ("Active projects", self.active_projects.to_string()),
            ("Completed projects", self.completed_projects.to_string()),
            ("Contracts", self.total_contracts.to_string()),
            ("Total payments", format_amount(self.total_payments)),
            ("Pending invoices", self.pending_invoices.to_string()),
            ("Contracts expiring in 30 days", self.expiring_contracts.to_string()),
            ("Projects in the last 7 days", self.recent_projects.to_string()),
            ("Installation projects", self.installation_projects.to_string()),
            ("Maintenance projects", self.maintenance_projects.to_string()),
            ("Repair projects", self.repair_projects.to_string()),
            ("Active contracts", self.active_contracts.to_string()),
        ]
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
