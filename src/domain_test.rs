use super::*;
use crate::table::{Projection, TableView};

const FIXTURE: &str = include_str!("../tests/fixtures/db.json");

fn db() -> Database {
    Database::from_json(FIXTURE).unwrap()
}

fn view<R: ResourceRecord>(db: &Database, role: Role) -> TableView<R> {
    TableView::new(R::columns(&ColumnContext::new(db, role)))
}

fn column_texts<R>(projection: &Projection<'_, R>, index: usize) -> Vec<String> {
    projection
        .rows()
        .iter()
        .map(|row| row.cells[index].text.clone())
        .collect()
}

#[test]
fn test_name_index_resolves_ids() {
    let index = NameIndex::build(&db());
    assert_eq!(index.client_name("c1"), "Burj Towers");
    assert_eq!(index.project_name("p2"), "Villa repair");
    assert_eq!(index.contract_number("k2"), "CT-2023-014");
    assert_eq!(index.client_name("missing"), "Unknown");
}

#[test]
fn test_clients_sorted_by_client_number() {
    let db = db();
    let mut v = view::<Client>(&db, Role::Admin);
    v.toggle_sort("clientNumber");
    let projection = v.project(&db.clients);
    assert_eq!(
        column_texts(&projection, 0),
        vec!["CL-001", "CL-002", "CL-003"]
    );
}

#[test]
fn test_search_matches_fields_outside_columns() {
    let db = db();
    let mut v = view::<Client>(&db, Role::Admin);
    // location はカラムに含まれないが検索対象
    v.set_search("sharjah");
    let rows = v.rows(&db.clients);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Ahmed Saleh");
}

#[test]
fn test_payments_sort_by_amount_numerically() {
    let db = db();
    let mut v = view::<Payment>(&db, Role::Viewer);
    v.toggle_sort("amount");
    let projection = v.project(&db.payments);
    assert_eq!(
        column_texts(&projection, 2),
        vec!["6,000 AED", "120,000 AED", "150,000 AED"]
    );
}

#[test]
fn test_payment_renders_contract_number_and_empty_notes() {
    let db = db();
    let v = view::<Payment>(&db, Role::Viewer);
    let projection = v.project(&db.payments);
    assert_eq!(column_texts(&projection, 0)[0], "CT-2024-001");
    assert_eq!(column_texts(&projection, 5)[1], "-");
}

#[test]
fn test_contract_date_empty_renders_dash() {
    let db = db();
    let v = view::<Contract>(&db, Role::Viewer);
    let projection = v.project(&db.contracts);
    assert_eq!(column_texts(&projection, 3), vec!["25 Jan 2024", "-"]);
}

#[test]
fn test_actions_column_follows_role() {
    let db = db();
    let last = Invoice::columns(&ColumnContext::new(&db, Role::Admin)).len() - 1;

    let admin = view::<Invoice>(&db, Role::Admin);
    assert_eq!(column_texts(&admin.project(&db.invoices), last)[0], "edit · delete");

    let supervisor = view::<Invoice>(&db, Role::Supervisor);
    assert_eq!(column_texts(&supervisor.project(&db.invoices), last)[0], "edit");

    let viewer = view::<Invoice>(&db, Role::Viewer);
    assert_eq!(column_texts(&viewer.project(&db.invoices), last)[0], "-");
}

#[test]
fn test_user_search_ignores_password() {
    let db = db();
    let mut v = view::<User>(&db, Role::Admin);
    v.set_search("admin123");
    assert!(v.project(&db.users).is_empty());
}

#[test]
fn test_user_role_rendered_with_display_name() {
    let db = db();
    let v = view::<User>(&db, Role::Admin);
    let projection = v.project(&db.users);
    assert_eq!(
        column_texts(&projection, 3),
        vec!["Admin", "Supervisor", "Viewer"]
    );
}

#[test]
fn test_elevator_details_recalculate_vat() {
    let mut details = ElevatorDetails {
        elevator_count: 2,
        price_per_elevator: 100_000.0,
        ..ElevatorDetails::default()
    };
    details.recalculate();
    assert_eq!(details.vat, 30_000.0);
    assert_eq!(details.total_price, 230_000.0);
}

#[test]
fn test_contract_value_prefers_installation_total() {
    let db = db();
    assert_eq!(db.contracts[0].value(), Some(391_000.0));
    assert_eq!(db.contracts[1].value(), Some(6_000.0));
}

#[test]
fn test_select_matches_resource() {
    let db = db();
    assert_eq!(Client::select(&db).len(), db.count(Client::RESOURCE));
    assert_eq!(Maintenance::select(&db).len(), db.count(Maintenance::RESOURCE));
}
