use super::*;
use crate::tui::tab::TableBody;
use crossterm::event::KeyCode;

const FIXTURE: &str = include_str!("../../tests/fixtures/db.json");

fn fixture() -> Database {
    Database::from_json(FIXTURE).unwrap()
}

fn now() -> DateTime<Utc> {
    Utc::now()
}

fn options(user: Option<&str>, initial: Option<Resource>) -> Options {
    Options {
        username: user.map(str::to_string),
        password: None,
        ttl: Duration::minutes(30),
        initial,
        searchable: true,
        details: true,
    }
}

fn loaded_model(user: Option<&str>) -> Model {
    let mut model = Model::new(options(user, None));
    model.on_loaded(Ok(fixture()), now());
    model
}

fn titles(model: &Model) -> Vec<Resource> {
    model.tabs.iter().map(|t| t.resource()).collect()
}

// ============================================================================
// 読み込み
// ============================================================================

#[test]
fn new_model_is_loading_with_every_tab() {
    let model = Model::new(options(None, None));
    assert!(model.is_loading());
    assert_eq!(model.tabs.len(), Resource::all().len());
    let snapshot = model.tab().unwrap().snapshot(None);
    assert!(matches!(
        snapshot.body,
        TableBody::Loading {
            placeholder_rows: 5
        }
    ));
}

#[test]
fn initial_resource_selects_tab() {
    let model = Model::new(options(None, Some(Resource::Payments)));
    assert_eq!(model.tab().unwrap().resource(), Resource::Payments);
}

#[test]
fn admin_sees_users_tab() {
    let model = loaded_model(Some("admin"));
    assert!(!model.is_loading());
    assert!(titles(&model).contains(&Resource::Users));
    assert!(matches!(model.session, Session::Authenticated(_)));
}

#[test]
fn guest_does_not_see_users_tab() {
    let model = loaded_model(None);
    assert_eq!(model.tabs.len(), Resource::all().len() - 1);
    assert!(!titles(&model).contains(&Resource::Users));
}

#[test]
fn hidden_initial_tab_falls_back_to_first() {
    let mut model = Model::new(options(Some("viewer"), Some(Resource::Users)));
    model.on_loaded(Ok(fixture()), now());
    assert_eq!(model.current, 0);
    assert_eq!(model.tab().unwrap().resource(), Resource::Clients);
}

#[test]
fn unknown_user_shows_error() {
    let model = loaded_model(Some("nobody"));
    assert!(model.error.is_some());
    assert!(!model.is_loading());
}

#[test]
fn load_failure_shows_error() {
    let mut model = Model::new(options(None, None));
    model.on_loaded(Err("connection refused".to_string()), now());
    assert_eq!(model.error.as_deref(), Some("connection refused"));
}

#[test]
fn password_is_verified_on_load() {
    let mut model = Model::new(Options {
        password: Some("admin123".to_string()),
        ..options(Some("admin"), None)
    });
    model.on_loaded(Ok(fixture()), now());
    assert!(model.error.is_none());
    assert!(titles(&model).contains(&Resource::Users));

    let mut model = Model::new(Options {
        password: Some("wrong".to_string()),
        ..options(Some("admin"), None)
    });
    model.on_loaded(Ok(fixture()), now());
    assert!(model.error.is_some());
}

// ============================================================================
// セッション期限
// ============================================================================

#[test]
fn expired_session_locks_the_browser() {
    let start = now();
    let mut model = Model::new(Options {
        ttl: Duration::minutes(1),
        ..options(Some("supervisor"), None)
    });
    model.on_loaded(Ok(fixture()), start);

    model.check_session(start);
    assert!(model.error.is_none());

    model.check_session(start + Duration::minutes(2));
    assert!(matches!(model.session, Session::Expired { .. }));
    assert!(model.error.as_deref().is_some_and(|e| e.contains("expired")));
    assert!(!model.is_loading());

    assert_eq!(model.key_to_msg(KeyCode::Enter), None);
    assert_eq!(model.key_to_msg(KeyCode::Char('q')), Some(Msg::Quit));
    update(&mut model, Msg::Activate);
    assert!(model.detail.is_none());
}

#[test]
fn check_session_before_load_is_noop() {
    let mut model = Model::new(options(None, None));
    model.check_session(now() + Duration::days(1));
    assert!(model.error.is_none());
    assert!(model.is_loading());
}

#[test]
fn quit_logs_out() {
    let mut model = loaded_model(Some("admin"));
    update(&mut model, Msg::Quit);
    assert!(model.should_quit);
    assert_eq!(model.session, Session::Unauthenticated);
}

// ============================================================================
// キー入力
// ============================================================================

#[test]
fn slash_focuses_search() {
    let model = loaded_model(None);
    assert_eq!(model.key_to_msg(KeyCode::Char('/')), Some(Msg::SearchFocus));
}

#[test]
fn digit_maps_to_zero_based_column() {
    let model = loaded_model(None);
    assert_eq!(model.key_to_msg(KeyCode::Char('1')), Some(Msg::ToggleSort(0)));
    assert_eq!(model.key_to_msg(KeyCode::Char('9')), Some(Msg::ToggleSort(8)));
    assert_eq!(model.key_to_msg(KeyCode::Char('0')), None);
}

#[test]
fn typing_while_focused_edits_search() {
    let mut model = loaded_model(None);
    model.search_focused = true;
    assert_eq!(model.key_to_msg(KeyCode::Char('q')), Some(Msg::SearchInput('q')));
    assert_eq!(model.key_to_msg(KeyCode::Esc), Some(Msg::SearchUnfocus));
}

#[test]
fn esc_clears_non_empty_search_first() {
    let mut model = loaded_model(None);
    update(&mut model, Msg::SearchFocus);
    update(&mut model, Msg::SearchInput('b'));
    assert_eq!(model.key_to_msg(KeyCode::Esc), Some(Msg::SearchClear));
}

#[test]
fn disabled_search_ignores_slash() {
    let mut model = Model::new(Options {
        searchable: false,
        ..options(None, None)
    });
    model.on_loaded(Ok(fixture()), now());
    assert_eq!(model.key_to_msg(KeyCode::Char('/')), None);
    update(&mut model, Msg::SearchFocus);
    assert!(!model.search_focused);
}

#[test]
fn enter_is_ignored_without_detail_panel() {
    let mut model = Model::new(Options {
        details: false,
        ..options(None, None)
    });
    model.on_loaded(Ok(fixture()), now());
    assert!(!model.tab().unwrap().rows_interactive());
    assert_eq!(model.key_to_msg(KeyCode::Enter), None);
    update(&mut model, Msg::Activate);
    assert!(model.detail.is_none());
}

#[test]
fn q_quits_outside_search() {
    let model = loaded_model(None);
    assert_eq!(model.key_to_msg(KeyCode::Char('q')), Some(Msg::Quit));
}

// ============================================================================
// update
// ============================================================================

#[test]
fn search_narrows_rows_and_clamps_selection() {
    let mut model = loaded_model(None);
    assert_eq!(model.row_count(), 3);
    update(&mut model, Msg::Down);
    update(&mut model, Msg::Down);
    assert_eq!(model.selected, 2);

    update(&mut model, Msg::SearchFocus);
    for c in "coral".chars() {
        update(&mut model, Msg::SearchInput(c));
    }
    assert_eq!(model.row_count(), 1);
    assert_eq!(model.selected, 0);
}

#[test]
fn search_is_inert_while_loading() {
    let mut model = Model::new(options(None, None));
    update(&mut model, Msg::SearchFocus);
    assert!(!model.search_focused);
    update(&mut model, Msg::SearchInput('x'));
    assert_eq!(model.tab().unwrap().search_term(), "");
}

#[test]
fn down_stops_at_last_row() {
    let mut model = loaded_model(None);
    for _ in 0..10 {
        update(&mut model, Msg::Down);
    }
    assert_eq!(model.selected, 2);
    update(&mut model, Msg::Up);
    assert_eq!(model.selected, 1);
}

#[test]
fn tab_switch_wraps_and_resets_selection() {
    let mut model = loaded_model(None);
    update(&mut model, Msg::Down);
    update(&mut model, Msg::PrevTab);
    assert_eq!(model.current, model.tabs.len() - 1);
    assert_eq!(model.selected, 0);
    update(&mut model, Msg::NextTab);
    assert_eq!(model.current, 0);
}

#[test]
fn toggle_sort_marks_header() {
    let mut model = loaded_model(None);
    // Clients: 0 = clientNumber
    update(&mut model, Msg::ToggleSort(0));
    let snapshot = model.tab().unwrap().snapshot(model.db.as_ref());
    assert!(snapshot.headers[0].direction.is_some());
    match snapshot.body {
        TableBody::Rows(rows) => assert_eq!(rows[0][0].text, "CL-001"),
        other => panic!("expected rows, got {other:?}"),
    }
}

#[test]
fn activate_opens_detail_for_selected_row() {
    let mut model = loaded_model(None);
    update(&mut model, Msg::Down);
    update(&mut model, Msg::Activate);

    let detail = model.detail.as_ref().expect("detail panel");
    assert!(detail.title.contains("c2"));
    assert!(detail
        .fields
        .iter()
        .any(|(k, v)| *k == "name" && v == "Ahmed Saleh"));

    assert_eq!(model.key_to_msg(KeyCode::Esc), Some(Msg::CloseDetail));
    update(&mut model, Msg::CloseDetail);
    assert!(model.detail.is_none());
}

#[test]
fn user_detail_never_contains_password() {
    let mut model = Model::new(options(Some("admin"), Some(Resource::Users)));
    model.on_loaded(Ok(fixture()), now());
    update(&mut model, Msg::Activate);
    let detail = model.detail.as_ref().expect("detail panel");
    assert!(detail.fields.iter().all(|(k, _)| *k != "password"));
}

#[test]
fn activate_while_loading_is_noop() {
    let mut model = Model::new(options(None, None));
    update(&mut model, Msg::Activate);
    assert!(model.detail.is_none());
}
