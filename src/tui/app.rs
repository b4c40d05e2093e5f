//! ブラウザ TUI の Elm Architecture ベースのアプリケーション構造
//!
//! - `Model`: タブ・選択位置・検索フォーカス・セッションなどの状態
//! - `Msg`: アプリケーションへのメッセージ
//! - `update`: メッセージに応じた状態更新

use super::tab::{BrowseTab, Detail, ResourceTab};
use super::Options;
use crate::auth::{Permission, Role, Session};
use crate::domain::{
    Client, ColumnContext, Contract, Invoice, Maintenance, Payment, Project, Resource, User,
};
use crate::store::Database;
use chrono::{DateTime, Duration, Utc};
use crossterm::event::KeyCode;
use std::sync::mpsc::{self, Receiver, Sender};

// ============================================================================
// Msg（アプリケーションへのメッセージ）
// ============================================================================

/// アプリケーションへのメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// 終了
    Quit,
    /// 次のタブへ
    NextTab,
    /// 前のタブへ
    PrevTab,
    /// 検索欄にフォーカス移動
    SearchFocus,
    /// 検索欄からフォーカス解除（テーブルへ戻る）
    SearchUnfocus,
    /// 検索文字入力
    SearchInput(char),
    /// 検索文字削除
    SearchBackspace,
    /// 検索クリア
    SearchClear,
    /// 選択を上へ
    Up,
    /// 選択を下へ
    Down,
    /// n 番目（0 始まり）の列でソート切り替え
    ToggleSort(usize),
    /// 選択行をアクティベート
    Activate,
    /// 詳細パネルを閉じる
    CloseDetail,
}

// ============================================================================
// Model（アプリケーション全体の状態）
// ============================================================================

/// アプリケーション全体の状態
pub struct Model {
    /// リソースタブ（ロールで閲覧できるもののみ）
    pub tabs: Vec<Box<dyn BrowseTab>>,
    /// 現在のタブ
    pub current: usize,
    /// 現在のタブの選択行
    pub selected: usize,
    /// 読み込み済みデータ（読み込み中は None）
    pub db: Option<Database>,
    pub session: Session,
    /// 検索欄にフォーカスしているか
    pub search_focused: bool,
    /// 開いている詳細パネル
    pub detail: Option<Detail>,
    /// 読み込み・認証エラー
    pub error: Option<String>,
    /// 終了フラグ
    pub should_quit: bool,
    username: Option<String>,
    password: Option<String>,
    ttl: Duration,
    detail_rx: Receiver<Detail>,
}

impl Model {
    /// 読み込み中のモデルを作成
    ///
    /// ロールが決まるまでは全リソースのタブを閲覧者向けの列定義で用意する。
    pub fn new(options: Options) -> Self {
        let (detail_tx, detail_rx) = mpsc::channel();
        let placeholder = ColumnContext::new(&Database::default(), Role::Viewer);
        let details = options.details.then_some(detail_tx);
        let tabs = all_tabs(&placeholder, details.as_ref(), options.searchable);
        let current = options
            .initial
            .and_then(|r| tabs.iter().position(|t| t.resource() == r))
            .unwrap_or(0);

        Self {
            tabs,
            current,
            selected: 0,
            db: None,
            session: Session::new(),
            search_focused: false,
            detail: None,
            error: None,
            should_quit: false,
            username: options.username,
            password: options.password,
            ttl: options.ttl,
            detail_rx,
        }
    }

    /// 現在のタブ
    pub fn tab(&self) -> Option<&dyn BrowseTab> {
        self.tabs.get(self.current).map(|t| t.as_ref())
    }

    fn tab_mut(&mut self) -> Option<&mut Box<dyn BrowseTab>> {
        self.tabs.get_mut(self.current)
    }

    pub fn is_loading(&self) -> bool {
        self.db.is_none() && self.error.is_none()
    }

    /// 現在のタブの表示行数
    pub fn row_count(&self) -> usize {
        self.tab()
            .map(|t| t.row_count(self.db.as_ref()))
            .unwrap_or(0)
    }

    /// 読み込み結果を反映する
    pub fn on_loaded(&mut self, result: Result<Database, String>, now: DateTime<Utc>) {
        let db = match result {
            Ok(db) => db,
            Err(e) => {
                log::error!("{e}");
                self.error = Some(e);
                return;
            }
        };

        let mut session = match Session::open(
            &db.users,
            self.username.as_deref(),
            self.password.as_deref(),
            now,
            self.ttl,
        ) {
            Ok(session) => session,
            Err(e) => return self.reject(e.to_string()),
        };
        let role = match session.authorize(Permission::View, now) {
            Ok(role) => role,
            Err(e) => return self.reject(e.to_string()),
        };
        self.session = session;

        let current = self.tab().map(|t| t.resource());
        self.tabs
            .retain(|t| role.allows(t.resource().required_permission()));
        self.current = current
            .and_then(|r| self.tabs.iter().position(|t| t.resource() == r))
            .unwrap_or(0);

        let ctx = ColumnContext::new(&db, role);
        for tab in &mut self.tabs {
            tab.load(&ctx);
        }
        log::info!(
            "browser ready: {} tab(s) for role {}",
            self.tabs.len(),
            role.as_str()
        );
        self.db = Some(db);
        self.selected = 0;
    }

    fn reject(&mut self, message: String) {
        log::warn!("session rejected: {message}");
        self.error = Some(message);
    }

    /// 読み込み後のセッションを再確認する
    ///
    /// 有効期限切れ、または現在のタブを閲覧する権限がなければ操作を止めてエラーを表示する。
    pub fn check_session(&mut self, now: DateTime<Utc>) {
        if self.db.is_none() || self.error.is_some() {
            return;
        }
        let permission = self
            .tab()
            .map_or(Permission::View, |t| t.resource().required_permission());
        let checked = self
            .session
            .authorize(Permission::View, now)
            .and_then(|_| self.session.authorize(permission, now));
        if let Err(e) = checked {
            self.detail = None;
            self.search_focused = false;
            self.reject(format!("{e}; restart elevdesk to sign in again"));
        }
    }

    /// キー入力をメッセージに変換
    pub fn key_to_msg(&self, key: KeyCode) -> Option<Msg> {
        if self.error.is_some() {
            return match key {
                KeyCode::Esc | KeyCode::Char('q') => Some(Msg::Quit),
                _ => None,
            };
        }

        if self.detail.is_some() {
            return match key {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Msg::CloseDetail),
                _ => None,
            };
        }

        let search_empty = self
            .tab()
            .map_or(true, |t| t.search_term().is_empty());

        if self.search_focused {
            // 検索欄にフォーカス中のキー処理
            match key {
                KeyCode::Esc if !search_empty => Some(Msg::SearchClear),
                KeyCode::Esc | KeyCode::Down | KeyCode::Enter => Some(Msg::SearchUnfocus),
                KeyCode::Tab => Some(Msg::NextTab),
                KeyCode::BackTab => Some(Msg::PrevTab),
                KeyCode::Backspace => Some(Msg::SearchBackspace),
                KeyCode::Char(c) => Some(Msg::SearchInput(c)),
                _ => None,
            }
        } else {
            // テーブル（通常）フォーカス時のキー処理
            match key {
                KeyCode::Char('q') => Some(Msg::Quit),
                KeyCode::Tab | KeyCode::Right => Some(Msg::NextTab),
                KeyCode::BackTab | KeyCode::Left => Some(Msg::PrevTab),
                KeyCode::Up | KeyCode::Char('k') => Some(Msg::Up),
                KeyCode::Down | KeyCode::Char('j') => Some(Msg::Down),
                KeyCode::Char('/') if self.tab().is_some_and(|t| t.is_searchable()) => {
                    Some(Msg::SearchFocus)
                }
                KeyCode::Esc if !search_empty => Some(Msg::SearchClear),
                KeyCode::Char(c @ '1'..='9') => {
                    c.to_digit(10).map(|d| Msg::ToggleSort(d as usize - 1))
                }
                KeyCode::Enter if self.tab().is_some_and(|t| t.rows_interactive()) => {
                    Some(Msg::Activate)
                }
                _ => None,
            }
        }
    }
}

/// 全リソースのタブを作成
fn all_tabs(
    ctx: &ColumnContext,
    details: Option<&Sender<Detail>>,
    searchable: bool,
) -> Vec<Box<dyn BrowseTab>> {
    Resource::all()
        .iter()
        .map(|resource| -> Box<dyn BrowseTab> {
            let tx = details.cloned();
            match resource {
                Resource::Clients => Box::new(ResourceTab::<Client>::new(ctx, tx, searchable)),
                Resource::Projects => Box::new(ResourceTab::<Project>::new(ctx, tx, searchable)),
                Resource::Contracts => Box::new(ResourceTab::<Contract>::new(ctx, tx, searchable)),
                Resource::Payments => Box::new(ResourceTab::<Payment>::new(ctx, tx, searchable)),
                Resource::Invoices => Box::new(ResourceTab::<Invoice>::new(ctx, tx, searchable)),
                Resource::Maintenances => {
                    Box::new(ResourceTab::<Maintenance>::new(ctx, tx, searchable))
                }
                Resource::Users => Box::new(ResourceTab::<User>::new(ctx, tx, searchable)),
            }
        })
        .collect()
}

// ============================================================================
// update（状態更新）
// ============================================================================

/// メッセージに応じて状態を更新
pub fn update(model: &mut Model, msg: Msg) {
    // エラー表示中は終了以外を受け付けない
    if model.error.is_some() && msg != Msg::Quit {
        return;
    }

    match msg {
        Msg::Quit => {
            model.session.logout();
            model.should_quit = true;
        }
        Msg::NextTab => {
            model.search_focused = false;
            if !model.tabs.is_empty() {
                model.current = (model.current + 1) % model.tabs.len();
                model.selected = 0;
            }
        }
        Msg::PrevTab => {
            model.search_focused = false;
            if !model.tabs.is_empty() {
                model.current = (model.current + model.tabs.len() - 1) % model.tabs.len();
                model.selected = 0;
            }
        }
        Msg::SearchFocus => {
            // 読み込み中・検索無効時は検索できない
            if model.tab().is_some_and(|t| t.is_searchable() && !t.is_loading()) {
                model.search_focused = true;
            }
        }
        Msg::SearchUnfocus => model.search_focused = false,
        Msg::SearchInput(c) => {
            if let Some(tab) = model.tab_mut() {
                tab.push_search(c);
            }
            clamp_selection(model);
        }
        Msg::SearchBackspace => {
            if let Some(tab) = model.tab_mut() {
                tab.pop_search();
            }
            clamp_selection(model);
        }
        Msg::SearchClear => {
            if let Some(tab) = model.tab_mut() {
                tab.clear_search();
            }
            clamp_selection(model);
        }
        Msg::Up => model.selected = model.selected.saturating_sub(1),
        Msg::Down => {
            if model.selected + 1 < model.row_count() {
                model.selected += 1;
            }
        }
        Msg::ToggleSort(index) => {
            if let Some(tab) = model.tabs.get_mut(model.current) {
                tab.toggle_sort_at(index);
            }
        }
        Msg::Activate => {
            let index = model.selected;
            if let Some(tab) = model.tabs.get_mut(model.current) {
                if tab.activate(model.db.as_ref(), index) {
                    model.detail = model.detail_rx.try_recv().ok();
                }
            }
        }
        Msg::CloseDetail => model.detail = None,
    }
}

/// 検索語の変更後に選択位置を表示行数に収める
fn clamp_selection(model: &mut Model) {
    let len = model.row_count();
    if model.selected >= len {
        model.selected = len.saturating_sub(1);
    }
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
