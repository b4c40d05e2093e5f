//! TUI (Terminal User Interface)
//!
//! リソースをタブで切り替えながら検索・ソートできるテーブルブラウザ。
//!
//! ## モジュール構成
//!
//! - `app`: アプリケーション状態（Model, Msg, update）
//! - `tab`: リソースごとのテーブルビュー
//! - `render`: 画面描画

mod app;
mod render;
mod tab;

use crate::domain::Resource;
use crate::store::Database;
use app::Model;
use chrono::Utc;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::{self, stdout, Stdout};
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// 入力待ちのポーリング間隔
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// ブラウザの起動オプション
#[derive(Debug, Clone)]
pub struct Options {
    pub username: Option<String>,
    /// 指定時は資格情報を検証してログインする
    pub password: Option<String>,
    pub ttl: chrono::Duration,
    /// 最初に開くタブ
    pub initial: Option<Resource>,
    /// 検索欄を使えるか
    pub searchable: bool,
    /// Enter で詳細パネルを開けるか
    pub details: bool,
}

/// TUI を実行
///
/// `loaded` から読み込み結果を受け取るまではスケルトン表示になる。
pub fn run(loaded: Receiver<Result<Database, String>>, options: Options) -> io::Result<()> {
    // ターミナル設定
    terminal::enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut model = Model::new(options);
    let result = event_loop(&mut terminal, &mut model, &loaded);

    // ターミナルを復元
    terminal::disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    model: &mut Model,
    loaded: &Receiver<Result<Database, String>>,
) -> io::Result<()> {
    while !model.should_quit {
        if !model.is_loading() {
            model.check_session(Utc::now());
        }
        terminal.draw(|f| render::draw(f, model))?;

        if model.is_loading() {
            if let Ok(result) = loaded.try_recv() {
                model.on_loaded(result, Utc::now());
                continue;
            }
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                if let Some(msg) = model.key_to_msg(key.code) {
                    app::update(model, msg);
                }
            }
        }
    }
    Ok(())
}
