//! ブラウザ TUI の描画処理

use super::app::Model;
use super::tab::{TableBody, TableSnapshot};
use crate::auth::Session;
use crate::table::{Cell, Tone};
use ratatui::prelude::*;
use ratatui::widgets::{
    Block, Borders, Cell as WidgetCell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap,
};

/// 画面中央の領域を計算
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// UI をレンダリング
pub(super) fn draw(f: &mut Frame, model: &Model) {
    f.render_widget(Clear, f.area());

    // レイアウト（タブ + 検索 + テーブル + ヘルプ）
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // タブバー
            Constraint::Length(1), // 検索
            Constraint::Min(3),    // テーブル
            Constraint::Length(1), // ヘルプ
        ])
        .split(f.area());

    // タブバー
    let tab_titles: Vec<&str> = model.tabs.iter().map(|t| t.resource().title()).collect();
    let tabs = Tabs::new(tab_titles)
        .select(model.current)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" | ");
    f.render_widget(tabs, chunks[0]);

    render_search(f, model, chunks[1]);

    match (&model.error, model.tab()) {
        (Some(error), _) => render_error(f, error, chunks[2]),
        (None, Some(tab)) => {
            let snapshot = tab.snapshot(model.db.as_ref());
            let title = format!(
                " {} ({}) · {} ",
                tab.resource().title(),
                snapshot.total,
                session_label(&model.session)
            );
            render_table(f, &snapshot, &title, model.selected, chunks[2]);
        }
        (None, None) => render_error(f, "Nothing to show for this role", chunks[2]),
    }

    let help = Paragraph::new(help_text(model)).style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[3]);

    if let Some(detail) = &model.detail {
        let lines: Vec<Line> = detail
            .fields
            .iter()
            .map(|(key, value)| {
                Line::from(vec![
                    Span::styled(format!("  {key}: "), Style::default().fg(Color::DarkGray)),
                    Span::raw(value.as_str()),
                ])
            })
            .collect();
        let area = centered_rect(70, lines.len() as u16 + 2, f.area());
        f.render_widget(Clear, area);
        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(format!(" {} ", detail.title))
                    .borders(Borders::ALL),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }
}

/// ヘルプ行
fn help_text(model: &Model) -> String {
    if model.error.is_some() {
        return " q: quit".to_string();
    }
    if model.detail.is_some() {
        return " Esc: close".to_string();
    }
    if model.search_focused {
        return " type to search · Esc: clear/back · Enter: done · Tab: switch".to_string();
    }

    let mut keys = vec!["Tab: switch", "↑/↓: move"];
    if model.tab().is_some_and(|t| t.is_searchable()) {
        keys.push("/: search");
    }
    keys.push("1-9: sort");
    if model.tab().is_some_and(|t| t.rows_interactive()) {
        keys.push("Enter: details");
    }
    keys.push("q: quit");
    format!(" {}", keys.join(" · "))
}

fn session_label(session: &Session) -> String {
    match session {
        Session::Authenticated(active) => {
            format!("{} ({})", active.name, active.role.display_name())
        }
        Session::Expired { username } => format!("{username} (expired)"),
        Session::Unauthenticated => "signing in…".to_string(),
    }
}

/// 検索欄
fn render_search(f: &mut Frame, model: &Model, area: Rect) {
    let term = model.tab().map(|t| t.search_term()).unwrap_or_default();
    let line = if model.is_loading() {
        Line::styled(" Loading…", Style::default().fg(Color::DarkGray))
    } else if model.search_focused {
        Line::from(vec![
            Span::styled(" / ", Style::default().fg(Color::Yellow)),
            Span::raw(term),
            Span::styled("█", Style::default().fg(Color::Yellow)),
        ])
    } else if model.tab().is_some_and(|t| !t.is_searchable()) {
        Line::styled(" search disabled", Style::default().fg(Color::DarkGray))
    } else if term.is_empty() {
        Line::styled(" / to search", Style::default().fg(Color::DarkGray))
    } else {
        Line::from(vec![
            Span::styled(" / ", Style::default().fg(Color::DarkGray)),
            Span::raw(term),
        ])
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_error(f: &mut Frame, message: &str, area: Rect) {
    let content = Paragraph::new(format!("\n  {message}"))
        .block(Block::default().title(" Error ").borders(Borders::ALL))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: false });
    f.render_widget(content, area);
}

/// テーブル本体
fn render_table(f: &mut Frame, snapshot: &TableSnapshot, title: &str, selected: usize, area: Rect) {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);

    let header = Row::new(snapshot.headers.iter().map(|h| {
        let style = if h.direction.is_some() {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        WidgetCell::from(h.label()).style(style)
    }));
    let widths = vec![Constraint::Fill(1); snapshot.headers.len().max(1)];

    let (rows, mut state): (Vec<Row>, TableState) = match &snapshot.body {
        TableBody::Loading { placeholder_rows } => {
            let skeleton = Style::default().fg(Color::DarkGray);
            let rows = (0..*placeholder_rows)
                .map(|_| {
                    Row::new(
                        snapshot
                            .headers
                            .iter()
                            .map(|_| WidgetCell::from("░░░░░░").style(skeleton)),
                    )
                })
                .collect();
            (rows, TableState::default())
        }
        TableBody::Empty => {
            let message = if snapshot.total == 0 {
                "  No data"
            } else {
                "  No records matched"
            };
            let paragraph = Paragraph::new(format!("\n{message}"))
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            f.render_widget(paragraph, area);
            return;
        }
        TableBody::Rows(rows) => {
            let rows = rows
                .iter()
                .map(|cells| Row::new(cells.iter().map(widget_cell)))
                .collect();
            (rows, TableState::default().with_selected(Some(selected)))
        }
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("> ");
    f.render_stateful_widget(table, area, &mut state);
}

fn widget_cell(cell: &Cell) -> WidgetCell<'_> {
    let style = match cell.tone {
        Tone::Plain => Style::default(),
        Tone::Positive => Style::default().fg(Color::Green),
        Tone::Info => Style::default().fg(Color::Blue),
        Tone::Warning => Style::default().fg(Color::Yellow),
        Tone::Negative => Style::default().fg(Color::Red),
    };
    WidgetCell::from(cell.text.as_str()).style(style)
}
