//! リソースタブ
//!
//! リソース型ごとの `TableView` を、型を消したトレイトオブジェクトとして扱う。

use crate::domain::{ColumnContext, Resource, ResourceRecord};
use crate::store::Database;
use crate::table::{Cell, Header, Projection, TableView};
use std::sync::mpsc::Sender;

/// 詳細パネルの内容
#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub title: String,
    pub fields: Vec<(&'static str, String)>,
}

impl Detail {
    fn of<R: ResourceRecord>(record: &R) -> Self {
        Self {
            title: format!("{} · {}", R::RESOURCE.title(), record.id()),
            fields: record
                .fields()
                .into_iter()
                .map(|(key, value)| (key, value.to_string()))
                .collect(),
        }
    }
}

/// 描画用のテーブル本体
#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    Loading { placeholder_rows: usize },
    Empty,
    Rows(Vec<Vec<Cell>>),
}

/// 描画用のスナップショット
#[derive(Debug, Clone, PartialEq)]
pub struct TableSnapshot {
    pub headers: Vec<Header>,
    pub body: TableBody,
    /// 絞り込み前の件数
    pub total: usize,
}

/// ブラウザの 1 タブ
pub trait BrowseTab {
    fn resource(&self) -> Resource;
    fn is_loading(&self) -> bool;
    fn is_searchable(&self) -> bool;
    /// Enter で詳細を開けるか
    fn rows_interactive(&self) -> bool;
    fn search_term(&self) -> &str;
    fn push_search(&mut self, c: char) -> bool;
    fn pop_search(&mut self) -> bool;
    fn clear_search(&mut self) -> bool;
    fn toggle_sort_at(&mut self, index: usize) -> bool;

    /// 表示中の行数
    fn row_count(&self, db: Option<&Database>) -> usize;

    fn snapshot(&self, db: Option<&Database>) -> TableSnapshot;

    /// 表示順で `index` 番目の行をアクティベート
    fn activate(&mut self, db: Option<&Database>, index: usize) -> bool;

    /// 読み込み完了時に列定義を差し替えてローディングを解除
    fn load(&mut self, ctx: &ColumnContext);
}

/// リソース型 `R` のタブ
pub struct ResourceTab<R> {
    view: TableView<R>,
}

impl<R: ResourceRecord> ResourceTab<R> {
    /// ローディング状態で作成
    ///
    /// `details` があれば行のアクティベートで詳細を送る。
    pub fn new(placeholder: &ColumnContext, details: Option<Sender<Detail>>, searchable: bool) -> Self {
        let mut view = TableView::new(R::columns(placeholder))
            .with_loading(true)
            .with_searchable(searchable);
        if let Some(details) = details {
            view = view.on_activate(move |record: &R| {
                let _ = details.send(Detail::of(record));
            });
        }
        Self { view }
    }

    fn source(db: Option<&Database>) -> &[R] {
        match db {
            Some(db) => R::select(db),
            None => &[],
        }
    }
}

impl<R: ResourceRecord> BrowseTab for ResourceTab<R> {
    fn resource(&self) -> Resource {
        R::RESOURCE
    }

    fn is_loading(&self) -> bool {
        self.view.is_loading()
    }

    fn is_searchable(&self) -> bool {
        self.view.is_searchable()
    }

    fn rows_interactive(&self) -> bool {
        self.view.rows_interactive()
    }

    fn search_term(&self) -> &str {
        self.view.search_term()
    }

    fn push_search(&mut self, c: char) -> bool {
        self.view.push_search(c)
    }

    fn pop_search(&mut self) -> bool {
        self.view.pop_search()
    }

    fn clear_search(&mut self) -> bool {
        self.view.clear_search()
    }

    fn toggle_sort_at(&mut self, index: usize) -> bool {
        self.view.toggle_sort_at(index)
    }

    fn row_count(&self, db: Option<&Database>) -> usize {
        if self.view.is_loading() {
            return 0;
        }
        self.view.rows(Self::source(db)).len()
    }

    fn snapshot(&self, db: Option<&Database>) -> TableSnapshot {
        let source = Self::source(db);
        let body = match self.view.project(source) {
            Projection::Loading { placeholder_rows } => TableBody::Loading { placeholder_rows },
            Projection::Empty => TableBody::Empty,
            Projection::Rows(rows) => {
                TableBody::Rows(rows.into_iter().map(|row| row.cells).collect())
            }
        };
        TableSnapshot {
            headers: self.view.headers(),
            body,
            total: source.len(),
        }
    }

    fn activate(&mut self, db: Option<&Database>, index: usize) -> bool {
        self.view.activate_at(Self::source(db), index)
    }

    fn load(&mut self, ctx: &ColumnContext) {
        self.view.set_columns(R::columns(ctx));
        self.view.set_loading(false);
    }
}
