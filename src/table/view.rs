//! テーブルビュー本体
//!
//! 検索語とソート指定をビューごとに保持し、呼び出し元が所有するレコード列から
//! 表示用の射影を作る。レコード列自体は保持しない。

use super::column::Column;
use super::filter::filter_records;
use super::record::Record;
use super::sort::{sort_records, SortDirection, SortDirective};
use super::value::Cell;

/// ローディング中に表示するプレースホルダ行数
pub const PLACEHOLDER_ROWS: usize = 5;

/// 行アクティベート時のコールバック
pub type ActivateFn<R> = Box<dyn FnMut(&R) + Send>;

// ============================================================================
// 射影
// ============================================================================

/// 列ヘッダ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub key: String,
    pub title: String,
    pub sortable: bool,
    /// この列がアクティブなソート列ならその方向
    pub direction: Option<SortDirection>,
}

impl Header {
    /// ソートインジケータ付きのラベル
    pub fn label(&self) -> String {
        match self.direction {
            Some(direction) => format!("{} {}", self.title, direction.indicator()),
            None => self.title.clone(),
        }
    }
}

/// 描画用の 1 行
#[derive(Debug)]
pub struct ProjectedRow<'a, R> {
    pub record: &'a R,
    /// 列定義の順に並んだセル
    pub cells: Vec<Cell>,
}

/// ビューの表示状態
#[derive(Debug)]
pub enum Projection<'a, R> {
    /// データ読み込み中（スケルトン表示）
    Loading { placeholder_rows: usize },
    /// 表示する行がない
    Empty,
    /// 表示する行
    Rows(Vec<ProjectedRow<'a, R>>),
}

impl<'a, R> Projection<'a, R> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Projection::Loading { .. })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Projection::Empty)
    }

    /// 表示行（ローディング中・空の場合は空スライス）
    pub fn rows(&self) -> &[ProjectedRow<'a, R>] {
        match self {
            Projection::Rows(rows) => rows,
            _ => &[],
        }
    }
}

// ============================================================================
// TableView
// ============================================================================

/// ソート・検索可能なテーブルビュー
pub struct TableView<R> {
    columns: Vec<Column<R>>,
    search: String,
    sort: Option<SortDirective>,
    searchable: bool,
    loading: bool,
    on_activate: Option<ActivateFn<R>>,
}

impl<R: Record> TableView<R> {
    /// 新しいビューを作成（検索可能、ローディングなし、ソートなし）
    pub fn new(columns: Vec<Column<R>>) -> Self {
        Self {
            columns,
            search: String::new(),
            sort: None,
            searchable: true,
            loading: false,
            on_activate: None,
        }
    }

    /// 検索ボックスの有効/無効を設定
    pub fn with_searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// ローディング状態を設定
    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// 行アクティベート時のコールバックを設定
    pub fn on_activate<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&R) + Send + 'static,
    {
        self.on_activate = Some(Box::new(callback));
        self
    }

    /// 列定義を差し替える
    ///
    /// ソート指定は保持される。新しい列定義にそのキーがなければソートは行われない。
    pub fn set_columns(&mut self, columns: Vec<Column<R>>) {
        self.columns = columns;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    // ------------------------------------------------------------------------
    // 検索操作
    // ------------------------------------------------------------------------

    fn search_enabled(&self) -> bool {
        self.searchable && !self.loading
    }

    /// 検索語を設定（変更できた場合 true）
    pub fn set_search(&mut self, term: impl Into<String>) -> bool {
        if !self.search_enabled() {
            return false;
        }
        self.search = term.into();
        true
    }

    /// 検索語に 1 文字追加
    pub fn push_search(&mut self, c: char) -> bool {
        if !self.search_enabled() {
            return false;
        }
        self.search.push(c);
        true
    }

    /// 検索語の末尾 1 文字を削除
    pub fn pop_search(&mut self) -> bool {
        if !self.search_enabled() {
            return false;
        }
        self.search.pop().is_some()
    }

    /// 検索語をクリア
    pub fn clear_search(&mut self) -> bool {
        if !self.search_enabled() || self.search.is_empty() {
            return false;
        }
        self.search.clear();
        true
    }

    // ------------------------------------------------------------------------
    // ソート操作
    // ------------------------------------------------------------------------

    /// 保持しているソート指定（列定義に存在しない可能性がある）
    pub fn sort_directive(&self) -> Option<&SortDirective> {
        self.sort.as_ref()
    }

    /// 現在の列定義で有効なソート指定
    pub fn active_sort(&self) -> Option<&SortDirective> {
        self.sort_directive().filter(|d| {
            self.columns
                .iter()
                .any(|c| c.key() == d.key && c.is_sortable())
        })
    }

    /// 列キーでソートを切り替える（状態が変わった場合 true）
    ///
    /// - 別の列: `(key, 昇順)` に置き換え
    /// - 同じ列: 方向を反転（解除はしない）
    /// - ソート不可・未知の列、ローディング中: 何もしない
    pub fn toggle_sort(&mut self, key: &str) -> bool {
        if self.loading {
            return false;
        }
        let sortable = self
            .columns
            .iter()
            .any(|c| c.key() == key && c.is_sortable());
        if !sortable {
            log::debug!("ignoring sort toggle on non-sortable column `{key}`");
            return false;
        }

        self.sort = Some(match self.sort.take() {
            Some(current) if current.key == key => SortDirective {
                key: current.key,
                direction: current.direction.flipped(),
            },
            _ => SortDirective::ascending(key),
        });
        true
    }

    /// 列インデックスでソートを切り替える
    pub fn toggle_sort_at(&mut self, index: usize) -> bool {
        match self.columns.get(index) {
            Some(column) => {
                let key = column.key().to_string();
                self.toggle_sort(&key)
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------------
    // 射影
    // ------------------------------------------------------------------------

    /// 列ヘッダ一覧
    pub fn headers(&self) -> Vec<Header> {
        let active = self.active_sort();
        self.columns
            .iter()
            .map(|c| Header {
                key: c.key().to_string(),
                title: c.header().to_string(),
                sortable: c.is_sortable(),
                direction: active
                    .filter(|d| d.key == c.key())
                    .map(|d| d.direction),
            })
            .collect()
    }

    /// 表示順の行（`sort(filter(source))`）
    pub fn rows<'a>(&self, source: &'a [R]) -> Vec<&'a R> {
        let filtered = filter_records(source, &self.search);
        sort_records(&filtered, &self.columns, self.sort_directive())
    }

    /// 表示状態を作る
    pub fn project<'a>(&self, source: &'a [R]) -> Projection<'a, R> {
        if self.loading {
            return Projection::Loading {
                placeholder_rows: PLACEHOLDER_ROWS,
            };
        }

        let rows = self.rows(source);
        if rows.is_empty() {
            return Projection::Empty;
        }

        Projection::Rows(
            rows.into_iter()
                .map(|record| ProjectedRow {
                    record,
                    cells: self.columns.iter().map(|c| c.render(record)).collect(),
                })
                .collect(),
        )
    }

    // ------------------------------------------------------------------------
    // 行アクティベート
    // ------------------------------------------------------------------------

    /// 行がクリック可能か
    pub fn rows_interactive(&self) -> bool {
        self.on_activate.is_some()
    }

    /// レコードでコールバックを呼び出す（呼び出した場合 true）
    pub fn activate(&mut self, record: &R) -> bool {
        if self.loading {
            return false;
        }
        match self.on_activate.as_mut() {
            Some(callback) => {
                callback(record);
                true
            }
            None => false,
        }
    }

    /// 表示順で `index` 番目の行をアクティベート
    pub fn activate_at(&mut self, source: &[R], index: usize) -> bool {
        if self.loading || self.on_activate.is_none() {
            return false;
        }
        let rows = self.rows(source);
        match rows.get(index) {
            Some(record) => self.activate(record),
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
