//! 列定義

use super::value::{Cell, Value};
use std::fmt;

/// フィールド値を取り出すアクセサ
pub type Accessor<R> = fn(&R) -> Value;

/// カスタムレンダラ（生の値とレコード全体から表示内容を作る）
pub type Renderer<R> = Box<dyn Fn(&Value, &R) -> Cell + Send + Sync>;

/// レコードの 1 フィールドに対する射影・表示ルール
pub struct Column<R> {
    key: String,
    header: String,
    sortable: bool,
    accessor: Accessor<R>,
    renderer: Option<Renderer<R>>,
}

impl<R> Column<R> {
    /// 新しい列を作成（ソート不可、レンダラなし）
    pub fn new(key: impl Into<String>, header: impl Into<String>, accessor: Accessor<R>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            sortable: false,
            accessor,
            renderer: None,
        }
    }

    /// ソート可能にする
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// カスタムレンダラを設定
    pub fn with_renderer<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&Value, &R) -> Cell + Send + Sync + 'static,
    {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// レコードから生の値を取り出す
    pub fn value(&self, record: &R) -> Value {
        (self.accessor)(record)
    }

    /// セルを描画
    ///
    /// レンダラがあればそれを、なければ値の既定の文字列表現を使う。
    pub fn render(&self, record: &R) -> Cell {
        let value = self.value(record);
        match &self.renderer {
            Some(renderer) => renderer(&value, record),
            None => Cell::plain(value.to_string()),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}
