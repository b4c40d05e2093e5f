//! 汎用テーブルビューエンジン
//!
//! 任意のレコード列に対して検索・ソート・描画用の射影を提供する。
//!
//! ## モジュール構成
//!
//! - `value`: セル値と描画結果（`Value` / `Cell`）
//! - `record`: レコードの抽象（`Record`）
//! - `column`: 列定義（`Column`）
//! - `filter`: 全フィールド対象の部分一致フィルタ
//! - `sort`: 安定ソートとソート指定
//! - `view`: 検索語・ソート指定を保持するビュー本体
//!
//! 表示される行は常に `sort(filter(source))` であり、
//! どちらのステップも入力を変更しない。

mod column;
mod filter;
mod record;
mod sort;
mod value;
mod view;

pub use column::Column;
pub use filter::filter_records;
pub use record::Record;
pub use sort::{sort_records, SortDirection, SortDirective};
pub use value::{Cell, Tone, Value};
pub use view::{Header, Projection, ProjectedRow, TableView, PLACEHOLDER_ROWS};

#[cfg(test)]
#[path = "table/proptests.rs"]
mod proptests;

#[cfg(test)]
#[path = "table/fixtures.rs"]
pub(crate) mod fixtures;
