//! レコードの抽象

use super::value::Value;

/// テーブルに表示される 1 行分のデータ
///
/// エンジンはスキーマを仮定しない。検索は `fields()` が返す全フィールドを対象とし、
/// 列ごとの値は `Column` のアクセサで取り出す。
pub trait Record {
    /// フィールド名と値の一覧（宣言順）
    fn fields(&self) -> Vec<(&'static str, Value)>;
}
