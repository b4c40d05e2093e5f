//! フィルタロジック
//!
//! レコード一覧を検索語で絞り込む。

use super::record::Record;

/// 検索語でレコードを絞り込む
///
/// - `term` が空なら全件を元の順序のまま返却
/// - case-insensitive な部分一致で、レコードの全フィールドの文字列表現を検索
pub fn filter_records<'a, R: Record>(source: &'a [R], term: &str) -> Vec<&'a R> {
    if term.is_empty() {
        return source.iter().collect();
    }

    let query = term.to_lowercase();
    source
        .iter()
        .filter(|record| matches_query(*record, &query))
        .collect()
}

fn matches_query<R: Record>(record: &R, query: &str) -> bool {
    record
        .fields()
        .iter()
        .any(|(_, value)| value.to_string().to_lowercase().contains(query))
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
