//! ソートロジック
//!
//! 列の自然順序による安定ソート。降順は比較関数を反転させて実現するため、
//! 同値キーの相対順序はフィルタ後の順序のまま保たれる。

use super::column::Column;
use super::value::Value;

/// ソート方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// 反転した方向
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// ヘッダに表示するインジケータ
    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// ソート指定（アクティブな列キーと方向）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDirective {
    pub key: String,
    pub direction: SortDirection,
}

impl SortDirective {
    /// 昇順の指定を作成
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// 降順の指定を作成
    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// 行をソートした新しい列を返す
///
/// - `directive` が `None` なら入力順のまま返却
/// - 指定キーの列がない、またはソート不可の場合も入力順のまま返却
pub fn sort_records<'a, R>(
    rows: &[&'a R],
    columns: &[Column<R>],
    directive: Option<&SortDirective>,
) -> Vec<&'a R> {
    let Some(directive) = directive else {
        return rows.to_vec();
    };
    let Some(column) = columns
        .iter()
        .find(|c| c.key() == directive.key && c.is_sortable())
    else {
        log::debug!("sort key `{}` not in current columns; keeping order", directive.key);
        return rows.to_vec();
    };

    let mut keyed: Vec<(Value, &'a R)> = rows.iter().map(|r| (column.value(r), *r)).collect();
    // slice::sort_by は安定ソート
    keyed.sort_by(|(a, _), (b, _)| {
        let ord = a.compare(b);
        match directive.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    keyed.into_iter().map(|(_, r)| r).collect()
}

#[cfg(test)]
#[path = "sort_test.rs"]
mod tests;
