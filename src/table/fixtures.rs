//! テスト用のレコードと列定義

use super::{Column, Record, Value};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Item {
    pub name: String,
    pub n: f64,
}

impl Record for Item {
    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![("name", Value::from(&self.name)), ("n", Value::from(self.n))]
    }
}

pub(crate) fn item(name: &str, n: f64) -> Item {
    Item {
        name: name.to_string(),
        n,
    }
}

/// `[{B,2},{A,1},{C,2}]`
pub(crate) fn sample() -> Vec<Item> {
    vec![item("B", 2.0), item("A", 1.0), item("C", 2.0)]
}

pub(crate) fn columns() -> Vec<Column<Item>> {
    vec![
        Column::new("name", "Name", |i: &Item| Value::from(&i.name)).sortable(),
        Column::new("n", "N", |i: &Item| Value::from(i.n)).sortable(),
    ]
}

pub(crate) fn names(rows: &[&Item]) -> Vec<String> {
    rows.iter().map(|i| i.name.clone()).collect()
}
