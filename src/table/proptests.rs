use super::fixtures::{columns, Item};
use super::*;
use proptest::prelude::*;

fn item_strategy() -> impl Strategy<Value = Item> {
    ("[a-zA-Z]{0,6}", 0u8..5).prop_map(|(name, n)| Item {
        name,
        n: f64::from(n),
    })
}

fn items_strategy() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(item_strategy(), 0..20)
}

fn field_matches(item: &Item, term: &str) -> bool {
    let query = term.to_lowercase();
    item.fields()
        .iter()
        .any(|(_, v)| v.to_string().to_lowercase().contains(&query))
}

proptest! {
    /// 空の検索語では元の列と同一
    #[test]
    fn prop_empty_term_is_identity(source in items_strategy()) {
        let result = filter_records(&source, "");
        let expected: Vec<&Item> = source.iter().collect();
        prop_assert_eq!(result, expected);
    }

    /// 残ったレコードはすべて一致し、除外されたレコードは一致しない
    #[test]
    fn prop_filter_partitions_by_match(source in items_strategy(), term in "[a-zA-Z0-9]{1,2}") {
        let retained = filter_records(&source, &term);
        for item in &retained {
            prop_assert!(field_matches(item, &term));
        }
        let excluded = source
            .iter()
            .filter(|i| !retained.iter().any(|r| std::ptr::eq(*r, *i)));
        for item in excluded {
            prop_assert!(!field_matches(item, &term));
        }
    }

    /// 昇順ソートは安定（同値キーはフィルタ後の順序を保つ）
    #[test]
    fn prop_sort_is_stable(source in items_strategy(), descending in any::<bool>()) {
        let rows: Vec<&Item> = source.iter().collect();
        let directive = if descending {
            SortDirective::descending("n")
        } else {
            SortDirective::ascending("n")
        };
        let sorted = sort_records(&rows, &columns(), Some(&directive));
        prop_assert_eq!(sorted.len(), rows.len());

        for pair in sorted.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a.n == b.n {
                let pos_a = rows.iter().position(|r| std::ptr::eq(*r, a));
                let pos_b = rows.iter().position(|r| std::ptr::eq(*r, b));
                prop_assert!(pos_a < pos_b);
            } else if descending {
                prop_assert!(a.n > b.n);
            } else {
                prop_assert!(a.n < b.n);
            }
        }
    }

    /// 同じ指定での再ソートは結果を変えない
    #[test]
    fn prop_sort_is_idempotent(source in items_strategy()) {
        let rows: Vec<&Item> = source.iter().collect();
        let directive = SortDirective::ascending("name");
        let once = sort_records(&rows, &columns(), Some(&directive));
        let twice = sort_records(&once, &columns(), Some(&directive));
        prop_assert_eq!(once, twice);
    }

    /// ビューはソースを変更しない
    #[test]
    fn prop_view_does_not_mutate_source(source in items_strategy(), term in "[a-z]{0,2}") {
        let before = source.clone();
        let mut view = TableView::new(columns());
        view.set_search(term);
        view.toggle_sort("n");
        let _ = view.project(&source);
        prop_assert_eq!(source, before);
    }
}
