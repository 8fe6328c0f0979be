use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

/// Small alphabet so that duplicate keys are common.
fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[A-E]",
        1 => "[A-E][a-c]{0,2}",
        1 => Just(String::new()),
    ]
}

fn records_strategy(max: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec((key_strategy(), any::<u32>()), 0..=max).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (key, games))| Record {
                name: format!("p{i}"),
                games,
                ..Record::with_key(key)
            })
            .collect()
    })
}

fn names(records: &[Record]) -> Vec<String> {
    records.iter().map(|r| r.name.clone()).collect()
}

fn sorted_names(records: &[Record]) -> Vec<String> {
    let mut out = names(records);
    out.sort();
    out
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_cross_structure_equivalence(
        records in records_strategy(300),
        queries in prop::collection::vec(key_strategy(), 1..=10),
    ) {
        // Prime capacity above twice the record count: every key's probe
        // sequence reaches a free slot, so no build can fail.
        let config = Config { hash_capacity_factor: 1, min_hash_capacity: 1201, prime_hash_capacity: false };
        let indexes: Vec<_> = Structure::ALL
            .iter()
            .map(|st| st.build(&records, &config))
            .collect::<Result<_>>()
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let mut keys: Vec<String> = records.iter().map(|r| r.country.clone()).collect();
        keys.extend(queries);

        for key in &keys {
            let expected = linear::find_all(&records, key);
            for index in &indexes {
                let got = index.find_all(key);
                prop_assert_eq!(
                    sorted_names(&got),
                    sorted_names(&expected),
                    "{} disagrees on {:?}",
                    index.name(),
                    key
                );
                prop_assert!(got.iter().all(|r| r.key() == key.as_str()));
            }
        }
    }

    #[test]
    fn prop_tree_duplicates_in_insertion_order(records in records_strategy(300)) {
        let mut bst = BinarySearchTree::new();
        let mut rb = RedBlackTree::new();
        for r in &records {
            bst.insert(r.clone());
            rb.insert(r.clone());
        }

        let mut grouped: BTreeMap<&str, Vec<Record>> = BTreeMap::new();
        for r in &records {
            grouped.entry(r.key()).or_default().push(r.clone());
        }
        for (key, expected) in &grouped {
            prop_assert_eq!(names(&bst.find_all(key)), names(expected));
            prop_assert_eq!(names(&rb.find_all(key)), names(expected));
        }
    }

    #[test]
    fn prop_red_black_invariants(records in records_strategy(500)) {
        let mut rb = RedBlackTree::new();
        for (i, r) in records.iter().enumerate() {
            rb.insert(r.clone());
            // Full check is O(n); sample it during the build.
            if i % 37 == 0 {
                let issues = rb.verify_integrity();
                prop_assert!(issues.is_empty(), "after {} inserts: {:?}", i + 1, issues);
            }
        }
        let issues = rb.verify_integrity();
        prop_assert!(issues.is_empty(), "{:?}", issues);
        if !records.is_empty() {
            prop_assert_eq!(rb.root_color(), Some(Color::Black));
        }

        let n = records.len() as f64;
        prop_assert!(rb.height() as f64 <= 2.0 * (n + 1.0).log2() + f64::EPSILON);
    }

    #[test]
    fn prop_bst_ordering(records in records_strategy(300)) {
        let mut bst = BinarySearchTree::new();
        for r in &records {
            bst.insert(r.clone());
        }
        let issues = bst.verify_integrity();
        prop_assert!(issues.is_empty(), "{:?}", issues);

        let keys: Vec<&str> = bst.iter_sorted().map(Record::key).collect();
        prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(keys.len(), records.len());
    }

    #[test]
    fn prop_shape_determinism(records in records_strategy(200)) {
        let mut bst_a = BinarySearchTree::new();
        let mut bst_b = BinarySearchTree::new();
        let mut rb_a = RedBlackTree::new();
        let mut rb_b = RedBlackTree::new();
        for r in &records {
            bst_a.insert(r.clone());
            bst_b.insert(r.clone());
            rb_a.insert(r.clone());
            rb_b.insert(r.clone());
        }
        prop_assert_eq!(bst_a.shape(), bst_b.shape());
        prop_assert_eq!(rb_a.shape(), rb_b.shape());
    }

    #[test]
    fn prop_hash_collisions_reproducible(
        records in records_strategy(200),
        factor in 2usize..=4,
    ) {
        let config = Config { hash_capacity_factor: factor, ..Config::default() };
        let a = build_hash_table(&records, &config);
        let b = build_hash_table(&records, &config);
        match (a, b) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.collisions(), b.collisions());
                prop_assert_eq!(a.len(), records.len());
            }
            (Err(Error::ProbeExhausted { .. }), Err(Error::ProbeExhausted { .. })) => {}
            (a, b) => prop_assert!(false, "diverging builds: {:?} / {:?}", a.err(), b.err()),
        }
    }

    #[test]
    fn prop_hash_matches_linear_at_composite_capacity(
        records in records_strategy(200),
        factor in 2usize..=4,
        queries in prop::collection::vec(key_strategy(), 1..=5),
    ) {
        let config = Config { hash_capacity_factor: factor, ..Config::default() };
        let table = match build_hash_table(&records, &config) {
            Ok(table) => table,
            Err(Error::ProbeExhausted { .. }) => return Ok(()),
            Err(e) => return Err(TestCaseError::fail(e.to_string())),
        };

        let mut keys: Vec<String> = records.iter().map(|r| r.country.clone()).collect();
        keys.extend(queries);
        for key in &keys {
            prop_assert_eq!(
                sorted_names(&table.find_all(key)),
                sorted_names(&linear::find_all(&records, key)),
                "capacity {} disagrees on {:?}",
                table.capacity(),
                key
            );
        }
    }

    #[test]
    fn prop_default_config_never_repeats_records(key in key_strategy(), n in 1usize..=40) {
        let records: Vec<Record> = (0..n)
            .map(|i| Record { name: format!("p{i}"), ..Record::with_key(key.clone()) })
            .collect();
        let mut table = HashTable::with_capacity(Config::default().hash_capacity(n))
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let mut stored = Vec::new();
        for r in records {
            match table.insert(r.clone()) {
                Ok(()) => stored.push(r),
                Err(Error::ProbeExhausted { .. }) => {}
                Err(e) => return Err(TestCaseError::fail(e.to_string())),
            }
        }
        prop_assert_eq!(table.len(), stored.len());
        prop_assert_eq!(sorted_names(&table.find_all(&key)), sorted_names(&stored));
    }

    #[test]
    fn prop_duplicate_preservation(key in key_strategy(), n in 1usize..=100) {
        let records: Vec<Record> = (0..n)
            .map(|i| Record { games: i as u32, ..Record::with_key(key.clone()) })
            .collect();
        for structure in Structure::ALL {
            // Quadratic probing reaches few distinct slots for one key; give
            // the table a prime capacity comfortably above 2n.
            let config = Config { hash_capacity_factor: 1, min_hash_capacity: 401, prime_hash_capacity: false };
            let index = structure.build(&records, &config).map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(index.find_all(&key).len(), n, "{}", structure);
        }
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys = ["A", "B", "C", "D", "B", "A", "E"];

    for_each_permutation(&keys, |perm| {
        let records: Vec<Record> = perm
            .iter()
            .enumerate()
            .map(|(i, k)| Record {
                name: i.to_string(),
                ..Record::with_key(*k)
            })
            .collect();

        let mut rb = RedBlackTree::new();
        let mut bst = BinarySearchTree::new();
        for r in &records {
            rb.insert(r.clone());
            bst.insert(r.clone());
            assert!(rb.verify_integrity().is_empty(), "{perm:?}");
        }
        assert!(bst.verify_integrity().is_empty(), "{perm:?}");

        for key in ["A", "B", "C", "D", "E", "F"] {
            let expected = names(&linear::find_all(&records, key));
            assert_eq!(names(&rb.find_all(key)), expected, "{perm:?}");
            assert_eq!(names(&bst.find_all(key)), expected, "{perm:?}");
        }
    });
}
