use proptest::prelude::*;
use sortledton::collections::sorted::{BlockListSet, LargeSet, SmallSet};
use sortledton::{Neighborhood, Representation};
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
enum Operation {
    Add(u16),
    Remove(u16),
    Contains(u16),
}

fn operations(max_key: u16) -> impl Strategy<Value = Vec<Operation>> {
    proptest::collection::vec(
        prop_oneof![
            3 => (0..max_key).prop_map(Operation::Add),
            2 => (0..max_key).prop_map(Operation::Remove),
            1 => (0..max_key).prop_map(Operation::Contains),
        ],
        1..600,
    )
}

proptest! {
    #[test]
    fn small_set_matches_btree_set(ops in operations(300)) {
        let mut model = BTreeSet::new();
        let mut set = SmallSet::new();
        for op in ops {
            match op {
                Operation::Add(k) => prop_assert_eq!(set.add(k).unwrap(), model.insert(k)),
                Operation::Remove(k) => prop_assert_eq!(set.remove(&k).unwrap(), model.remove(&k)),
                Operation::Contains(k) => prop_assert_eq!(set.contains(&k), model.contains(&k)),
            }
        }
        prop_assert_eq!(set.list(), model.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn large_set_matches_btree_set(ops in operations(2000)) {
        let mut model = BTreeSet::new();
        let mut set = LargeSet::new();
        for op in ops {
            match op {
                Operation::Add(k) => prop_assert_eq!(set.add(k).unwrap(), model.insert(k)),
                Operation::Remove(k) => prop_assert_eq!(set.remove(&k).unwrap(), model.remove(&k)),
                Operation::Contains(k) => prop_assert_eq!(set.contains(&k), model.contains(&k)),
            }
            prop_assert!(set.is_well_formed());
        }
        prop_assert_eq!(set.len(), model.len());
        prop_assert_eq!(set.list(), model.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn tiny_blocks_stay_bounded(ops in operations(64)) {
        let mut model = BTreeSet::new();
        let mut set: BlockListSet<u16, 4> = BlockListSet::new();
        for op in ops {
            match op {
                Operation::Add(k) => prop_assert_eq!(set.add(k).unwrap(), model.insert(k)),
                Operation::Remove(k) => prop_assert_eq!(set.remove(&k).unwrap(), model.remove(&k)),
                Operation::Contains(k) => prop_assert_eq!(set.contains(&k), model.contains(&k)),
            }
            prop_assert!(set.blocks().all(|block| !block.is_empty() && block.len() <= 4));
        }
        prop_assert_eq!(
            set.iter().copied().collect::<Vec<_>>(),
            model.into_iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn intersection_matches_model(
        left in proptest::collection::btree_set(0u32..500, 0..300),
        right in proptest::collection::btree_set(0u32..500, 0..300),
        left_large in any::<bool>(),
        right_large in any::<bool>(),
    ) {
        let build = |items: &BTreeSet<u32>, large: bool| {
            let mut hood = Neighborhood::new();
            for &x in items {
                hood.add(x).unwrap();
            }
            if large { hood.into_large() } else { hood }
        };
        let a = build(&left, left_large);
        let b = build(&right, right_large);
        prop_assert_eq!(
            a.representation() == Representation::Large,
            left_large
        );
        let expected: Vec<u32> = left.intersection(&right).copied().collect();
        prop_assert_eq!(a.intersect(&b), expected);
    }
}
