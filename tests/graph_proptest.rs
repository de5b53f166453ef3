use proptest::prelude::*;
use sortledton::{GraphConfig, GraphError, Representation, SortledtonGraph, BLOCK_SIZE};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
enum Operation {
    InsertVertex(u8),
    DeleteVertex(u8),
    InsertEdge(u8, u8),
    DeleteEdge(u8, u8),
}

#[derive(Default)]
struct Model {
    adjacency: BTreeMap<u8, BTreeSet<u8>>,
}

impl Model {
    fn insert_vertex(&mut self, v: u8) -> bool {
        if self.adjacency.contains_key(&v) {
            return false;
        }
        self.adjacency.insert(v, BTreeSet::new());
        true
    }

    fn delete_vertex(&mut self, v: u8) -> bool {
        let Some(neighbors) = self.adjacency.remove(&v) else {
            return false;
        };
        for n in neighbors {
            if let Some(set) = self.adjacency.get_mut(&n) {
                set.remove(&v);
            }
        }
        true
    }

    fn insert_edge(&mut self, a: u8, b: u8) {
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
    }

    fn delete_edge(&mut self, a: u8, b: u8) -> bool {
        if !self.adjacency.contains_key(&a) || !self.adjacency.contains_key(&b) {
            return false;
        }
        if let Some(set) = self.adjacency.get_mut(&a) {
            set.remove(&b);
        }
        if let Some(set) = self.adjacency.get_mut(&b) {
            set.remove(&a);
        }
        true
    }
}

fn operations() -> impl Strategy<Value = Vec<Operation>> {
    // A narrow id range keeps collisions frequent; a hub id gets pushed past the
    // layout threshold.
    let id = prop_oneof![0u8..40, Just(200u8)];
    proptest::collection::vec(
        prop_oneof![
            1 => id.clone().prop_map(Operation::InsertVertex),
            1 => id.clone().prop_map(Operation::DeleteVertex),
            8 => (id.clone(), 0u8..200).prop_map(|(a, b)| Operation::InsertEdge(a, b)),
            3 => (id.clone(), id).prop_map(|(a, b)| Operation::DeleteEdge(a, b)),
        ],
        1..400,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn graph_matches_adjacency_model(ops in operations()) {
        let mut model = Model::default();
        let mut graph = SortledtonGraph::<u8>::with_config(
            GraphConfig::default()
                .with_initial_capacity(4)
                .with_check_invariants(false),
        );

        for op in ops {
            match op {
                Operation::InsertVertex(v) => {
                    let fresh = model.insert_vertex(v);
                    let res = graph.insert_vertex(v);
                    prop_assert_eq!(res.is_ok(), fresh);
                    if !fresh {
                        prop_assert!(matches!(res, Err(GraphError::DuplicateVertex(_))));
                    }
                }
                Operation::DeleteVertex(v) => {
                    prop_assert_eq!(graph.delete_vertex(&v).is_ok(), model.delete_vertex(v));
                }
                Operation::InsertEdge(a, b) => {
                    model.insert_edge(a, b);
                    graph.insert_edge(a, b).unwrap();
                }
                Operation::DeleteEdge(a, b) => {
                    prop_assert_eq!(graph.delete_edge(&a, &b).is_ok(), model.delete_edge(a, b));
                }
            }
            prop_assert_eq!(graph.validate(), Ok(()));
        }

        prop_assert_eq!(graph.vertex_count(), model.adjacency.len());
        for (v, expected) in &model.adjacency {
            let neighbors = graph.neighbors(v).unwrap();
            prop_assert_eq!(&neighbors, &expected.iter().copied().collect::<Vec<_>>());
            let layout = if expected.len() >= BLOCK_SIZE {
                Representation::Large
            } else {
                Representation::Small
            };
            prop_assert_eq!(graph.representation(v).unwrap(), layout);
            for n in expected {
                prop_assert!(graph.find_edge(n, v));
            }
        }
        for (slot, v) in graph.vertices().enumerate() {
            prop_assert_eq!(graph.physical_id(v), Some(slot));
        }
    }
}
