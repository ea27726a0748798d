use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::debug_invariants::DebugInvariants;
use crate::topology::entity::HalfedgeEntity;
use crate::topology::graph::Graph;
use crate::topology::handle::NodeId;

const NODES: u32 = 8;

/// Map iteration order is not reproducible, so candidates are sorted first.
fn pick<T: Copy + Ord>(rng: &mut SmallRng, items: impl Iterator<Item = T>) -> Option<T> {
    let mut all: Vec<T> = items.collect();
    all.sort_unstable();
    all.choose(rng).copied()
}

/// Applies one random mutation. Refusals are expected and ignored; any panic
/// fails the test.
fn step(g: &mut Graph, rng: &mut SmallRng) {
    let r: f64 = rng.r#gen();
    if r < 0.55 {
        let k = *[3usize, 3, 4, 5].choose(rng).unwrap();
        let mut ns: Vec<NodeId> = (0..NODES).map(NodeId).collect();
        ns.shuffle(rng);
        ns.truncate(k);
        let _ = g.add_face_auto(&ns);
    } else if r < 0.65 {
        let a = rng.gen_range(0..NODES);
        let b = (a + rng.gen_range(1..NODES)) % NODES;
        let _ = g.add_edge(NodeId(a), NodeId(b));
    } else if r < 0.8 {
        let f = pick(rng, g.faces());
        if let Some(f) = f {
            g.remove_face(f);
        }
    } else if r < 0.93 {
        let e = pick(rng, g.edges());
        if let Some(e) = e {
            g.remove_edge(e);
        }
    } else {
        let v = pick(rng, g.nodes());
        if let Some(v) = v {
            g.remove_node(v);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_random_mutations_keep_invariants(seed in any::<u64>(), steps in 1usize..80) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut g = Graph::new();
        for _ in 0..steps {
            step(&mut g, &mut rng);
            prop_assert_eq!(g.validate_invariants(), Ok(()));
            prop_assert_eq!(g.halfedge_count(), 2 * g.edge_count());
        }

        for f in g.faces().collect::<Vec<_>>() {
            let sides: Vec<_> = g.halfedges_around(f).unwrap().collect();
            prop_assert!(sides.len() >= 3);
            for h in sides {
                prop_assert_eq!(g.halfedge_entity(h).unwrap().face(), Some(f));
            }
        }
        for v in g.nodes().collect::<Vec<_>>() {
            for h in g.halfedges_from(v) {
                prop_assert_eq!(g.origin(h), Some(v));
                prop_assert!(g.halfedge(v, g.dest(h).unwrap()).is_some());
            }
        }
    }

    #[test]
    fn prop_face_round_trip_restores_edges(seed in any::<u64>(), steps in 1usize..40) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut g = Graph::new();
        for _ in 0..steps {
            step(&mut g, &mut rng);
        }
        let Some(f) = pick(&mut rng, g.faces()) else {
            return Ok(());
        };
        let corners: Vec<NodeId> = g.face_nodes(f).unwrap().collect();
        let edges_before = g.edge_count();

        g.remove_face(f);
        prop_assert_eq!(g.edge_count(), edges_before);
        prop_assert_eq!(g.add_face(f, &corners), Ok(f));
        prop_assert_eq!(g.edge_count(), edges_before);
        prop_assert_eq!(g.validate_invariants(), Ok(()));
    }
}
