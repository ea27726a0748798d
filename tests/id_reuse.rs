use planar_dcel::prelude::*;

fn n(id: u32) -> NodeId {
    NodeId(id)
}

#[test]
fn ids_are_unique_while_live() {
    let mut g = Graph::new();
    let a = g.new_node();
    let b = g.new_node();
    assert_ne!(a, b);
    g.add_node(n(5));
    let c = g.new_node();
    assert!(![a, b, n(5)].contains(&c));
    assert_eq!(g.node_count(), 4);
}

#[test]
#[should_panic(expected = "node ID collision")]
fn explicit_collision_panics() {
    let mut g = Graph::new();
    let a = g.new_node();
    g.add_node(a);
}

#[test]
fn removed_ids_come_back_for_new_entities() {
    let mut g = Graph::new();
    let f0 = g.add_face_auto(&[n(0), n(1), n(2)]).unwrap();
    let f1 = g.add_face_auto(&[n(2), n(1), n(3)]).unwrap();
    assert_eq!((f0, f1), (FaceId(0), FaceId(1)));

    g.remove_face(f0);
    assert_eq!(g.new_face_id(), f0);
    let f2 = g.add_face_auto(&[n(0), n(1), n(2)]).unwrap();
    assert_eq!(f2, f0);
    assert_eq!(g.halfedges_around(f2).unwrap().count(), 3);

    let e = g.edge_between(n(1), n(3)).unwrap();
    g.remove_edge(e);
    assert!(!g.has_face(f1));
    assert_eq!(g.new_edge_id(), e);
    let h = g.set_edge(g.new_edge_id(), n(3), n(0)).unwrap();
    assert_eq!(h.edge(), e);
    assert_eq!(g.edge_endpoints(e), Some((n(3), n(0))));
}

#[test]
fn explicit_edges_and_faces() {
    let mut g = Graph::new();
    for i in 0..4 {
        g.add_node(n(i));
    }
    let ring: Vec<HalfedgeId> = (0..4)
        .map(|i| g.set_edge(EdgeId(10 + i), n(i), n((i + 1) % 4)).unwrap())
        .collect();
    assert_eq!(g.edge_count(), 4);
    assert_eq!(g.new_edge_id(), EdgeId(0));

    let inner = g.set_face(FaceId(7), &ring).unwrap();
    let outer: Vec<HalfedgeId> = ring.iter().rev().map(|h| h.twin()).collect();
    let back = g.set_face(FaceId(8), &outer).unwrap();

    assert_eq!(g.face_count(), 2);
    for h in &ring {
        assert_eq!(g.halfedge_entity(*h).unwrap().face(), Some(inner));
        assert_eq!(g.halfedge_entity(h.twin()).unwrap().face(), Some(back));
    }
    assert_eq!(g.validate_invariants(), Ok(()));
}

#[test]
fn set_edge_refuses_missing_endpoints() {
    let mut g = Graph::new();
    g.add_node(n(0));
    assert_eq!(
        g.set_edge(EdgeId(0), n(0), n(1)),
        Err(DcelError::NodeNotPresent(n(1)))
    );
    assert_eq!(g.edge_count(), 0);
    assert_eq!(g.new_edge_id(), EdgeId(0));
}
