use crate::dcel_error::DcelError;
use crate::debug_invariants::DebugInvariants;
use crate::topology::entity::HalfedgeEntity;
use crate::topology::graph::Graph;
use crate::topology::handle::{FaceId, HalfedgeId, NodeId};
use crate::topology::validation::{ValidationOptions, ViolationHandling, validate_graph};

fn n(id: u32) -> NodeId {
    NodeId(id)
}

fn two_triangles() -> Graph {
    let mut g = Graph::new();
    g.add_face(FaceId(0), &[n(0), n(1), n(2)]).unwrap();
    g.add_face(FaceId(1), &[n(2), n(1), n(3)]).unwrap();
    g
}

#[test]
fn consistent_graph_validates() {
    let g = two_triangles();
    assert_eq!(validate_graph(&g, ValidationOptions::all()), Ok(()));
    assert_eq!(g.validate_invariants(), Ok(()));
}

#[test]
fn twin_mismatch_is_reported() {
    let mut g = two_triangles();
    g.halfedge_entity_mut(HalfedgeId(0))
        .unwrap()
        .set_twin(HalfedgeId(2));
    let err = validate_graph(&g, ValidationOptions::all()).unwrap_err();
    assert!(matches!(err, DcelError::TwinMismatch { .. }), "{err:?}");
}

#[test]
fn link_mismatch_is_reported() {
    let mut g = two_triangles();
    let h = g.halfedge(n(0), n(1)).unwrap();
    let wrong = g.halfedge(n(1), n(3)).unwrap();
    g.halfedge_entity_mut(h).unwrap().set_next(wrong);
    let err = validate_graph(&g, ValidationOptions::all()).unwrap_err();
    assert!(matches!(err, DcelError::LinkMismatch { .. }), "{err:?}");
}

#[test]
fn foreign_origin_breaks_rotation() {
    let mut g = Graph::new();
    g.add_edge(n(0), n(1)).unwrap();
    let h = g.add_edge(n(0), n(2)).unwrap();
    g.add_node(n(5));
    g.halfedge_entity_mut(h).unwrap().set_from(Some(n(5)));

    let only_rotations = ValidationOptions {
        check_rotations: true,
        ..Default::default()
    };
    let err = validate_graph(&g, only_rotations).unwrap_err();
    assert!(matches!(err, DcelError::RotationBroken { .. }), "{err:?}");
}

#[test]
fn unstamped_side_breaks_face_loop() {
    let mut g = two_triangles();
    let h = g.halfedge(n(1), n(3)).unwrap();
    g.halfedge_entity_mut(h).unwrap().set_face(None);

    let only_loops = ValidationOptions {
        check_face_loops: true,
        ..Default::default()
    };
    let err = validate_graph(&g, only_loops).unwrap_err();
    assert!(
        matches!(err, DcelError::FaceLoopBroken { face: FaceId(1), .. }),
        "{err:?}"
    );
    // Links see the same corruption as a face change along `next`.
    let err = validate_graph(&g, ValidationOptions::all()).unwrap_err();
    assert!(matches!(err, DcelError::LinkMismatch { .. }), "{err:?}");
}

#[test]
fn dangling_links_are_reported_even_with_checks_off() {
    let mut g = two_triangles();
    g.halfedge_entity_mut(HalfedgeId(0))
        .unwrap()
        .set_prev(HalfedgeId(77));
    let err = validate_graph(&g, ValidationOptions::default()).unwrap_err();
    assert!(matches!(err, DcelError::DanglingReference(_)), "{err:?}");
}

#[test]
fn registry_drift_is_reported() {
    let mut g = two_triangles();
    g.node_ids.release(n(3));
    assert_eq!(
        validate_graph(&g, ValidationOptions::all()),
        Err(DcelError::RegistryMismatch {
            kind: "node",
            issued: 3,
            live: 4
        })
    );
}

#[test]
fn unissued_face_id_is_reported() {
    let mut g = two_triangles();
    // Same number of issued ids, but face 0's id is back in the pool.
    g.face_ids.release(FaceId(0));
    g.face_ids.claim(FaceId(5));
    let only_registries = ValidationOptions {
        check_registries: true,
        ..Default::default()
    };
    assert_eq!(
        validate_graph(&g, only_registries),
        Err(DcelError::UnissuedId { kind: "face", id: 0 })
    );
}

#[test]
fn orphaned_halfedges_are_counted() {
    let mut g = two_triangles();
    let e = g.edge_between(n(0), n(1)).unwrap();
    g.edges.remove(&e);
    assert_eq!(
        validate_graph(&g, ValidationOptions::all()),
        Err(DcelError::HalfedgeCountMismatch {
            halfedges: 10,
            edges: 4
        })
    );
}

#[test]
fn warn_and_ignore_do_not_fail() {
    let mut g = two_triangles();
    g.halfedge_entity_mut(HalfedgeId(0))
        .unwrap()
        .set_twin(HalfedgeId(2));
    for handling in [ViolationHandling::Warn, ViolationHandling::Ignore] {
        let opts = ValidationOptions {
            on_violation: handling,
            ..ValidationOptions::all()
        };
        assert_eq!(validate_graph(&g, opts), Ok(()));
    }
}
