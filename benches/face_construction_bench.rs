use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use planar_dcel::prelude::*;

fn nid(k: u32, r: u32, c: u32) -> NodeId {
    NodeId(r * (k + 1) + c)
}

/// A `k x k` grid of quads, each split into two consistently oriented
/// triangles, added row by row.
fn build_triangulated_grid(k: u32) -> Graph {
    let mut g = Graph::new();
    for r in 0..k {
        for c in 0..k {
            let (a, b) = (nid(k, r, c), nid(k, r, c + 1));
            let (cc, d) = (nid(k, r + 1, c + 1), nid(k, r + 1, c));
            g.add_face_auto(&[a, b, cc]).expect("grid triangle");
            g.add_face_auto(&[a, cc, d]).expect("grid triangle");
        }
    }
    g
}

fn bench_face_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("face_construction");

    for &k in &[16u32, 32u32] {
        group.bench_with_input(BenchmarkId::new("triangulated_grid", k), &k, |b, &k| {
            b.iter(|| {
                let g = build_triangulated_grid(k);
                black_box(g.face_count());
            });
        });

        let grid = build_triangulated_grid(k);
        group.bench_with_input(BenchmarkId::new("rotation_walk", k), &k, |b, _| {
            b.iter(|| {
                let total: usize = grid.nodes().map(|v| grid.degree(v)).sum();
                black_box(total);
            });
        });

        group.bench_with_input(BenchmarkId::new("face_cycle", k), &k, |b, _| {
            b.iter(|| {
                let mut g = grid.clone();
                let faces: Vec<FaceId> = g.faces().collect();
                for &f in &faces {
                    let corners: Vec<NodeId> = g.face_nodes(f).expect("live face").collect();
                    g.remove_face(f);
                    g.add_face(f, &corners).expect("refill");
                }
                black_box(g.face_count());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_face_construction);
criterion_main!(benches);
