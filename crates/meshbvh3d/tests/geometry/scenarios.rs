use super::mesh_generators::{cube, plane, random_ray, sphere};
use approx::assert_relative_eq;
use meshbvh3d::math::{Point, Real, Vector};
use meshbvh3d::partitioning::{BvhBuildParams, MeshBvh, TraversalCounters};
use meshbvh3d::query::Ray;

fn quad() -> Vec<Point<Real>> {
    vec![
        Point::new(-1.0, -1.0, 0.0),
        Point::new(1.0, -1.0, 0.0),
        Point::new(1.0, 1.0, 0.0),
        Point::new(-1.0, -1.0, 0.0),
        Point::new(1.0, 1.0, 0.0),
        Point::new(-1.0, 1.0, 0.0),
    ]
}

#[test]
fn ray_hits_the_center_of_a_quad() {
    let vertices = quad();
    let mut bvh = MeshBvh::new();
    bvh.build(&vertices[..], 2, 16).unwrap();

    let ray = Ray::new(Point::new(0.0, 0.0, 5.0), -Vector::z());
    let hit = bvh.intersect(&ray, 0.0, Real::MAX).unwrap();

    assert_eq!(hit.t, 5.0);
    assert_eq!(hit.point, Point::origin());
    assert!(hit.triangle_id < 2);
    assert!(hit.front_face);
    assert_eq!(hit.normal.map(|n| n.into_inner()), Some(Vector::z()));

    // A single leaf holds both triangles.
    let stats = bvh.get_statistics();
    assert_eq!(stats.triangle_count, 2);
    assert_eq!(stats.leaf_count, 1);
    assert_eq!(stats.inner_count, 0);
}

#[test]
fn small_leaves_split_the_cube() {
    let vertices = cube();
    let mut bvh = MeshBvh::new();
    bvh.build(&vertices[..], 12, 2).unwrap();

    let stats = *bvh.get_statistics();
    assert!(stats.inner_count >= 1);
    assert_eq!(stats.leaf_count, stats.inner_count + 1);
    assert_eq!(stats.node_count() as usize, bvh.bvh().nodes().len());
    bvh.bvh().assert_well_formed();

    let ray = Ray::new(Point::new(-5.0, 0.3, 0.2), Vector::x());
    let hit = bvh.intersect(&ray, 0.0, Real::MAX).unwrap();
    assert_relative_eq!(hit.t, 4.0);
}

#[test]
fn ray_missing_the_root_box_visits_one_node() {
    for vertices in [quad(), cube(), sphere(16, 16), plane(16)] {
        let mut bvh = MeshBvh::new();
        bvh.build(&vertices[..], vertices.len() / 3, 2).unwrap();

        let mut counters = TraversalCounters::default();
        let ray = Ray::new(Point::new(10.0, 10.0, 10.0), Vector::x());

        assert!(bvh
            .intersect_and_count(&ray, 0.0, Real::MAX, &mut counters)
            .is_none());
        assert_eq!(counters.nodes_visited, 1);
        assert_eq!(counters.triangles_tested, 0);
    }
}

#[test]
fn interval_bounds_are_honored() {
    let vertices = quad();
    let mut bvh = MeshBvh::new();
    bvh.build(&vertices[..], 2, 1).unwrap();

    let ray = Ray::new(Point::new(0.25, -0.5, 5.0), -Vector::z());

    assert!(bvh.intersect(&ray, 0.0, 4.0).is_none());
    assert!(bvh.intersect(&ray, 6.0, Real::MAX).is_none());
    assert!(bvh.intersect(&ray, 5.0, 5.0).is_some());
}

#[test]
fn nearest_of_stacked_quads_wins() {
    // Ten quads stacked along z, listed from the farthest to the nearest.
    let vertices: Vec<_> = (0..10)
        .flat_map(|i| {
            quad()
                .into_iter()
                .map(move |p| p + Vector::z() * i as Real)
        })
        .collect();
    let mut bvh = MeshBvh::new();
    bvh.build(&vertices[..], 20, 2).unwrap();

    let ray = Ray::new(Point::new(0.25, -0.5, 20.0), -Vector::z());
    let hit = bvh.intersect(&ray, 0.0, Real::MAX).unwrap();
    assert_relative_eq!(hit.t, 11.0);
    assert_eq!(hit.triangle_id, 18);

    let from_below = Ray::new(Point::new(0.25, -0.5, -1.0), Vector::z());
    let hit = bvh.intersect(&from_below, 0.0, Real::MAX).unwrap();
    assert_relative_eq!(hit.t, 1.0);
    assert_eq!(hit.triangle_id, 0);
    assert!(!hit.front_face);
}

#[test]
fn rebuilding_gives_the_same_tree_and_hits() {
    let vertices = sphere(10, 20);
    let mut bvh = MeshBvh::new();

    bvh.build(&vertices[..], vertices.len() / 3, 4).unwrap();
    let first = bvh.bvh().clone();
    bvh.build(&vertices[..], vertices.len() / 3, 4).unwrap();
    assert_eq!(&first, bvh.bvh());

    let mut rng = oorandom::Rand32::new(5);
    let rays: Vec<_> = (0..100).map(|_| random_ray(&mut rng, 3.0)).collect();
    let hits: Vec<_> = rays
        .iter()
        .map(|ray| bvh.intersect(ray, 0.0, Real::MAX))
        .collect();

    bvh.destroy();
    bvh.build(&vertices[..], vertices.len() / 3, 4).unwrap();

    for (ray, hit) in rays.iter().zip(hits.iter()) {
        assert_eq!(bvh.intersect(ray, 0.0, Real::MAX), *hit);
    }
}

#[test]
fn depth_limit_keeps_queries_correct() {
    let vertices = sphere(16, 32);
    let mut bvh = MeshBvh::new();
    bvh.build_with_params(&vertices[..], &BvhBuildParams::new(1).with_max_depth(4))
        .unwrap();

    let stats = *bvh.get_statistics();
    assert!(stats.max_depth <= 4);
    assert!(stats.depth_limited_leaf_count > 0);
    assert!(stats.forced_leaf_count >= stats.depth_limited_leaf_count);
    bvh.bvh().assert_well_formed();

    let mut rng = oorandom::Rand32::new(6);

    for _ in 0..200 {
        let ray = random_ray(&mut rng, 5.0);
        let fast = bvh.intersect(&ray, 0.0, Real::MAX).map(|hit| hit.t);
        let slow = bvh
            .intersect_brute_force(&ray, 0.0, Real::MAX, Default::default())
            .map(|hit| hit.t);
        assert_eq!(fast.is_some(), slow.is_some());

        if let (Some(fast), Some(slow)) = (fast, slow) {
            assert_relative_eq!(fast, slow, epsilon = 1.0e-4);
        }
    }
}

#[test]
fn leaves_along_the_ray_contain_the_hit() {
    let vertices = plane(16);
    let mut bvh = MeshBvh::new();
    bvh.build(&vertices[..], vertices.len() / 3, 2).unwrap();

    let ray = Ray::new(Point::new(0.3, 0.4, 2.0), -Vector::z());
    let hit = bvh.intersect(&ray, 0.0, Real::MAX).unwrap();

    assert!(bvh
        .leaves_intersecting_ray(&ray, 0.0, Real::MAX)
        .any(|leaf| bvh.leaf_triangles(leaf).contains(&hit.triangle_id)));
}
