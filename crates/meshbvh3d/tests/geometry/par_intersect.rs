use super::mesh_generators::{random_ray, sphere};
use meshbvh3d::math::Real;
use meshbvh3d::partitioning::MeshBvh;

#[test]
fn parallel_queries_match_sequential_ones() {
    let vertices = sphere(16, 32);
    let mut bvh = MeshBvh::new();
    bvh.build(&vertices[..], vertices.len() / 3, 4).unwrap();

    let mut rng = oorandom::Rand32::new(7);
    let rays: Vec<_> = (0..1000).map(|_| random_ray(&mut rng, 5.0)).collect();
    let hits = bvh.par_intersect(&rays, 0.0, Real::MAX);

    assert_eq!(hits.len(), rays.len());
    for (ray, hit) in rays.iter().zip(hits.iter()) {
        assert_eq!(bvh.intersect(ray, 0.0, Real::MAX), *hit);
    }
}
