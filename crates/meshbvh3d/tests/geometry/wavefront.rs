use super::mesh_generators::{indexed_cube, plane};
use meshbvh3d::partitioning::MeshBvh;
use meshbvh3d::shape::TriangleSoup;

fn count_lines(path: &std::path::Path, prefix: &str) -> usize {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|line| line.starts_with(prefix))
        .count()
}

#[test]
fn soup_is_exported_unwelded() {
    let (corners, indices) = indexed_cube();
    let soup = TriangleSoup::from_indexed(&corners, &indices).unwrap();
    let path = std::env::temp_dir().join("meshbvh3d_soup_export.obj");

    soup.to_obj_file(&path).unwrap();

    assert_eq!(count_lines(&path, "v "), 36);
    assert_eq!(count_lines(&path, "f "), 12);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn leaf_is_exported() {
    let vertices = plane(4);
    let mut bvh = MeshBvh::new();
    bvh.build(&vertices[..], 32, 4).unwrap();

    let leaf = bvh.bvh().leaves(|_| true).next().unwrap();
    let leaf_len = bvh.leaf_triangles(leaf).len();
    let path = std::env::temp_dir().join("meshbvh3d_leaf_export.obj");

    bvh.bvh()
        .leaf_to_obj_file(&vertices[..], leaf, &path)
        .unwrap();

    assert_eq!(count_lines(&path, "v "), leaf_len * 3);
    assert_eq!(count_lines(&path, "f "), leaf_len);
    let _ = std::fs::remove_file(&path);
}
