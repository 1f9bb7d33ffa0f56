use crate::partitioning::Bvh;
use crate::shape::{Triangle, TriangleSoup, TriangleSource};
use obj::{Group, IndexTuple, ObjData, ObjError, Object, SimplePolygon};
use std::path::Path;

fn write_triangles(
    path: &Path,
    name: &str,
    triangles: impl ExactSizeIterator<Item = Triangle>,
) -> Result<(), ObjError> {
    let mut file = std::fs::File::create(path).map_err(ObjError::Io)?;
    let mut position = Vec::with_capacity(triangles.len() * 3);
    let mut polys = Vec::with_capacity(triangles.len());

    for tri in triangles {
        let first = position.len();
        #[allow(clippy::unnecessary_cast)]
        position.extend(
            tri.vertices()
                .iter()
                .map(|v| [v.x as f32, v.y as f32, v.z as f32]),
        );
        polys.push(SimplePolygon(vec![
            IndexTuple(first, None, None),
            IndexTuple(first + 1, None, None),
            IndexTuple(first + 2, None, None),
        ]));
    }

    ObjData {
        position,
        objects: vec![Object {
            groups: vec![Group {
                polys,
                name: name.to_string(),
                index: 0,
                material: None,
            }],
            name: name.to_string(),
        }],
        ..Default::default()
    }
    .write_to_buf(&mut file)
}

impl TriangleSoup {
    /// Outputs a Wavefront (`.obj`) file at the given path.
    ///
    /// Vertices are written as they are stored: three per triangle, not welded.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    pub fn to_obj_file(&self, path: &Path) -> Result<(), ObjError> {
        write_triangles(path, "", self.triangles())
    }
}

impl Bvh {
    /// Outputs the triangles of the leaf `node_id` in a Wavefront (`.obj`) file.
    ///
    /// Useful to look at forced leaves. A node that isn't a leaf gives an empty file.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    pub fn leaf_to_obj_file<S: TriangleSource + ?Sized>(
        &self,
        geometry: &S,
        node_id: u32,
        path: &Path,
    ) -> Result<(), ObjError> {
        let triangles = self
            .leaf_triangles(node_id)
            .iter()
            .map(|id| geometry.triangle(*id));
        write_triangles(path, &format!("leaf{}", node_id), triangles)
    }
}
