use super::{Bvh, BvhNode};
use crate::bounding_volume::BoundingVolume;
use crate::shape::TriangleSource;

impl Bvh {
    /// Panics if the tree isn’t well-formed.
    ///
    /// The tree is well-formed if it is topologically correct (every node is reachable exactly
    /// once from the root, children are allocated in contiguous pairs, leaf ranges partition the
    /// triangle id array) and geometrically correct (the box of a parent contains the boxes of
    /// its children). The statistics must also match the actual tree.
    pub fn assert_well_formed(&self) {
        if self.nodes.is_empty() {
            assert!(self.triangle_indices.is_empty());
            return;
        }

        let mut node_seen = vec![false; self.nodes.len()];
        let mut triangle_seen = vec![false; self.triangle_indices.len()];
        let mut stack = vec![(0u32, 1u32)];
        let (mut leaves, mut inners, mut max_depth) = (0u32, 0u32, 0u32);

        while let Some((id, depth)) = stack.pop() {
            assert!(
                !core::mem::replace(&mut node_seen[id as usize], true),
                "Detected loop. Node {} visited twice.",
                id
            );
            max_depth = max_depth.max(depth);

            match &self.nodes[id as usize] {
                BvhNode::Leaf { first, count, .. } => {
                    leaves += 1;
                    assert!(*count > 0, "Empty leaf {}.", id);

                    for i in *first..*first + *count {
                        let tri = self.triangle_indices[i as usize];
                        assert!(
                            !core::mem::replace(&mut triangle_seen[tri as usize], true),
                            "Triangle {} referenced twice.",
                            tri
                        );
                    }
                }
                BvhNode::Inner { aabb, left, right } => {
                    inners += 1;
                    assert_eq!(*right, *left + 1, "Non-contiguous children of node {}.", id);
                    assert!(*left > id && (*right as usize) < self.nodes.len());
                    assert!(aabb.contains(self.nodes[*left as usize].aabb()));
                    assert!(aabb.contains(self.nodes[*right as usize].aabb()));
                    stack.push((*right, depth + 1));
                    stack.push((*left, depth + 1));
                }
            }
        }

        assert!(node_seen.iter().all(|seen| *seen), "Unreachable nodes.");
        assert!(
            triangle_seen.iter().all(|seen| *seen),
            "Triangles missing from the leaves."
        );
        assert!(self.nodes.len() < 2 * self.triangle_indices.len());
        assert_eq!(self.statistics.leaf_count, leaves);
        assert_eq!(self.statistics.inner_count, inners);
        assert_eq!(self.statistics.max_depth, max_depth);
        assert_eq!(
            self.statistics.triangle_count as usize,
            self.triangle_indices.len()
        );
    }

    /// Panics if a node's bounding box doesn't contain all the triangles below it.
    pub fn assert_encloses<S: TriangleSource + ?Sized>(&self, geometry: &S) {
        assert_eq!(geometry.num_triangles(), self.triangle_indices.len());

        for node in &self.nodes {
            if let Some(range) = node.leaf_range() {
                for id in &self.triangle_indices[range] {
                    let tri = geometry.triangle(*id);
                    for pt in tri.vertices() {
                        assert!(
                            node.aabb().contains_local_point(&pt),
                            "Vertex {:?} of triangle {} outside of its leaf.",
                            pt,
                            id
                        );
                    }
                }
            }
        }
    }
}
