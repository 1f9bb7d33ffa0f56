use crate::math::DIM;
use core::fmt;

/// Diagnostic counters collected while building a [`Bvh`](super::Bvh).
///
/// They are reset at the beginning of every build and never change afterwards.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BvhStatistics {
    /// The number of triangles indexed by the tree.
    pub triangle_count: u32,
    /// The number of leaves.
    pub leaf_count: u32,
    /// The number of inner nodes.
    pub inner_count: u32,
    /// The number of triangles of the biggest leaf.
    pub max_leaf_size: u32,
    /// The number of leaves holding more triangles than the leaf size hint.
    ///
    /// This happens when no axis can split the triangles of a node, or when the depth limit is
    /// reached.
    pub forced_leaf_count: u32,
    /// The number of forced leaves caused by the depth limit.
    pub depth_limited_leaf_count: u32,
    /// The depth of the deepest node. The root has a depth of 1.
    pub max_depth: u32,
    /// How many inner nodes were split along each axis.
    pub split_axis_histogram: [u32; DIM],
}

impl BvhStatistics {
    pub(super) fn record_leaf(&mut self, triangle_count: u32, forced: bool) {
        self.leaf_count += 1;
        self.forced_leaf_count += forced as u32;
        self.max_leaf_size = self.max_leaf_size.max(triangle_count);
    }

    pub(super) fn record_split(&mut self, axis: usize) {
        self.inner_count += 1;
        self.split_axis_histogram[axis] += 1;
    }

    /// The total number of nodes of the tree.
    pub fn node_count(&self) -> u32 {
        self.leaf_count + self.inner_count
    }
}

impl fmt::Display for BvhStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BVH statistics:")?;
        writeln!(
            f,
            "... {} triangles, depth {}",
            self.triangle_count, self.max_depth
        )?;
        writeln!(
            f,
            "... {} leaf nodes, {} inner nodes",
            self.leaf_count, self.inner_count
        )?;
        writeln!(f, "... maximum leaf size {}", self.max_leaf_size)?;
        writeln!(
            f,
            "... {} forced leafs ({} at maximum depth)",
            self.forced_leaf_count, self.depth_limited_leaf_count
        )?;
        write!(f, "... Split axis histogram:")?;
        for (axis, count) in self.split_axis_histogram.iter().enumerate() {
            write!(f, "\n... {} | {:5}", axis, count)?;
        }

        Ok(())
    }
}
