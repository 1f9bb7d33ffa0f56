use super::BvhStatistics;
use crate::bounding_volume::Aabb;
use crate::math::{Real, DEFAULT_BVH_MARGIN};
use core::ops::Range;

/// A node of a [`Bvh`].
///
/// Nodes are stored in a flat arena and reference each other by index. The two children of an
/// inner node are always allocated as a contiguous pair, so `right == left + 1`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum BvhNode {
    /// A node owning the triangle ids `triangle_indices[first..first + count]`.
    Leaf {
        /// The loosened bounding box of the triangles of this leaf.
        aabb: Aabb,
        /// Index of the first triangle id of this leaf in the permuted triangle id array.
        first: u32,
        /// The number of triangles in this leaf.
        count: u32,
    },
    /// A node with two children.
    Inner {
        /// The loosened bounding box of everything below this node.
        aabb: Aabb,
        /// Arena index of the left child.
        left: u32,
        /// Arena index of the right child.
        right: u32,
    },
}

impl BvhNode {
    /// The bounding box of this node.
    #[inline(always)]
    pub fn aabb(&self) -> &Aabb {
        match self {
            BvhNode::Leaf { aabb, .. } | BvhNode::Inner { aabb, .. } => aabb,
        }
    }

    /// Is this node a leaf?
    #[inline(always)]
    pub fn is_leaf(&self) -> bool {
        matches!(self, BvhNode::Leaf { .. })
    }

    /// The range of the permuted triangle id array owned by this node, if it is a leaf.
    #[inline]
    pub fn leaf_range(&self) -> Option<Range<usize>> {
        match *self {
            BvhNode::Leaf { first, count, .. } => {
                Some(first as usize..first as usize + count as usize)
            }
            BvhNode::Inner { .. } => None,
        }
    }

    /// The arena indices of the children of this node, if it is an inner node.
    #[inline]
    pub fn children(&self) -> Option<[u32; 2]> {
        match *self {
            BvhNode::Inner { left, right, .. } => Some([left, right]),
            BvhNode::Leaf { .. } => None,
        }
    }
}

/// Parameters controlling the construction of a [`Bvh`].
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use meshbvh3d::partitioning::BvhBuildParams;
///
/// let params = BvhBuildParams::new(4).with_max_depth(10);
/// assert_eq!(params.leaf_size_hint, 4);
/// assert_eq!(params.depth_limit(1_000_000), 10);
///
/// // Automatic limit based on the estimated number of leaves.
/// assert_eq!(BvhBuildParams::new(16).depth_limit(16), 28);
/// # }
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BvhBuildParams {
    /// Nodes with at most this many triangles become leaves.
    pub leaf_size_hint: usize,
    /// Margin added around every node bounding box.
    pub margin: Real,
    /// Nodes at this depth become leaves whatever their size. The root has a depth of 1.
    ///
    /// If `None`, the limit is derived from the estimated number of leaves, see
    /// [`BvhBuildParams::depth_limit`].
    pub max_depth: Option<u32>,
}

impl Default for BvhBuildParams {
    fn default() -> Self {
        Self {
            leaf_size_hint: 16,
            margin: DEFAULT_BVH_MARGIN,
            max_depth: None,
        }
    }
}

impl BvhBuildParams {
    /// Default parameters with the given leaf size hint.
    pub fn new(leaf_size_hint: usize) -> Self {
        Self {
            leaf_size_hint,
            ..Self::default()
        }
    }

    /// Sets the margin added around every node bounding box.
    pub fn with_margin(mut self, margin: Real) -> Self {
        self.margin = margin;
        self
    }

    /// Sets an explicit depth limit.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// The depth limit used when building a tree over `triangle_count` triangles.
    ///
    /// Without an explicit limit, a balanced tree with `L ≈ triangle_count / leaf_size_hint`
    /// leaves needs `1 + ceil(log2(L))` levels. Real trees are rarely balanced so the automatic
    /// limit is `2 * (13 + ceil(1 + log2(L)))`.
    pub fn depth_limit(&self, triangle_count: usize) -> u32 {
        if let Some(max_depth) = self.max_depth {
            return max_depth.max(1);
        }

        let estimated_leaves =
            (triangle_count as f64 / self.leaf_size_hint.max(1) as f64).round().max(1.0);
        2 * (13 + (1.0 + estimated_leaves.log2()).ceil() as u32)
    }
}

/// A bounding volume hierarchy over a set of triangles.
///
/// The tree doesn't own the triangles it indexes: it only stores triangle ids, and every query
/// takes the [`TriangleSource`](crate::shape::TriangleSource) the tree was built from. Use
/// [`MeshBvh`](crate::partitioning::MeshBvh) to have the borrow checker bind both together.
///
/// A `Bvh` is either unbuilt (its arena is empty) or built. A built tree is never mutated by
/// queries, so it can be shared between threads.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Bvh {
    pub(super) nodes: Vec<BvhNode>,
    pub(super) triangle_indices: Vec<u32>,
    pub(super) statistics: BvhStatistics,
}

impl Bvh {
    /// An unbuilt BVH.
    pub fn new() -> Self {
        Self::default()
    }

    /// Does this tree contain any node?
    #[inline]
    pub fn is_built(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Releases the arena and the triangle ids, going back to the unbuilt state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The node arena. The root, if any, is at index 0.
    #[inline]
    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    /// The node at the given arena index.
    #[inline]
    pub fn node(&self, id: u32) -> Option<&BvhNode> {
        self.nodes.get(id as usize)
    }

    /// The permuted triangle id array every leaf references a range of.
    #[inline]
    pub fn triangle_indices(&self) -> &[u32] {
        &self.triangle_indices
    }

    /// The ids of the triangles of the given leaf.
    ///
    /// Returns an empty slice if `node_id` isn't a leaf of this tree.
    pub fn leaf_triangles(&self, node_id: u32) -> &[u32] {
        self.node(node_id)
            .and_then(BvhNode::leaf_range)
            .map(|range| &self.triangle_indices[range])
            .unwrap_or(&[])
    }

    /// The bounding box of the root, or `None` if the tree is unbuilt.
    pub fn root_aabb(&self) -> Option<Aabb> {
        self.nodes.first().map(|root| *root.aabb())
    }

    /// The statistics of the last successful build.
    #[inline]
    pub fn statistics(&self) -> &BvhStatistics {
        &self.statistics
    }

    /// The number of leaves of this tree.
    pub fn leaf_count(&self) -> u32 {
        self.statistics.leaf_count
    }

    /// The depth of the sub-tree rooted at the node with index `node_id`. A single leaf has a
    /// depth of 1.
    pub fn subtree_depth(&self, node_id: u32) -> u32 {
        let mut max_depth = 0u32;
        let mut stack = vec![(node_id, 1u32)];

        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };

            max_depth = max_depth.max(depth);

            if let Some([left, right]) = node.children() {
                stack.push((left, depth + 1));
                stack.push((right, depth + 1));
            }
        }

        max_depth
    }

    /// An approximation of the memory usage (in bytes) for this struct plus
    /// the memory it allocates dynamically.
    pub fn total_memory_size(&self) -> usize {
        size_of::<Self>() + self.heap_memory_size()
    }

    /// An approximation of the memory dynamically-allocated by this struct.
    pub fn heap_memory_size(&self) -> usize {
        let Self {
            nodes,
            triangle_indices,
            statistics: _,
        } = self;
        nodes.capacity() * size_of::<BvhNode>() + triangle_indices.capacity() * size_of::<u32>()
    }
}
