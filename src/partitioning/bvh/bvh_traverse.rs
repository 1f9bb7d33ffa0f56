use super::{Bvh, BvhNode};
use smallvec::SmallVec;

pub(super) const TRAVERSAL_STACK_SIZE: usize = 32;

/// Iterator through the leaves of a [`Bvh`] accepted by a node predicate.
///
/// Yields arena indices of leaf nodes, in depth-first order, left child first.
pub struct Leaves<'a, Check: Fn(&BvhNode) -> bool> {
    tree: &'a Bvh,
    next: Option<u32>,
    stack: SmallVec<[u32; TRAVERSAL_STACK_SIZE]>,
    check: Check,
}

impl<'a, Check: Fn(&BvhNode) -> bool> Leaves<'a, Check> {
    fn new(tree: &'a Bvh, check: Check) -> Leaves<'a, Check> {
        let next = tree.nodes.first().filter(|root| check(root)).map(|_| 0);

        Leaves {
            tree,
            next,
            stack: SmallVec::new(),
            check,
        }
    }
}

impl<Check: Fn(&BvhNode) -> bool> Iterator for Leaves<'_, Check> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.next.is_none() {
                self.next = self.stack.pop();
            }

            let id = self.next.take()?;

            let Some([left, right]) = self.tree.nodes[id as usize].children() else {
                return Some(id);
            };

            if (self.check)(&self.tree.nodes[left as usize]) {
                self.next = Some(left);
            }

            if (self.check)(&self.tree.nodes[right as usize]) {
                if self.next.is_none() {
                    self.next = Some(right);
                } else {
                    self.stack.push(right);
                }
            }
        }
    }
}

impl Bvh {
    /// Iterates through the leaves, in depth-first order.
    ///
    /// The `check_node` closure is called on every traversed node. If it returns `false` then the
    /// node and all its descendants won’t be iterated on. This is useful for pruning whole
    /// sub-trees based on a geometric predicate on the node’s AABB.
    ///
    /// # Example
    ///
    /// ```
    /// # #[cfg(feature = "f32")] {
    /// use meshbvh3d::math::Point;
    /// use meshbvh3d::partitioning::{Bvh, BvhBuildParams};
    ///
    /// let triangles: Vec<_> = (0..32)
    ///     .map(|i| {
    ///         let x = i as f32 * 2.0;
    ///         [Point::new(x, 0.0, 0.0), Point::new(x + 1.0, 0.0, 0.0), Point::new(x, 1.0, 0.0)]
    ///     })
    ///     .collect();
    /// let bvh = Bvh::from_triangles(&triangles[..], &BvhBuildParams::new(1)).unwrap();
    ///
    /// // Every leaf is reached when nothing is pruned.
    /// let all: Vec<u32> = bvh.leaves(|_| true).collect();
    /// assert_eq!(all.len() as u32, bvh.leaf_count());
    ///
    /// // Leaves of the triangles starting before x = 9.
    /// let left_side = bvh.leaves(|node| node.aabb().mins.x < 9.0).count();
    /// assert_eq!(left_side, 5);
    /// # }
    /// ```
    pub fn leaves<F: Fn(&BvhNode) -> bool>(&self, check_node: F) -> Leaves<'_, F> {
        Leaves::new(self, check_node)
    }

    #[inline(always)]
    pub(super) fn traversal_stack<T>() -> SmallVec<[T; TRAVERSAL_STACK_SIZE]> {
        SmallVec::new()
    }
}
