//! KD-Tree over 3-D points.

use crate::geometry::*;
use crate::pbrt::*;

/// Records stored in a `KdTree` expose the point they are indexed by.
pub trait KdTreeData {
    /// Returns the position of the record.
    fn p(&self) -> Point3f;
}

/// A node in the kd-tree. Node data lives in a parallel array at the same
/// index. The left child, when present, is always the next node.
#[derive(Copy, Clone, Debug)]
struct KdNode {
    /// Split position along `split_axis`.
    split_pos: Float,

    /// Split axis; `None` for leaf nodes.
    split_axis: Option<Axis>,

    /// Indicates the node at `index + 1` is the left child.
    has_left_child: bool,

    /// Index of the right child.
    right_child: Option<usize>,
}

impl KdNode {
    /// Returns a leaf node.
    fn leaf() -> Self {
        Self {
            split_pos: 0.0,
            split_axis: None,
            has_left_child: false,
            right_child: None,
        }
    }

    /// Returns an interior node.
    ///
    /// * `split_pos`  - Split position along `split_axis`.
    /// * `split_axis` - Split axis.
    fn interior(split_pos: Float, split_axis: Axis) -> Self {
        Self {
            split_pos,
            split_axis: Some(split_axis),
            has_left_child: false,
            right_child: None,
        }
    }
}

/// A balanced kd-tree built once over a set of point records and queried
/// read-only afterwards.
#[derive(Clone, Debug)]
pub struct KdTree<T> {
    /// The nodes.
    nodes: Vec<KdNode>,

    /// The records; `data[i]` belongs to `nodes[i]`.
    data: Vec<T>,
}

impl<T: KdTreeData> KdTree<T> {
    /// Builds a new kd-tree.
    ///
    /// * `records` - The records to index.
    pub fn new(records: Vec<T>) -> Self {
        let n = records.len();
        let points: Vec<Point3f> = records.iter().map(|r| r.p()).collect();
        let mut order: Vec<usize> = (0..n).collect();

        let mut nodes = vec![KdNode::leaf(); n];
        let mut node_order = vec![0_usize; n];
        if n > 0 {
            let mut next_free = 1;
            Self::build(
                0,
                0,
                n,
                &points,
                &mut order,
                &mut nodes,
                &mut node_order,
                &mut next_free,
            );
        }

        // Move records into node order.
        let mut slots: Vec<Option<T>> = records.into_iter().map(Some).collect();
        let data: Vec<T> = node_order.iter().filter_map(|&i| slots[i].take()).collect();
        debug_assert!(data.len() == n);

        debug!("Built kd-tree with {} nodes", n);

        Self { nodes, data }
    }

    /// Recursively builds the subtree for `order[start..end]` at `node_num`.
    #[allow(clippy::too_many_arguments)]
    fn build(
        node_num: usize,
        start: usize,
        end: usize,
        points: &[Point3f],
        order: &mut [usize],
        nodes: &mut [KdNode],
        node_order: &mut [usize],
        next_free: &mut usize,
    ) {
        if start + 1 == end {
            nodes[node_num] = KdNode::leaf();
            node_order[node_num] = order[start];
            return;
        }

        // Choose split axis along the maximum extent of the points.
        let mut p_min = points[order[start]];
        let mut p_max = p_min;
        for &i in order[start + 1..end].iter() {
            let p = points[i];
            p_min = Point3f::new(min(p_min.x, p.x), min(p_min.y, p.y), min(p_min.z, p.z));
            p_max = Point3f::new(max(p_max.x, p.x), max(p_max.y, p.y), max(p_max.z, p.z));
        }
        let d = p_max - p_min;
        let split_axis = if d.x > d.y && d.x > d.z {
            Axis::X
        } else if d.y > d.z {
            Axis::Y
        } else {
            Axis::Z
        };

        // Partition around the median.
        let split = (start + end) / 2;
        order[start..end].select_nth_unstable_by(split - start, |&a, &b| {
            points[a][split_axis].total_cmp(&points[b][split_axis])
        });

        nodes[node_num] = KdNode::interior(points[order[split]][split_axis], split_axis);
        node_order[node_num] = order[split];

        if start < split {
            nodes[node_num].has_left_child = true;
            let child = *next_free;
            *next_free += 1;
            Self::build(child, start, split, points, order, nodes, node_order, next_free);
        }

        if split + 1 < end {
            let child = *next_free;
            *next_free += 1;
            nodes[node_num].right_child = Some(child);
            Self::build(child, split + 1, end, points, order, nodes, node_order, next_free);
        }
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if there are no records.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Visits every record within `sqrt(max_dist_squared)` of `p`. The
    /// callback receives the query point, the record, its squared distance
    /// and the current squared search radius which it may shrink.
    ///
    /// * `p`                - Query point.
    /// * `max_dist_squared` - Squared search radius.
    /// * `f`                - Callback.
    pub fn lookup<F>(&self, p: &Point3f, max_dist_squared: Float, mut f: F)
    where
        F: FnMut(&Point3f, &T, Float, &mut Float),
    {
        if self.nodes.is_empty() {
            return;
        }
        let mut max_dist_squared = max_dist_squared;
        self.lookup_node(0, p, &mut f, &mut max_dist_squared);
    }

    /// Recursive lookup starting at `node_num`.
    fn lookup_node<F>(&self, node_num: usize, p: &Point3f, f: &mut F, max_dist_squared: &mut Float)
    where
        F: FnMut(&Point3f, &T, Float, &mut Float),
    {
        let node = &self.nodes[node_num];

        if let Some(axis) = node.split_axis {
            let dist_squared = (p[axis] - node.split_pos) * (p[axis] - node.split_pos);
            if p[axis] <= node.split_pos {
                if node.has_left_child {
                    self.lookup_node(node_num + 1, p, f, max_dist_squared);
                }
                if let Some(right) = node.right_child {
                    if dist_squared < *max_dist_squared {
                        self.lookup_node(right, p, f, max_dist_squared);
                    }
                }
            } else {
                if let Some(right) = node.right_child {
                    self.lookup_node(right, p, f, max_dist_squared);
                }
                if node.has_left_child && dist_squared < *max_dist_squared {
                    self.lookup_node(node_num + 1, p, f, max_dist_squared);
                }
            }
        }

        let record = &self.data[node_num];
        let dist_squared = record.p().distance_squared(p);
        if dist_squared < *max_dist_squared {
            f(p, record, dist_squared, max_dist_squared);
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::*;

    #[derive(Clone, Debug)]
    struct Tagged {
        p: Point3f,
        id: usize,
    }

    impl KdTreeData for Tagged {
        fn p(&self) -> Point3f {
            self.p
        }
    }

    fn random_records(n: usize) -> Vec<Tagged> {
        let mut rng = RNG::new(11);
        (0..n)
            .map(|id| Tagged {
                p: Point3f::new(rng.uniform_float(), rng.uniform_float(), rng.uniform_float()),
                id,
            })
            .collect()
    }

    #[test]
    fn empty_tree_finds_nothing() {
        let tree: KdTree<Tagged> = KdTree::new(vec![]);
        assert!(tree.is_empty());
        let mut found = 0;
        tree.lookup(&Point3f::zero(), 1.0, |_, _, _, _| found += 1);
        assert_eq!(found, 0);
    }

    #[test]
    fn lookup_matches_brute_force() {
        let records = random_records(500);
        let tree = KdTree::new(records.clone());
        assert_eq!(tree.len(), 500);

        let mut rng = RNG::new(5);
        for _ in 0..50 {
            let q = Point3f::new(rng.uniform_float(), rng.uniform_float(), rng.uniform_float());
            let r2 = 0.01;

            let mut expected: Vec<usize> = records
                .iter()
                .filter(|r| r.p.distance_squared(&q) < r2)
                .map(|r| r.id)
                .collect();
            expected.sort_unstable();

            let mut found = vec![];
            tree.lookup(&q, r2, |_, r, d2, _| {
                assert!(d2 < r2);
                found.push(r.id);
            });
            found.sort_unstable();

            assert_eq!(found, expected);
        }
    }

    #[test]
    fn single_record() {
        let tree = KdTree::new(vec![Tagged {
            p: Point3f::new(1.0, 2.0, 3.0),
            id: 7,
        }]);
        let mut found = vec![];
        tree.lookup(&Point3f::new(1.0, 2.0, 3.1), 0.1, |_, r, _, _| found.push(r.id));
        assert_eq!(found, vec![7]);
    }
}
