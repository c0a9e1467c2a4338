use std::{cmp::Ordering, mem};

type NodeId = usize;

#[derive(Clone, Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Option<NodeId>,
    right: Option<NodeId>,
    height: u32,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Node<K, V> {
        Node {
            key,
            value,
            left: None,
            right: None,
            height: 1,
        }
    }
}

/// Result of inserting a key that may already be present.
#[derive(Debug, PartialEq, Eq)]
pub enum Insertion<V> {
    Inserted,
    Replaced(V),
    Kept,
}

/// Height balanced binary search tree.
///
/// Nodes live in a single vector and reference their children by index.
/// Nodes are never removed, so indices stay valid for the lifetime of the
/// tree. After every insertion the heights of the two subtrees of any node
/// differ by at most one.
#[derive(Clone, Debug)]
pub struct AvlTree<K, V> {
    nodes: Vec<Node<K, V>>,
    root: Option<NodeId>,
}

impl<K, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> AvlTree<K, V> {
    pub fn new() -> AvlTree<K, V> {
        AvlTree {
            nodes: Vec::new(),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn height(&self) -> u32 {
        self.height_of(self.root)
    }

    /// Iterates over all entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            tree: self,
            stack: Vec::with_capacity(self.height() as usize),
        };
        iter.push_left_spine(self.root);
        iter
    }

    fn height_of(&self, node: Option<NodeId>) -> u32 {
        node.map_or(0, |node| self.nodes[node].height)
    }

    fn balance_factor(&self, node: NodeId) -> i64 {
        let node = &self.nodes[node];
        self.height_of(node.left) as i64 - self.height_of(node.right) as i64
    }

    fn update_height(&mut self, node: NodeId) {
        let height = 1 + std::cmp::max(
            self.height_of(self.nodes[node].left),
            self.height_of(self.nodes[node].right),
        );
        self.nodes[node].height = height;
    }

    fn rotate_right(&mut self, node: NodeId) -> NodeId {
        let Some(pivot) = self.nodes[node].left else {
            return node;
        };

        self.nodes[node].left = self.nodes[pivot].right;
        self.nodes[pivot].right = Some(node);

        self.update_height(node);
        self.update_height(pivot);

        pivot
    }

    fn rotate_left(&mut self, node: NodeId) -> NodeId {
        let Some(pivot) = self.nodes[node].right else {
            return node;
        };

        self.nodes[node].right = self.nodes[pivot].left;
        self.nodes[pivot].left = Some(node);

        self.update_height(node);
        self.update_height(pivot);

        pivot
    }

    /// Restores the height invariant at `node` and returns the root of the
    /// (possibly rotated) subtree.
    fn rebalance(&mut self, node: NodeId) -> NodeId {
        self.update_height(node);
        let balance = self.balance_factor(node);

        if balance > 1 {
            // left right case
            if let Some(left) = self.nodes[node].left {
                if self.balance_factor(left) < 0 {
                    let new_left = self.rotate_left(left);
                    self.nodes[node].left = Some(new_left);
                }
            }
            return self.rotate_right(node);
        }

        if balance < -1 {
            // right left case
            if let Some(right) = self.nodes[node].right {
                if self.balance_factor(right) > 0 {
                    let new_right = self.rotate_right(right);
                    self.nodes[node].right = Some(new_right);
                }
            }
            return self.rotate_left(node);
        }

        node
    }
}

impl<K: Ord, V> AvlTree<K, V> {
    pub fn get(&self, key: &K) -> Option<&V> {
        let mut current = self.root;
        while let Some(node) = current {
            let node = &self.nodes[node];
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(&node.value),
            };
        }

        None
    }

    /// Inserts the entry, replacing the value of an existing key.
    pub fn insert(&mut self, key: K, value: V) -> Insertion<V> {
        self.insert_with(key, value, true)
    }

    /// Inserts the entry only if the key is not present yet.
    pub fn insert_if_absent(&mut self, key: K, value: V) -> Insertion<V> {
        self.insert_with(key, value, false)
    }

    fn insert_with(&mut self, key: K, value: V, overwrite: bool) -> Insertion<V> {
        let (root, insertion) = self.insert_below(self.root, key, value, overwrite);
        self.root = Some(root);
        insertion
    }

    fn insert_below(
        &mut self,
        node: Option<NodeId>,
        key: K,
        value: V,
        overwrite: bool,
    ) -> (NodeId, Insertion<V>) {
        let Some(node) = node else {
            self.nodes.push(Node::new(key, value));
            return (self.nodes.len() - 1, Insertion::Inserted);
        };

        let insertion = match key.cmp(&self.nodes[node].key) {
            Ordering::Less => {
                let (left, insertion) =
                    self.insert_below(self.nodes[node].left, key, value, overwrite);
                self.nodes[node].left = Some(left);
                insertion
            }
            Ordering::Greater => {
                let (right, insertion) =
                    self.insert_below(self.nodes[node].right, key, value, overwrite);
                self.nodes[node].right = Some(right);
                insertion
            }
            Ordering::Equal => {
                if !overwrite {
                    return (node, Insertion::Kept);
                }
                let old_value = mem::replace(&mut self.nodes[node].value, value);
                return (node, Insertion::Replaced(old_value));
            }
        };

        (self.rebalance(node), insertion)
    }

    /// Checks search order, stored heights and the balance condition of every
    /// node.
    pub fn is_balanced(&self) -> bool {
        self.check_subtree(self.root, None, None).is_some()
    }

    // Returns the subtree height if the subtree is valid.
    fn check_subtree(
        &self,
        node: Option<NodeId>,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> Option<u32> {
        let Some(node) = node else {
            return Some(0);
        };
        let entry = &self.nodes[node];

        if lower.is_some_and(|lower| entry.key <= *lower)
            || upper.is_some_and(|upper| entry.key >= *upper)
        {
            return None;
        }

        let left_height = self.check_subtree(entry.left, lower, Some(&entry.key))?;
        let right_height = self.check_subtree(entry.right, Some(&entry.key), upper)?;

        let height = 1 + std::cmp::max(left_height, right_height);
        if left_height.abs_diff(right_height) > 1 || height != entry.height {
            return None;
        }

        Some(height)
    }
}

/// In-order iterator over an [`AvlTree`].
pub struct Iter<'a, K, V> {
    tree: &'a AvlTree<K, V>,
    stack: Vec<NodeId>,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left_spine(&mut self, mut node: Option<NodeId>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = self.tree.nodes[current].left;
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let entry = &self.tree.nodes[node];
        self.push_left_spine(entry.right);
        Some((&entry.key, &entry.value))
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::prelude::*;

    use super::*;

    #[test]
    fn ascending_inserts_stay_balanced() {
        let mut tree = AvlTree::new();
        for key in 0..1024u32 {
            tree.insert(key, key * 2);
            assert!(tree.is_balanced());
        }

        assert_eq!(tree.len(), 1024);
        // a perfectly filled tree of 1023 nodes has height 10
        assert_eq!(tree.height(), 11);
        assert_eq!(tree.get(&512), Some(&1024));
        assert_eq!(tree.get(&2048), None);
    }

    #[test]
    fn descending_inserts_stay_balanced() {
        let mut tree = AvlTree::new();
        for key in (0..500u32).rev() {
            tree.insert(key, ());
        }

        assert!(tree.is_balanced());
        assert!(tree.height() <= 13);
    }

    #[test]
    fn double_rotations() {
        // left right case
        let mut tree = AvlTree::new();
        for key in [30, 10, 20] {
            tree.insert(key, ());
        }
        assert!(tree.is_balanced());
        assert_eq!(tree.height(), 2);

        // right left case
        let mut tree = AvlTree::new();
        for key in [10, 30, 20] {
            tree.insert(key, ());
        }
        assert!(tree.is_balanced());
        assert_eq!(tree.height(), 2);
    }

    #[test]
    fn random_inserts_stay_balanced_and_sorted() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut tree = AvlTree::new();
        let mut keys = Vec::new();
        for _ in 0..2_000 {
            let key: u64 = rng.gen_range(0..10_000);
            tree.insert(key, key);
            keys.push(key);
        }

        assert!(tree.is_balanced());

        let expected = keys.into_iter().sorted().dedup().collect_vec();
        let actual = tree.iter().map(|(key, _)| *key).collect_vec();
        assert_eq!(expected, actual);
        assert_eq!(tree.len(), expected.len());
    }

    #[test]
    fn duplicate_keys() {
        let mut tree = AvlTree::new();
        assert_eq!(tree.insert(1, "a"), Insertion::Inserted);
        assert_eq!(tree.insert(1, "b"), Insertion::Replaced("a"));
        assert_eq!(tree.insert_if_absent(1, "c"), Insertion::Kept);
        assert_eq!(tree.get(&1), Some(&"b"));
        assert_eq!(tree.len(), 1);
    }
}
