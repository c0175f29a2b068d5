use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::iter::{IntoIter, Iter, PostOrderIter, PreOrderIter};
use crate::node::{Color, Node};
use std::fmt::{self, Write};

/// An ordered keyset backed by a red-black tree.
///
/// Keys only need a total order (`K: Ord`). Duplicate keys are permitted:
/// inserting an equal key stores another occurrence, placed after the equal
/// keys already present in the in-order sequence.
///
/// Nodes live in a vector arena and reference each other by index; slot 0
/// always holds the shared black sentinel that stands in for every absent
/// child (so "no children" and "sentinel children" are the same thing).
/// Removals keep the arena compact by relocating the last node into the
/// vacated slot, which is why [`NodeIndex`] handles are only valid until
/// the next removal.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyTree<K, Ix = DefaultIx> {
    /// Vector that stores nodes
    pub(crate) nodes: Vec<Node<K, Ix>>,
    /// Root of the tree
    pub(crate) root: NodeIndex<Ix>,
    /// Number of keys in the tree
    pub(crate) len: usize,
}

impl<K, Ix> KeyTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Creates a new `KeyTree` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = vec![Self::new_sentinel()];
        nodes.reserve(capacity);
        KeyTree {
            nodes,
            root: Self::sentinel(),
            len: 0,
        }
    }

    /// Insert a key into the tree.
    /// Equal keys are kept; the new occurrence is ordered after the
    /// existing ones.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for its index
    ///
    /// # Example
    /// ```rust
    /// use rb_key_tree::KeyTree;
    ///
    /// let mut tree = KeyTree::new();
    /// tree.insert(2);
    /// tree.insert(1);
    /// tree.insert(2);
    /// assert_eq!(tree.len(), 3);
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K) {
        let node_idx = NodeIndex::new(self.nodes.len());
        let node = Self::new_node(key);
        // check for max capacity, except if we use usize
        assert!(
            <Ix as IndexType>::max().index() == !0 || NodeIndex::end() != node_idx,
            "Reached maximum number of nodes"
        );
        self.nodes.push(node);
        self.insert_inner(node_idx);
    }

    /// Remove one occurrence of a key from the tree, returning whether a
    /// key was removed.
    ///
    /// # Example
    /// ```rust
    /// use rb_key_tree::KeyTree;
    ///
    /// let mut tree = KeyTree::new();
    /// tree.insert(3);
    /// tree.insert(1);
    /// assert!(tree.remove(&3));
    /// assert!(!tree.remove(&3));
    /// assert_eq!(tree.len(), 1);
    /// ```
    #[inline]
    pub fn remove(&mut self, key: &K) -> bool {
        if let Some(node_idx) = self.search(key) {
            let detached = self.remove_inner(node_idx);
            // Swap the detached slot with the last node stored in the vector and update indices
            let _ignore = self.nodes.swap_remove(detached.index());
            let old = NodeIndex::<Ix>::new(self.nodes.len());
            self.update_idx(old, detached);
            return true;
        }
        false
    }

    /// Search for the node with the given key, returning its handle.
    ///
    /// When duplicates are present this finds the topmost matching node.
    ///
    /// # Example
    /// ```rust
    /// use rb_key_tree::KeyTree;
    ///
    /// let mut tree = KeyTree::new();
    /// tree.insert(7);
    /// let node = tree.search(&7).unwrap();
    /// assert_eq!(tree.key(node), Some(&7));
    /// assert!(tree.search(&8).is_none());
    /// ```
    #[inline]
    pub fn search(&self, key: &K) -> Option<NodeIndex<Ix>> {
        let mut x = self.root;
        while !self.node_ref(x, Node::is_sentinel) {
            if self.node_ref(x, Node::key) == key {
                return Some(x);
            }
            if key < self.node_ref(x, Node::key) {
                x = self.node_ref(x, Node::left);
            } else {
                x = self.node_ref(x, Node::right);
            }
        }
        None
    }

    /// Check if the tree contains the given key.
    ///
    /// # Example
    /// ```rust
    /// use rb_key_tree::KeyTree;
    ///
    /// let tree: KeyTree<i32> = [1, 2].into_iter().collect();
    /// assert!(tree.contains(&1));
    /// assert!(!tree.contains(&3));
    /// ```
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Return the key stored at `node`, or `None` for the sentinel handle.
    #[inline]
    pub fn key(&self, node: NodeIndex<Ix>) -> Option<&K> {
        self.nodes[node.index()].key.as_ref()
    }

    /// Return the smallest key in the tree.
    ///
    /// # Example
    /// ```rust
    /// use rb_key_tree::KeyTree;
    ///
    /// let mut tree = KeyTree::new();
    /// assert_eq!(tree.minimum(), None);
    /// for key in [543, 206, 85, 850] {
    ///     tree.insert(key);
    /// }
    /// assert_eq!(tree.minimum(), Some(&85));
    /// ```
    #[inline]
    #[must_use]
    pub fn minimum(&self) -> Option<&K> {
        if self.node_ref(self.root, Node::is_sentinel) {
            return None;
        }
        let min_idx = self.tree_minimum(self.root);
        Some(self.node_ref(min_idx, Node::key))
    }

    /// Return the largest key in the tree.
    ///
    /// # Example
    /// ```rust
    /// use rb_key_tree::KeyTree;
    ///
    /// let mut tree = KeyTree::new();
    /// for key in [543, 206, 85, 850] {
    ///     tree.insert(key);
    /// }
    /// assert_eq!(tree.maximum(), Some(&850));
    /// ```
    #[inline]
    #[must_use]
    pub fn maximum(&self) -> Option<&K> {
        if self.node_ref(self.root, Node::is_sentinel) {
            return None;
        }
        let max_idx = self.tree_maximum(self.root);
        Some(self.node_ref(max_idx, Node::key))
    }

    /// Return the node holding the next key in sorted order after `node`,
    /// or `None` if `node` holds the last key.
    ///
    /// `node` must be a live handle of this tree; handles are invalidated
    /// by [`remove`](Self::remove), which relocates nodes inside the
    /// arena. No validation is performed.
    ///
    /// # Example
    /// ```rust
    /// use rb_key_tree::KeyTree;
    ///
    /// let mut tree = KeyTree::new();
    /// for key in [3, 1, 4] {
    ///     tree.insert(key);
    /// }
    /// let start = tree.search(&1).unwrap();
    /// let next = tree.successor(start).unwrap();
    /// assert_eq!(tree.key(next), Some(&3));
    /// ```
    #[inline]
    pub fn successor(&self, node: NodeIndex<Ix>) -> Option<NodeIndex<Ix>> {
        if !self.right_ref(node, Node::is_sentinel) {
            return Some(self.tree_minimum(self.node_ref(node, Node::right)));
        }
        let mut x = node;
        let mut y = self.node_ref(x, Node::parent);
        while !self.node_ref(y, Node::is_sentinel) && self.node_ref(y, Node::right) == x {
            x = y;
            y = self.node_ref(y, Node::parent);
        }
        (!self.node_ref(y, Node::is_sentinel)).then_some(y)
    }

    /// Return the node holding the previous key in sorted order before
    /// `node`, or `None` if `node` holds the first key.
    ///
    /// Same precondition as [`successor`](Self::successor): `node` must be
    /// a live handle of this tree.
    ///
    /// # Example
    /// ```rust
    /// use rb_key_tree::KeyTree;
    ///
    /// let mut tree = KeyTree::new();
    /// for key in [3, 1, 4] {
    ///     tree.insert(key);
    /// }
    /// let start = tree.search(&4).unwrap();
    /// let prev = tree.predecessor(start).unwrap();
    /// assert_eq!(tree.key(prev), Some(&3));
    /// ```
    #[inline]
    pub fn predecessor(&self, node: NodeIndex<Ix>) -> Option<NodeIndex<Ix>> {
        if !self.left_ref(node, Node::is_sentinel) {
            return Some(self.tree_maximum(self.node_ref(node, Node::left)));
        }
        let mut x = node;
        let mut y = self.node_ref(x, Node::parent);
        while !self.node_ref(y, Node::is_sentinel) && self.node_ref(y, Node::left) == x {
            x = y;
            y = self.node_ref(y, Node::parent);
        }
        (!self.node_ref(y, Node::is_sentinel)).then_some(y)
    }

    /// Get an iterator over the keys of the tree, in ascending order.
    ///
    /// # Example
    /// ```rust
    /// use rb_key_tree::KeyTree;
    ///
    /// let tree: KeyTree<i32> = [2, 1, 3].into_iter().collect();
    /// let keys: Vec<i32> = tree.iter().copied().collect();
    /// assert_eq!(keys, vec![1, 2, 3]);
    /// ```
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, Ix> {
        Iter::new(self)
    }

    /// Get an in-order iterator over the keys; the same sequence as
    /// [`iter`](Self::iter), named for symmetry with
    /// [`pre_order`](Self::pre_order) and [`post_order`](Self::post_order).
    #[inline]
    #[must_use]
    pub fn in_order(&self) -> Iter<'_, K, Ix> {
        self.iter()
    }

    /// Get a pre-order iterator over the keys (node, then left subtree,
    /// then right subtree).
    ///
    /// # Example
    /// ```rust
    /// use rb_key_tree::KeyTree;
    ///
    /// let tree: KeyTree<i32> = [2, 1, 3].into_iter().collect();
    /// assert_eq!(tree.pre_order().copied().collect::<Vec<_>>(), vec![2, 1, 3]);
    /// ```
    #[inline]
    #[must_use]
    pub fn pre_order(&self) -> PreOrderIter<'_, K, Ix> {
        PreOrderIter::new(self)
    }

    /// Get a post-order iterator over the keys (left subtree, then right
    /// subtree, then node).
    ///
    /// # Example
    /// ```rust
    /// use rb_key_tree::KeyTree;
    ///
    /// let tree: KeyTree<i32> = [2, 1, 3].into_iter().collect();
    /// assert_eq!(tree.post_order().copied().collect::<Vec<_>>(), vec![1, 3, 2]);
    /// ```
    #[inline]
    #[must_use]
    pub fn post_order(&self) -> PostOrderIter<'_, K, Ix> {
        PostOrderIter::new(self)
    }

    /// Remove all keys from the tree
    #[inline]
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Self::new_sentinel());
        self.root = Self::sentinel();
        self.len = 0;
    }

    /// Return the number of keys in the tree.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if the tree contains no keys.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K> KeyTree<K>
where
    K: Ord,
{
    /// Create an empty `KeyTree`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Self::new_sentinel()],
            root: Self::sentinel(),
            len: 0,
        }
    }
}

impl<K> Default for KeyTree<K>
where
    K: Ord,
{
    #[inline]
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<K, Ix> KeyTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Create a new sentinel node
    fn new_sentinel() -> Node<K, Ix> {
        Node {
            left: None,
            right: None,
            parent: None,
            color: Color::Black,
            key: None,
        }
    }

    /// Create a new tree node
    fn new_node(key: K) -> Node<K, Ix> {
        Node {
            left: Some(Self::sentinel()),
            right: Some(Self::sentinel()),
            parent: Some(Self::sentinel()),
            color: Color::Red,
            key: Some(key),
        }
    }

    /// Get the sentinel node index
    fn sentinel() -> NodeIndex<Ix> {
        NodeIndex::new(0)
    }
}

impl<K, Ix> KeyTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Insert a node into the tree.
    fn insert_inner(&mut self, z: NodeIndex<Ix>) {
        let mut y = Self::sentinel();
        let mut x = self.root;

        while !self.node_ref(x, Node::is_sentinel) {
            y = x;
            if self.node_ref(z, Node::key) < self.node_ref(x, Node::key) {
                x = self.node_ref(x, Node::left);
            } else {
                x = self.node_ref(x, Node::right);
            }
        }
        self.node_mut(z, Node::set_parent(y));
        if self.node_ref(y, Node::is_sentinel) {
            self.root = z;
        } else if self.node_ref(z, Node::key) < self.node_ref(y, Node::key) {
            self.node_mut(y, Node::set_left(z));
        } else {
            self.node_mut(y, Node::set_right(z));
        }
        self.node_mut(z, Node::set_color(Color::Red));

        self.insert_fixup(z);

        self.len = self.len.wrapping_add(1);
    }

    /// Detach one node from the tree and return the index of the slot
    /// that went dead.
    ///
    /// When `z` has two children the spliced-out node is its in-order
    /// successor `y`; `y`'s key is moved into `z`, so `z` keeps its slot,
    /// links and color while `y`'s slot is the one reported dead.
    fn remove_inner(&mut self, z: NodeIndex<Ix>) -> NodeIndex<Ix> {
        let y = if self.left_ref(z, Node::is_sentinel) || self.right_ref(z, Node::is_sentinel) {
            z
        } else {
            self.tree_minimum(self.node_ref(z, Node::right))
        };
        let y_color = self.node_ref(y, Node::color);
        let x = if !self.left_ref(y, Node::is_sentinel) {
            self.node_ref(y, Node::left)
        } else {
            self.node_ref(y, Node::right)
        };
        let y_parent = self.node_ref(y, Node::parent);

        if !self.node_ref(x, Node::is_sentinel) {
            self.node_mut(x, Node::set_parent(y_parent));
        }
        if self.node_ref(y_parent, Node::is_sentinel) {
            self.root = x;
        } else if self.node_ref(y_parent, Node::left) == y {
            self.node_mut(y_parent, Node::set_left(x));
        } else {
            self.node_mut(y_parent, Node::set_right(x));
        }

        if y != z {
            let key = self.node_mut(y, Node::take_key);
            let _ignore = self.node_mut(z, Node::set_key(key));
        }

        if matches!(y_color, Color::Black) {
            self.remove_fixup(x, y_parent);
        }

        self.len = self.len.wrapping_sub(1);
        y
    }

    /// Restore red-black tree properties after an insert.
    fn insert_fixup(&mut self, mut z: NodeIndex<Ix>) {
        while self.parent_ref(z, Node::is_red) {
            if self.grand_parent_ref(z, Node::is_sentinel) {
                break;
            }
            if self.is_left_child(self.node_ref(z, Node::parent)) {
                let y = self.grand_parent_ref(z, Node::right);
                if self.node_ref(y, Node::is_red) {
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_right_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.left_rotate(z);
                    }
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.right_rotate(self.parent_ref(z, Node::parent));
                }
            } else {
                let y = self.grand_parent_ref(z, Node::left);
                if self.node_ref(y, Node::is_red) {
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_left_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.right_rotate(z);
                    }
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.left_rotate(self.parent_ref(z, Node::parent));
                }
            }
        }
        self.node_mut(self.root, Node::set_color(Color::Black));
    }

    /// Restore red-black tree properties after a remove.
    ///
    /// `parent` is passed explicitly because `node` may be the sentinel,
    /// which carries no parent link of its own.
    fn remove_fixup(&mut self, mut node: NodeIndex<Ix>, mut parent: NodeIndex<Ix>) {
        while node != self.root && self.node_ref(node, Node::is_black) {
            let mut brother;
            if self.node_ref(parent, Node::left) == node {
                brother = self.node_ref(parent, Node::right);
                if self.node_ref(brother, Node::is_red) {
                    self.node_mut(brother, Node::set_color(Color::Black));
                    self.node_mut(parent, Node::set_color(Color::Red));
                    self.left_rotate(parent);
                    brother = self.node_ref(parent, Node::right);
                }
                if self.node_ref(brother, Node::is_sentinel) {
                    break;
                }
                if self.left_ref(brother, Node::is_black) && self.right_ref(brother, Node::is_black)
                {
                    self.node_mut(brother, Node::set_color(Color::Red));
                    node = parent;
                    parent = self.node_ref(node, Node::parent);
                } else {
                    if self.right_ref(brother, Node::is_black) {
                        self.left_mut(brother, Node::set_color(Color::Black));
                        self.node_mut(brother, Node::set_color(Color::Red));
                        self.right_rotate(brother);
                        brother = self.node_ref(parent, Node::right);
                    }
                    let parent_color = self.node_ref(parent, Node::color);
                    self.node_mut(brother, Node::set_color(parent_color));
                    self.node_mut(parent, Node::set_color(Color::Black));
                    self.right_mut(brother, Node::set_color(Color::Black));
                    self.left_rotate(parent);
                    node = self.root;
                    break;
                }
            } else {
                brother = self.node_ref(parent, Node::left);
                if self.node_ref(brother, Node::is_red) {
                    self.node_mut(brother, Node::set_color(Color::Black));
                    self.node_mut(parent, Node::set_color(Color::Red));
                    self.right_rotate(parent);
                    brother = self.node_ref(parent, Node::left);
                }
                if self.node_ref(brother, Node::is_sentinel) {
                    break;
                }
                if self.right_ref(brother, Node::is_black) && self.left_ref(brother, Node::is_black)
                {
                    self.node_mut(brother, Node::set_color(Color::Red));
                    node = parent;
                    parent = self.node_ref(node, Node::parent);
                } else {
                    if self.left_ref(brother, Node::is_black) {
                        self.right_mut(brother, Node::set_color(Color::Black));
                        self.node_mut(brother, Node::set_color(Color::Red));
                        self.left_rotate(brother);
                        brother = self.node_ref(parent, Node::left);
                    }
                    let parent_color = self.node_ref(parent, Node::color);
                    self.node_mut(brother, Node::set_color(parent_color));
                    self.node_mut(parent, Node::set_color(Color::Black));
                    self.left_mut(brother, Node::set_color(Color::Black));
                    self.right_rotate(parent);
                    node = self.root;
                    break;
                }
            }
        }
        self.node_mut(node, Node::set_color(Color::Black));
    }

    /// Binary tree left rotate.
    fn left_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.right_ref(x, Node::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, Node::right);
        self.node_mut(x, Node::set_right(self.node_ref(y, Node::left)));
        if !self.left_ref(y, Node::is_sentinel) {
            self.left_mut(y, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_left(x));
    }

    /// Binary tree right rotate.
    fn right_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.left_ref(x, Node::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, Node::left);
        self.node_mut(x, Node::set_left(self.node_ref(y, Node::right)));
        if !self.right_ref(y, Node::is_sentinel) {
            self.right_mut(y, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_right(x));
    }

    /// Replace parent during a rotation.
    fn replace_parent(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        self.node_mut(y, Node::set_parent(self.node_ref(x, Node::parent)));
        if self.parent_ref(x, Node::is_sentinel) {
            self.root = y;
        } else if self.is_left_child(x) {
            self.parent_mut(x, Node::set_left(y));
        } else {
            self.parent_mut(x, Node::set_right(y));
        }
        self.node_mut(x, Node::set_parent(y));
    }

    /// Find the node with the minimum key in the subtree rooted at `x`.
    fn tree_minimum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !self.left_ref(x, Node::is_sentinel) {
            x = self.node_ref(x, Node::left);
        }
        x
    }

    /// Find the node with the maximum key in the subtree rooted at `x`.
    fn tree_maximum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !self.right_ref(x, Node::is_sentinel) {
            x = self.node_ref(x, Node::right);
        }
        x
    }

    /// Check if a node is a left child of its parent.
    fn is_left_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::left) == node
    }

    /// Check if a node is a right child of its parent.
    fn is_right_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::right) == node
    }

    /// Update node indices after a removal compacted the arena.
    ///
    /// The node that lived at `old` (the former last slot) now lives at
    /// `new`; every link that still says `old` must be repointed.
    fn update_idx(&mut self, old: NodeIndex<Ix>, new: NodeIndex<Ix>) {
        if self.root == old {
            self.root = new;
        }
        if self.nodes.get(new.index()).is_some() {
            if !self.parent_ref(new, Node::is_sentinel) {
                if self.parent_ref(new, Node::left) == old {
                    self.parent_mut(new, Node::set_left(new));
                } else {
                    self.parent_mut(new, Node::set_right(new));
                }
            }
            if !self.left_ref(new, Node::is_sentinel) {
                self.left_mut(new, Node::set_parent(new));
            }
            if !self.right_ref(new, Node::is_sentinel) {
                self.right_mut(new, Node::set_parent(new));
            }
        }
    }
}

impl<K, Ix> KeyTree<K, Ix>
where
    K: Ord + fmt::Debug,
    Ix: IndexType,
{
    /// Render a human-readable structural dump: one line per node with its
    /// key, color letter and relation to its parent, in pre-order.
    ///
    /// Diagnostic output only; nothing load-bearing should parse it.
    ///
    /// # Example
    /// ```rust
    /// use rb_key_tree::KeyTree;
    ///
    /// let tree: KeyTree<i32> = [2, 1, 3].into_iter().collect();
    /// assert!(tree.print().starts_with("2(B) is root"));
    /// ```
    #[must_use]
    pub fn print(&self) -> String {
        let mut out = String::new();
        if !self.node_ref(self.root, Node::is_sentinel) {
            self.print_inner(self.root, &mut out);
        }
        out
    }

    fn print_inner(&self, x: NodeIndex<Ix>, out: &mut String) {
        let color = if self.node_ref(x, Node::is_red) { "R" } else { "B" };
        if self.parent_ref(x, Node::is_sentinel) {
            let _ignore = writeln!(out, "{:?}({}) is root", self.node_ref(x, Node::key), color);
        } else {
            let side = if self.is_left_child(x) { "left" } else { "right" };
            let _ignore = writeln!(
                out,
                "{:?}({}) is {:?}'s {} child",
                self.node_ref(x, Node::key),
                color,
                self.parent_ref(x, Node::key),
                side
            );
        }
        if !self.left_ref(x, Node::is_sentinel) {
            self.print_inner(self.node_ref(x, Node::left), out);
        }
        if !self.right_ref(x, Node::is_sentinel) {
            self.print_inner(self.node_ref(x, Node::right), out);
        }
    }
}

// Convenient methods for reference or mutate current/parent/left/right node
impl<'a, K, Ix> KeyTree<K, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    pub(crate) fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    pub(crate) fn left_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&self.nodes[idx])
    }

    pub(crate) fn right_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&self.nodes[idx])
    }

    fn parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&self.nodes[idx])
    }

    fn grand_parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&self.nodes[grand_parent_idx])
    }

    fn left_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&mut self.nodes[idx])
    }

    fn right_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&mut self.nodes[idx])
    }

    fn parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&mut self.nodes[idx])
    }

    fn grand_parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&mut self.nodes[grand_parent_idx])
    }
}

impl<'a, K, Ix> IntoIterator for &'a KeyTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    type Item = &'a K;
    type IntoIter = Iter<'a, K, Ix>;

    #[inline]
    fn into_iter(self) -> Iter<'a, K, Ix> {
        self.iter()
    }
}

impl<K, Ix> IntoIterator for KeyTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    type Item = K;
    type IntoIter = IntoIter<K, Ix>;

    #[inline]
    fn into_iter(self) -> IntoIter<K, Ix> {
        IntoIter::new(self)
    }
}

impl<K> FromIterator<K> for KeyTree<K>
where
    K: Ord,
{
    #[inline]
    fn from_iter<I: IntoIterator<Item = K>>(into_iter: I) -> KeyTree<K> {
        let mut tree = KeyTree::new();
        for key in into_iter {
            tree.insert(key);
        }
        tree
    }
}

impl<K, Ix> Extend<K> for KeyTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    #[inline]
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}
