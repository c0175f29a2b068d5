use crate::index::{IndexType, NodeIndex};
use crate::keytree::KeyTree;
use crate::node::Node;

/// Pushes a link of nodes on the left to stack.
fn left_link<K, Ix>(tree_ref: &KeyTree<K, Ix>, mut x: NodeIndex<Ix>) -> Vec<NodeIndex<Ix>>
where
    K: Ord,
    Ix: IndexType,
{
    let mut nodes = vec![];
    while !tree_ref.node_ref(x, Node::is_sentinel) {
        nodes.push(x);
        x = tree_ref.node_ref(x, Node::left);
    }
    nodes
}

/// An iterator over the keys of a `KeyTree`, in ascending order.
#[derive(Debug)]
pub struct Iter<'a, K, Ix>
where
    K: Ord,
{
    /// Reference to the tree
    tree_ref: &'a KeyTree<K, Ix>,
    /// Stack for iteration
    stack: Vec<NodeIndex<Ix>>,
}

impl<'a, K, Ix> Iter<'a, K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    pub(crate) fn new(tree_ref: &'a KeyTree<K, Ix>) -> Self {
        Iter {
            tree_ref,
            stack: left_link(tree_ref, tree_ref.root),
        }
    }
}

impl<'a, K, Ix> Iterator for Iter<'a, K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.stack.is_empty() {
            return None;
        }
        let x = self.stack.pop().unwrap();
        self.stack.extend(left_link(
            self.tree_ref,
            self.tree_ref.node_ref(x, Node::right),
        ));
        Some(self.tree_ref.node_ref(x, Node::key))
    }
}

/// An owning in-order iterator over the keys of a `KeyTree`.
#[derive(Debug)]
pub struct IntoIter<K, Ix>
where
    K: Ord,
{
    tree: KeyTree<K, Ix>,
    /// Stack for iteration
    stack: Vec<NodeIndex<Ix>>,
}

impl<K, Ix> IntoIter<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    pub(crate) fn new(tree: KeyTree<K, Ix>) -> Self {
        let mut temp = IntoIter {
            tree,
            stack: vec![],
        };
        temp.stack = left_link(&temp.tree, temp.tree.root);
        temp
    }
}

impl<K, Ix> Iterator for IntoIter<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    type Item = K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.stack.is_empty() {
            return None;
        }
        let x = self.stack.pop().unwrap();
        self.stack
            .extend(left_link(&self.tree, self.tree.node_ref(x, Node::right)));
        let res = &mut self.tree.nodes[x.index()];
        Some(res.key.take().unwrap())
    }
}

/// A pre-order iterator over the keys of a `KeyTree`: each node is yielded
/// before its left and right subtrees.
#[derive(Debug)]
pub struct PreOrderIter<'a, K, Ix>
where
    K: Ord,
{
    /// Reference to the tree
    tree_ref: &'a KeyTree<K, Ix>,
    /// Stack for iteration
    stack: Vec<NodeIndex<Ix>>,
}

impl<'a, K, Ix> PreOrderIter<'a, K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    pub(crate) fn new(tree_ref: &'a KeyTree<K, Ix>) -> Self {
        let stack = if tree_ref.node_ref(tree_ref.root, Node::is_sentinel) {
            vec![]
        } else {
            vec![tree_ref.root]
        };
        PreOrderIter { tree_ref, stack }
    }
}

impl<'a, K, Ix> Iterator for PreOrderIter<'a, K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.stack.is_empty() {
            return None;
        }
        let x = self.stack.pop().unwrap();
        let right = self.tree_ref.node_ref(x, Node::right);
        if !self.tree_ref.node_ref(right, Node::is_sentinel) {
            self.stack.push(right);
        }
        let left = self.tree_ref.node_ref(x, Node::left);
        if !self.tree_ref.node_ref(left, Node::is_sentinel) {
            self.stack.push(left);
        }
        Some(self.tree_ref.node_ref(x, Node::key))
    }
}

/// A post-order iterator over the keys of a `KeyTree`: each node is yielded
/// after its left and right subtrees.
///
/// The stack marks whether a node's subtrees have already been scheduled,
/// so a node is emitted only on its second visit.
#[derive(Debug)]
pub struct PostOrderIter<'a, K, Ix>
where
    K: Ord,
{
    /// Reference to the tree
    tree_ref: &'a KeyTree<K, Ix>,
    /// Stack for iteration, with the expanded flag per node
    stack: Vec<(NodeIndex<Ix>, bool)>,
}

impl<'a, K, Ix> PostOrderIter<'a, K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    pub(crate) fn new(tree_ref: &'a KeyTree<K, Ix>) -> Self {
        let stack = if tree_ref.node_ref(tree_ref.root, Node::is_sentinel) {
            vec![]
        } else {
            vec![(tree_ref.root, false)]
        };
        PostOrderIter { tree_ref, stack }
    }
}

impl<'a, K, Ix> Iterator for PostOrderIter<'a, K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while let Some((x, expanded)) = self.stack.pop() {
            if expanded {
                return Some(self.tree_ref.node_ref(x, Node::key));
            }
            self.stack.push((x, true));
            let right = self.tree_ref.node_ref(x, Node::right);
            if !self.tree_ref.node_ref(right, Node::is_sentinel) {
                self.stack.push((right, false));
            }
            let left = self.tree_ref.node_ref(x, Node::left);
            if !self.tree_ref.node_ref(left, Node::is_sentinel) {
                self.stack.push((left, false));
            }
        }
        None
    }
}
