use std::collections::HashSet;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::index::NodeIndex;
use crate::node::{Color, Node};

use super::*;

struct KeyGenerator {
    rng: StdRng,
    unique: HashSet<i32>,
    limit: i32,
}

impl KeyGenerator {
    fn new(seed: [u8; 32]) -> Self {
        const LIMIT: i32 = 1000;
        Self {
            rng: SeedableRng::from_seed(seed),
            unique: HashSet::new(),
            limit: LIMIT,
        }
    }

    fn next(&mut self) -> i32 {
        self.rng.gen_range(0..self.limit)
    }

    fn next_unique(&mut self) -> i32 {
        let mut key = self.next();
        while self.unique.contains(&key) {
            key = self.next();
        }
        self.unique.insert(key);
        key
    }
}

impl<K: Ord> KeyTree<K> {
    /// 1. Every node is either red or black.
    /// 2. The root is black.
    /// 3. Every leaf (sentinel) is black.
    /// 4. If a node is red, then both its children are black.
    /// 5. For each node, all simple paths from the node to descendant leaves contain the
    ///    same number of black nodes.
    ///
    /// Plus the properties specific to this crate: the in-order sequence is
    /// non-decreasing, and the arena holds exactly the sentinel and the live
    /// nodes.
    fn check_rb_properties(&self) {
        assert!(matches!(
            self.node_ref(self.root, Node::color),
            Color::Black
        ));
        self.check_children_color(self.root);
        self.check_black_height(self.root);
        self.check_ordering();
        assert_eq!(self.nodes.len(), self.len() + 1);
    }

    fn check_children_color(&self, x: NodeIndex<u32>) {
        if self.node_ref(x, Node::is_sentinel) {
            return;
        }
        self.check_children_color(self.node_ref(x, Node::left));
        self.check_children_color(self.node_ref(x, Node::right));
        if self.node_ref(x, Node::is_red) {
            assert!(matches!(self.left_ref(x, Node::color), Color::Black));
            assert!(matches!(self.right_ref(x, Node::color), Color::Black));
        }
    }

    fn check_black_height(&self, x: NodeIndex<u32>) -> usize {
        if self.node_ref(x, Node::is_sentinel) {
            return 0;
        }
        let lefth = self.check_black_height(self.node_ref(x, Node::left));
        let righth = self.check_black_height(self.node_ref(x, Node::right));
        assert_eq!(lefth, righth);
        if self.node_ref(x, Node::is_black) {
            return lefth + 1;
        }
        lefth
    }

    fn check_ordering(&self) {
        let keys: Vec<&K> = self.iter().collect();
        assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    }
}

fn with_tree_and_generator(test_fn: impl Fn(KeyTree<i32>, KeyGenerator)) {
    let seeds = vec![[0; 32], [1; 32], [2; 32]];
    for seed in seeds {
        let gen = KeyGenerator::new(seed);
        let tree = KeyTree::new();
        test_fn(tree, gen);
    }
}

#[test]
fn red_black_tree_properties_hold_after_inserts() {
    with_tree_and_generator(|mut tree, mut gen| {
        let keys: Vec<_> = std::iter::repeat_with(|| gen.next()).take(1000).collect();
        for key in keys {
            tree.insert(key);
        }
        tree.check_rb_properties();
    });
}

#[test]
fn red_black_tree_properties_hold_during_removals() {
    with_tree_and_generator(|mut tree, mut gen| {
        let keys: Vec<_> = std::iter::repeat_with(|| gen.next()).take(300).collect();
        for key in keys.clone() {
            tree.insert(key);
        }
        for key in &keys {
            assert!(tree.remove(key));
            tree.check_rb_properties();
        }
        assert!(tree.is_empty());
        assert!(tree.node_ref(tree.root, Node::is_sentinel));
    });
}

#[test]
fn drains_to_empty_in_reverse_removal_order() {
    with_tree_and_generator(|mut tree, mut gen| {
        let keys: Vec<_> = std::iter::repeat_with(|| gen.next()).take(300).collect();
        for key in keys.clone() {
            tree.insert(key);
        }
        for key in keys.iter().rev() {
            assert!(tree.remove(key));
        }
        assert!(tree.is_empty());
        assert!(tree.node_ref(tree.root, Node::is_sentinel));
    });
}

#[test]
fn len_updates_and_arena_stays_compact() {
    with_tree_and_generator(|mut tree, mut gen| {
        let keys: Vec<_> = std::iter::repeat_with(|| gen.next()).take(100).collect();
        for key in keys.clone() {
            tree.insert(key);
        }
        assert_eq!(tree.len(), 100);
        assert_eq!(tree.nodes.len(), 101);
        for key in &keys {
            assert!(tree.remove(key));
        }
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.nodes.len(), 1);
    });
}

#[test]
fn search_finds_inserted_and_misses_removed() {
    let mut tree = KeyTree::new();
    for key in [543, 206, 85, 850, 879, 471, 807, 590, 350] {
        tree.insert(key);
    }
    for key in [206, 471, 590, 350, 850, 879] {
        assert!(tree.search(&key).is_some());
        assert!(tree.remove(&key));
        assert!(tree.search(&key).is_none());
    }
    for key in [85, 543, 807] {
        assert!(tree.search(&key).is_some());
    }
}

#[test]
fn duplicate_keys_count_and_remove_one_at_a_time() {
    let mut tree = KeyTree::new();
    for key in [5, 3, 5, 9, 5] {
        tree.insert(key);
    }
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.iter().filter(|&&key| key == 5).count(), 3);
    assert!(tree.remove(&5));
    assert_eq!(tree.iter().filter(|&&key| key == 5).count(), 2);
    assert!(tree.remove(&5));
    assert!(tree.remove(&5));
    assert!(!tree.remove(&5));
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![3, 9]);
    tree.check_rb_properties();
}

#[test]
fn minimum_and_maximum_match_in_order_bounds() {
    with_tree_and_generator(|mut tree, mut gen| {
        assert_eq!(tree.minimum(), None);
        assert_eq!(tree.maximum(), None);
        let keys: Vec<_> = std::iter::repeat_with(|| gen.next()).take(500).collect();
        for key in keys {
            tree.insert(key);
        }
        let sorted: Vec<&i32> = tree.iter().collect();
        assert_eq!(tree.minimum(), sorted.first().copied());
        assert_eq!(tree.maximum(), sorted.last().copied());
    });
}

#[test]
fn successor_predecessor_walks_match_in_order() {
    with_tree_and_generator(|mut tree, mut gen| {
        let keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(300)
            .collect();
        for key in keys {
            tree.insert(key);
        }
        let expected: Vec<i32> = tree.iter().copied().collect();

        let mut forward = Vec::new();
        let mut cur = tree.search(&expected[0]);
        while let Some(idx) = cur {
            forward.push(*tree.key(idx).unwrap());
            cur = tree.successor(idx);
        }
        assert_eq!(forward, expected);

        let mut backward = Vec::new();
        let mut cur = tree.search(expected.last().unwrap());
        while let Some(idx) = cur {
            backward.push(*tree.key(idx).unwrap());
            cur = tree.predecessor(idx);
        }
        backward.reverse();
        assert_eq!(backward, expected);
    });
}

#[test]
fn single_node_has_no_neighbors() {
    let mut tree = KeyTree::new();
    tree.insert(42);
    let root = tree.search(&42).unwrap();
    assert!(tree.successor(root).is_none());
    assert!(tree.predecessor(root).is_none());
}

fn reference_orders(
    tree: &KeyTree<i32>,
    x: NodeIndex<u32>,
    pre: &mut Vec<i32>,
    ino: &mut Vec<i32>,
    post: &mut Vec<i32>,
) {
    if tree.node_ref(x, Node::is_sentinel) {
        return;
    }
    pre.push(*tree.node_ref(x, Node::key));
    reference_orders(tree, tree.node_ref(x, Node::left), pre, ino, post);
    ino.push(*tree.node_ref(x, Node::key));
    reference_orders(tree, tree.node_ref(x, Node::right), pre, ino, post);
    post.push(*tree.node_ref(x, Node::key));
}

#[test]
fn traversal_orders_match_recursive_reference() {
    with_tree_and_generator(|mut tree, mut gen| {
        for _ in 0..200 {
            tree.insert(gen.next());
        }
        let mut pre = Vec::new();
        let mut ino = Vec::new();
        let mut post = Vec::new();
        reference_orders(&tree, tree.root, &mut pre, &mut ino, &mut post);
        assert_eq!(tree.pre_order().copied().collect::<Vec<_>>(), pre);
        assert_eq!(tree.in_order().copied().collect::<Vec<_>>(), ino);
        assert_eq!(tree.post_order().copied().collect::<Vec<_>>(), post);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), ino);
    });
}

#[test]
fn fixed_dataset_walkthrough() {
    let mut tree = KeyTree::new();
    for key in [543, 206, 85, 850, 879, 471, 807, 590, 350] {
        tree.insert(key);
        tree.check_rb_properties();
    }
    assert_eq!(
        tree.iter().copied().collect::<Vec<_>>(),
        vec![85, 206, 350, 471, 543, 590, 807, 850, 879]
    );
    assert_eq!(tree.minimum(), Some(&85));
    assert_eq!(tree.maximum(), Some(&879));

    for key in [206, 471, 590, 350, 850, 879] {
        assert!(tree.remove(&key));
        tree.check_rb_properties();
    }
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![85, 543, 807]);
}

#[test]
fn remove_absent_key_is_a_no_op() {
    let mut empty = KeyTree::new();
    assert!(!empty.remove(&1));

    with_tree_and_generator(|mut tree, mut gen| {
        let keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(100)
            .collect();
        for key in keys {
            tree.insert(key);
        }
        let before: Vec<i32> = tree.iter().copied().collect();
        assert!(!tree.remove(&2000));
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), before);
        assert_eq!(tree.len(), 100);
    });
}

#[test]
fn clear_resets_arena() {
    let mut tree = KeyTree::new();
    tree.insert(1);
    tree.insert(2);
    tree.insert(3);
    assert_eq!(tree.len(), 3);
    tree.clear();
    assert_eq!(tree.len(), 0);
    assert!(tree.is_empty());
    assert_eq!(tree.nodes.len(), 1);
    assert!(tree.nodes[0].is_sentinel());
    assert_eq!(tree.minimum(), None);
    tree.insert(7);
    assert_eq!(tree.minimum(), Some(&7));
}

#[test]
fn print_describes_structure() {
    let mut tree: KeyTree<i32> = KeyTree::new();
    assert_eq!(tree.print(), "");
    tree.insert(2);
    tree.insert(1);
    tree.insert(3);
    assert_eq!(
        tree.print(),
        "2(B) is root\n1(R) is 2's left child\n3(R) is 2's right child\n"
    );
    assert_eq!(tree.key(NodeIndex::new(0)), None);
}

#[test]
fn from_iter_extend_and_into_iter() {
    let mut tree: KeyTree<i32> = [5, 1, 4].into_iter().collect();
    tree.extend([2, 3]);
    assert_eq!(tree.len(), 5);
    let keys: Vec<i32> = tree.into_iter().collect();
    assert_eq!(keys, vec![1, 2, 3, 4, 5]);
}

#[cfg(feature = "serde")]
#[test]
fn serde_round_trip_preserves_order() {
    use serde_json::{json, Value};

    let mut tree = KeyTree::<i32>::new();
    tree.insert(2);
    tree.insert(1);
    tree.insert(3);

    // Serialize the tree to JSON
    let serialized = serde_json::to_string(&tree).unwrap();
    let expected = json!({
        "nodes": [
            // sentinel node
            {
                "left": null,
                "right": null,
                "parent": null,
                "color": "Black",
                "key": null
            },
            {
                "left": 2,
                "right": 3,
                "parent": 0,
                "color": "Black",
                "key": 2
            },
            {
                "left": 0,
                "right": 0,
                "parent": 1,
                "color": "Red",
                "key": 1
            },
            {
                "left": 0,
                "right": 0,
                "parent": 1,
                "color": "Red",
                "key": 3
            }
        ],
        "root": 1,
        "len": 3
    });
    let actual: Value = serde_json::from_str(&serialized).unwrap();
    assert_eq!(expected, actual);

    // Deserialize the tree from JSON
    let deserialized: KeyTree<i32> = serde_json::from_str(&serialized).unwrap();
    let dv: Vec<_> = deserialized.iter().collect();
    let ev: Vec<_> = tree.iter().collect();

    assert_eq!(ev, dv);
}
