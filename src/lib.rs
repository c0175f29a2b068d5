//! `rb-key-tree` is an ordered keyset based on a red-black tree.
//!
//! It fully implements the insertion and deletion functionality of a red-black tree,
//! ensuring that each modification operation requires at most O(logN) time complexity.
//!
//! To safely and efficiently handle the parent-child references of the tree in Rust,
//! `rb-key-tree` uses a vector to simulate pointers: nodes live in an arena and link
//! to each other by index, with a shared black sentinel at index 0 standing in for
//! every absent child. This keeps the tree `Send` and `Unpin`, so it can be moved
//! between threads and does not care about its memory location.
//!
//! Duplicate keys are permitted. Inserting a key equal to ones already present
//! stores another occurrence, placed after the existing equals in the in-order
//! sequence, and `remove` takes occurrences out one at a time.
//!
//! # Example
//!
//! ```rust
//! use rb_key_tree::KeyTree;
//!
//! let mut tree = KeyTree::new();
//! tree.insert(2);
//! tree.insert(1);
//! tree.insert(3);
//! assert_eq!(tree.minimum(), Some(&1));
//! assert_eq!(tree.maximum(), Some(&3));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
//! ```
//!

mod index;
mod iter;
mod keytree;
mod node;

#[cfg(test)]
mod tests;

pub use index::{DefaultIx, IndexType, NodeIndex};
pub use iter::{IntoIter, Iter, PostOrderIter, PreOrderIter};
pub use keytree::KeyTree;
