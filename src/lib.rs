//! Huffman coding over an arbitrary symbol alphabet.
//!
//! Count symbols with [`compute_frequencies`], build a [`CodeTree`] from the
//! counts, then use the tree to [`encode`](CodeTree::encode) symbols into bits
//! and [`decode`](CodeTree::decode) them back.
//!
//! ```
//! use huffman_tree::{compute_frequencies, CodeTree};
//!
//! let input = "abracadabra";
//! let tree = CodeTree::build(&compute_frequencies(input.chars()))?;
//! let bits = tree.encode(input.chars())?;
//! let decoded: String = tree.decode(&bits)?.into_iter().collect();
//! assert_eq!(decoded, input);
//! # Ok::<(), huffman_tree::Error>(())
//! ```
//!
//! Persisting the tree alongside the bits is left to the caller.

pub mod bits;
mod code_table;
mod decoder;
mod errors;
mod frequency;
pub mod tree;

use std::{fmt::Debug, hash::Hash};

pub use crate::code_table::CodeTable;
pub use crate::decoder::Decoder;
pub use crate::errors::{Error, Result};
pub use crate::frequency::{compute_frequencies, FrequencyMap};
pub use crate::tree::{BuildStrategy, CodeTree, Node};

/// An element of the input alphabet, e.g. `char` or `u8`.
pub trait Symbol: Copy + Eq + Hash + Debug {}

impl<T: Copy + Eq + Hash + Debug> Symbol for T {}
