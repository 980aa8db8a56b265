//! Binary Merkle tree over an ordered sequence of leaves.
//!
//! The tree is stored as one flat array of `2L - 1` optional slots, where `L`
//! is the leaf count rounded up to a power of two. Leaves occupy `[0, L)`,
//! each following level is appended after the previous one and the root is
//! the last slot. Padding slots beyond the real leaves stay empty; a node
//! whose right sibling is empty is paired with itself:
//!
//! `parent = H(left || right)` or `parent = H(left || left)`
//!
//! The hash function is passed in explicitly through [`MerkleHasher`].
//! [`Blake3Hasher`] is provided behind the default `blake3` feature.

#![warn(missing_docs)]

mod error;
pub(crate) mod hash;
pub(crate) mod tree;


pub use error::{Error, Result};
#[cfg(feature = "blake3")]
pub use hash::Blake3Hasher;
pub use hash::{hash_pair, Hash, MerkleHasher, HASH_SIZE};
pub use tree::{next_power_of_two, MaybeMerkleTree, MerkleTree};
