use tracing::{debug, trace};

use crate::hash::{hash_pair, Hash, MerkleHasher};

/// Smallest power of two that is `>= n`.
///
/// `n` is returned unchanged when it is already a power of two. Expects
/// `n >= 1`; zero maps to one.
pub fn next_power_of_two(n: usize) -> usize {
    n.next_power_of_two()
}

/// A binary Merkle tree stored level by level in a flat array.
///
/// For `n` leaves padded to width `L` the array has `2L - 1` slots:
/// leaves at `[0, L)`, each parent level appended after its children, and
/// the root in the last slot. Slots in `[n, L)` are padding and stay `None`,
/// as does every parent whose left child is `None`.
///
/// The tree is immutable; changing a leaf means building a new tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    nodes: Box<[Option<Hash>]>,
    leaf_count: usize,
    hash_calls: u32,
}

impl MerkleTree {
    /// Hash every payload into a leaf and build the tree over those leaves.
    ///
    /// Returns `None` when `payloads` is empty.
    pub fn from_payloads<H, P>(hasher: &H, payloads: &[P]) -> Option<Self>
    where
        H: MerkleHasher + ?Sized,
        P: AsRef<[u8]>,
    {
        let leaves: Vec<Hash> = payloads
            .iter()
            .map(|payload| hasher.hash(payload.as_ref()))
            .collect();
        Self::from_hashes(hasher, &leaves)
    }

    /// Build the tree over precomputed leaf digests.
    ///
    /// Returns `None` when `leaves` is empty.
    pub fn from_hashes<H>(hasher: &H, leaves: &[Hash]) -> Option<Self>
    where
        H: MerkleHasher + ?Sized,
    {
        if leaves.is_empty() {
            trace!("no leaves, no merkle tree");
            return None;
        }

        let width = next_power_of_two(leaves.len());
        let size = width * 2 - 1;
        let mut nodes: Vec<Option<Hash>> = vec![None; size];
        for (slot, leaf) in nodes.iter_mut().zip(leaves) {
            *slot = Some(*leaf);
        }

        // Every pair below the root feeds the next free slot, so a single
        // pass walks all levels bottom-up.
        let mut hash_calls = 0u32;
        let mut offset = width;
        for i in (0..size - 1).step_by(2) {
            nodes[offset] = match (nodes[i], nodes[i + 1]) {
                (None, _) => None,
                (Some(left), None) => {
                    hash_calls += 1;
                    Some(hash_pair(hasher, &left, &left))
                }
                (Some(left), Some(right)) => {
                    hash_calls += 1;
                    Some(hash_pair(hasher, &left, &right))
                }
            };
            offset += 1;
        }

        let tree = MerkleTree {
            nodes: nodes.into_boxed_slice(),
            leaf_count: leaves.len(),
            hash_calls,
        };
        debug!(
            leaves = tree.leaf_count,
            width,
            depth = tree.depth(),
            hash_calls,
            "built merkle tree"
        );
        Some(tree)
    }

    /// The root digest, or [`Hash::UNDEF`] if the root slot is empty.
    pub fn root(&self) -> Hash {
        self.nodes
            .last()
            .copied()
            .flatten()
            .unwrap_or(Hash::UNDEF)
    }

    /// Number of levels above the leaves: `floor(log2(slot count))`.
    pub fn depth(&self) -> u32 {
        self.nodes.len().ilog2()
    }

    /// Number of real (non-padding) leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Leaf level width after padding to a power of two.
    pub fn width(&self) -> usize {
        (self.nodes.len() + 1) / 2
    }

    /// The real leaf digests in input order.
    pub fn leaves(&self) -> impl Iterator<Item = Hash> + '_ {
        self.nodes[..self.leaf_count].iter().flatten().copied()
    }

    /// Number of pair hashes computed while building the tree.
    ///
    /// Leaf hashing done by [`MerkleTree::from_payloads`] is not included.
    pub fn hash_calls(&self) -> u32 {
        self.hash_calls
    }
}

/// Queries over a tree that may be absent.
///
/// Building from an empty leaf set yields `None`; this trait lets callers
/// ask for its root and depth without matching on it first.
pub trait MaybeMerkleTree {
    /// Root digest, or [`Hash::UNDEF`] for an absent tree.
    fn root(&self) -> Hash;

    /// Tree depth, or `0` for an absent tree.
    fn depth(&self) -> u32;
}

impl MaybeMerkleTree for Option<MerkleTree> {
    fn root(&self) -> Hash {
        self.as_ref().root()
    }

    fn depth(&self) -> u32 {
        self.as_ref().depth()
    }
}

impl MaybeMerkleTree for Option<&MerkleTree> {
    fn root(&self) -> Hash {
        self.map_or(Hash::UNDEF, MerkleTree::root)
    }

    fn depth(&self) -> u32 {
        self.map_or(0, MerkleTree::depth)
    }
}
