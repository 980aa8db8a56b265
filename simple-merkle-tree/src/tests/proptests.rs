use proptest::prelude::*;

use super::{leaves, sip};
use crate::{Blake3Hasher, Hash, MerkleTree};

/// Reference root built level by level, duplicating a lone last node.
///
/// Produces the same root as the padded flat array because an all-padding
/// subtree never reaches a node with a present left sibling.
fn reference_root(hashes: &[Hash]) -> Hash {
    let mut level = hashes.to_vec();
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| {
                let right = pair.get(1).unwrap_or(&pair[0]);
                crate::hash_pair(&Blake3Hasher, &pair[0], right)
            })
            .collect();
    }
    level[0]
}

fn expected_depth(count: u32) -> u32 {
    if count <= 1 {
        0
    } else {
        (count - 1).ilog2() + 1
    }
}

proptest! {
    #[test]
    fn test_root_is_deterministic(count in 1u32..300u32) {
        let hashes = leaves(count);
        let first = MerkleTree::from_hashes(&Blake3Hasher, &hashes).expect("tree");
        let second = MerkleTree::from_hashes(&Blake3Hasher, &hashes).expect("tree");
        prop_assert_eq!(first.root(), second.root());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_depth_is_ceil_log2(count in 1u32..2049u32) {
        let tree = MerkleTree::from_hashes(&sip, &leaves(count)).expect("tree");
        prop_assert_eq!(tree.depth(), expected_depth(count));
        prop_assert_eq!(tree.width(), (count as usize).next_power_of_two());
        prop_assert_eq!(tree.leaf_count(), count as usize);
    }

    #[test]
    fn test_matches_reference_root(count in 1u32..300u32) {
        let hashes = leaves(count);
        let tree = MerkleTree::from_hashes(&Blake3Hasher, &hashes).expect("tree");
        prop_assert_eq!(tree.root(), reference_root(&hashes));
    }

    #[test]
    fn test_swapping_distinct_leaves_changes_root(
        count in 2u32..200u32,
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let mut hashes = leaves(count);
        let (i, j) = (a.index(count as usize), b.index(count as usize));
        prop_assume!(i != j);
        let before = MerkleTree::from_hashes(&Blake3Hasher, &hashes).expect("tree").root();
        hashes.swap(i, j);
        let after = MerkleTree::from_hashes(&Blake3Hasher, &hashes).expect("tree").root();
        prop_assert_ne!(before, after);
    }

    #[test]
    fn test_payloads_agree_with_hashes(payloads in prop::collection::vec(any::<Vec<u8>>(), 1..64)) {
        let hashes: Vec<Hash> = payloads
            .iter()
            .map(|p| Hash::from_bytes(*blake3::hash(p).as_bytes()))
            .collect();
        let from_payloads = MerkleTree::from_payloads(&Blake3Hasher, &payloads).expect("tree");
        let from_hashes = MerkleTree::from_hashes(&Blake3Hasher, &hashes).expect("tree");
        prop_assert_eq!(from_payloads.root(), from_hashes.root());
    }
}
