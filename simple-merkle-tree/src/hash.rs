use std::{fmt, str::FromStr};

use crate::{Error, Result};

/// Length in bytes of every digest produced by a [`MerkleHasher`].
pub const HASH_SIZE: usize = 32;

/// A fixed-size digest.
///
/// The all-zero value is reserved as [`Hash::UNDEF`], the root of an absent
/// tree.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    /// The undefined digest, returned for absent trees and absent roots.
    pub const UNDEF: Hash = Hash([0u8; HASH_SIZE]);

    /// Wrap raw digest bytes.
    pub const fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }

    /// Copy a digest out of a slice that must be exactly [`HASH_SIZE`] long.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; HASH_SIZE] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: HASH_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Hash(array))
    }

    /// Borrow the digest bytes.
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Copy the digest bytes into a `Vec`.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Whether this is the undefined digest.
    pub fn is_undef(&self) -> bool {
        *self == Self::UNDEF
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }
}

impl From<Hash> for [u8; HASH_SIZE] {
    fn from(hash: Hash) -> Self {
        hash.0
    }
}

impl TryFrom<&[u8]> for Hash {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Hash::try_from_slice(bytes)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", hex::encode(self.0))
    }
}

impl FromStr for Hash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| Error::InvalidHex(e.to_string()))?;
        Hash::try_from_slice(&bytes)
    }
}

/// The hash function a tree is built with.
///
/// Implementations must be deterministic. Any `Fn(&[u8]) -> Hash` closure
/// works, so callers can swap in a substitute without touching the tree.
pub trait MerkleHasher {
    /// Hash an arbitrary byte string into a digest.
    fn hash(&self, data: &[u8]) -> Hash;
}

impl<F> MerkleHasher for F
where
    F: Fn(&[u8]) -> Hash,
{
    fn hash(&self, data: &[u8]) -> Hash {
        self(data)
    }
}

/// Blake3 with a 32-byte output.
#[cfg(feature = "blake3")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Hasher;

#[cfg(feature = "blake3")]
impl MerkleHasher for Blake3Hasher {
    fn hash(&self, data: &[u8]) -> Hash {
        Hash(*blake3::hash(data).as_bytes())
    }
}

/// Hash two sibling digests into their parent: `H(left || right)`.
///
/// The concatenation order is fixed; `hash_pair(h, a, b)` and
/// `hash_pair(h, b, a)` differ for `a != b`.
pub fn hash_pair<H: MerkleHasher + ?Sized>(hasher: &H, left: &Hash, right: &Hash) -> Hash {
    let mut input = [0u8; HASH_SIZE * 2];
    input[..HASH_SIZE].copy_from_slice(&left.0);
    input[HASH_SIZE..].copy_from_slice(&right.0);
    hasher.hash(&input)
}
