use super::digest::Digest;

pub mod keccak;
pub mod sha256;

pub use keccak::Keccak256;
pub use sha256::Sha256;

/// A 32-byte hash function usable as a tree backend.
///
/// Implementors are zero-sized markers; the verifiers pick one through a
/// type parameter.
pub trait HashMethod {
    /// Hash arbitrary bytes once.
    fn hash(data: &[u8]) -> Digest;

    /// Hash a leaf's raw data. (Here: the hash applied twice.)
    fn hash_leaf(data: &[u8]) -> Digest {
        let once = Self::hash(data);
        Self::hash(once.as_ref())
    }

    /// Hash two child nodes as the 64 bytes `left || right`.
    fn hash_nodes(left: &Digest, right: &Digest) -> Digest;
}
