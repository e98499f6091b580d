use sha2::Digest as _;

use super::HashMethod;
use crate::domain::digest::Digest;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sha256;
impl HashMethod for Sha256 {
    fn hash(data: &[u8]) -> Digest {
        let mut hasher = sha2::Sha256::new();
        hasher.update(data);
        Digest::new(hasher.finalize().into())
    }

    fn hash_nodes(left: &Digest, right: &Digest) -> Digest {
        // Both halves are streamed in; no 64-byte buffer is assembled
        let mut hasher = sha2::Sha256::new();
        hasher.update(left);
        hasher.update(right);
        Digest::new(hasher.finalize().into())
    }
}
