use tiny_keccak::{Hasher, Keccak};

use super::HashMethod;
use crate::domain::digest::{Digest, DIGEST_SIZE};

/// Keccak-256 as used by Ethereum sorted-pair tree tooling.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keccak256;
impl HashMethod for Keccak256 {
    fn hash(data: &[u8]) -> Digest {
        let mut out = [0u8; DIGEST_SIZE];
        let mut keccak = Keccak::v256();
        keccak.update(data);
        keccak.finalize(&mut out);
        Digest::new(out)
    }

    fn hash_nodes(left: &Digest, right: &Digest) -> Digest {
        let mut out = [0u8; DIGEST_SIZE];
        let mut keccak = Keccak::v256();
        keccak.update(left.as_ref());
        keccak.update(right.as_ref());
        keccak.finalize(&mut out);
        Digest::new(out)
    }
}
