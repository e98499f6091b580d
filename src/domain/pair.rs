use super::{digest::Digest, hash::HashMethod};

/// Hash `a || b` with the backend's node hash. Operand order is preserved.
pub fn combine<Method: HashMethod>(a: &Digest, b: &Digest) -> Digest {
    Method::hash_nodes(a, b)
}

/// Hash the pair smaller-first, so `combine_ordered(a, b) == combine_ordered(b, a)`.
///
/// This is what lets a proof omit left/right position bits: the verifier
/// never needs to know which side a sibling sits on.
pub fn combine_ordered<Method: HashMethod>(a: &Digest, b: &Digest) -> Digest {
    if a < b {
        combine::<Method>(a, b)
    } else {
        combine::<Method>(b, a)
    }
}
