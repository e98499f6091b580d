use std::fmt;
use std::marker::PhantomData;

use itertools::Itertools;
use log::trace;

use crate::domain::{
    digest::Digest,
    hash::{HashMethod, Sha256},
    pair::combine_ordered,
};

/// Fold `proof` into `leaf` with an injected pairwise hash.
///
/// `hash_fn` is called once per sibling as `hash_fn(&accumulator, &sibling)`
/// and is never reordered; commutativity is the caller's business. The
/// function may read outside state but gets no way to write it.
pub fn process_proof_with<F>(proof: &[Digest], leaf: Digest, hash_fn: F) -> Digest
where
    F: Fn(&Digest, &Digest) -> Digest,
{
    proof
        .iter()
        .fold(leaf, |current, sibling| hash_fn(&current, sibling))
}

/// Recompute the root reached from `leaf` through sorted-pair hashing.
/// An empty proof returns `leaf` itself.
pub fn process_proof<Method: HashMethod>(proof: &[Digest], leaf: Digest) -> Digest {
    process_proof_with(proof, leaf, combine_ordered::<Method>)
}

pub fn verify_proof_with<F>(proof: &[Digest], root: &Digest, leaf: Digest, hash_fn: F) -> bool
where
    F: Fn(&Digest, &Digest) -> Digest,
{
    let computed = process_proof_with(proof, leaf, hash_fn);
    trace!(
        "single proof of {} steps computed {}, expected {}",
        proof.len(),
        computed,
        root
    );
    computed == *root
}

/// `true` iff `leaf` plus `proof` reduces to `root`. A wrong proof is a
/// plain `false`, never an error.
pub fn verify_proof<Method: HashMethod>(proof: &[Digest], root: &Digest, leaf: Digest) -> bool {
    verify_proof_with(proof, root, leaf, combine_ordered::<Method>)
}

/// An owned sibling path from a leaf to the root.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct MerkleProof<Method = Sha256>
where
    Method: HashMethod,
{
    pub steps: Vec<Digest>,
    method: PhantomData<Method>,
}

impl<Method: HashMethod> MerkleProof<Method> {
    pub fn new(steps: Vec<Digest>) -> Self {
        Self {
            steps,
            method: PhantomData,
        }
    }

    pub fn proof_hashes(&self) -> &[Digest] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn root(&self, leaf: Digest) -> Digest {
        process_proof::<Method>(&self.steps, leaf)
    }

    pub fn verify(&self, root: &Digest, leaf: Digest) -> bool {
        verify_proof::<Method>(&self.steps, root, leaf)
    }

    pub fn verify_with<F>(&self, root: &Digest, leaf: Digest, hash_fn: F) -> bool
    where
        F: Fn(&Digest, &Digest) -> Digest,
    {
        verify_proof_with(&self.steps, root, leaf, hash_fn)
    }
}

impl<Method: HashMethod> From<Vec<Digest>> for MerkleProof<Method> {
    fn from(steps: Vec<Digest>) -> Self {
        Self::new(steps)
    }
}

impl<Method: HashMethod> fmt::Display for MerkleProof<Method> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.steps.iter().join(", "))
    }
}

impl<Method: HashMethod> fmt::Debug for MerkleProof<Method> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MerkleProof")
            .field("steps", &self.steps)
            .finish()
    }
}
