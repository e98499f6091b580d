use std::fmt;
use std::marker::PhantomData;

use itertools::Itertools;
use log::{debug, trace};

use crate::domain::{
    digest::Digest,
    error::{MerkleError, MultiproofFault},
    hash::{HashMethod, Sha256},
    pair::combine_ordered,
};

/// Leaves first, then computed hashes in the order they were written.
struct PendingQueue<'a> {
    leaves: &'a [Digest],
    leaf_pos: usize,
    hash_pos: usize,
}

impl PendingQueue<'_> {
    fn next(&mut self, hashes: &[Digest], step: usize) -> Result<Digest, MultiproofFault> {
        if let Some(leaf) = self.leaves.get(self.leaf_pos) {
            self.leaf_pos += 1;
            return Ok(*leaf);
        }
        let hash = hashes
            .get(self.hash_pos)
            .ok_or(MultiproofFault::HashQueueExhausted { step })?;
        self.hash_pos += 1;
        Ok(*hash)
    }
}

fn check_lengths(leaves: usize, proof: usize, flags: usize) -> Result<(), MultiproofFault> {
    if leaves == 0 && proof == 0 {
        return Err(MultiproofFault::EmptyInput);
    }
    // leaves + proof >= 1 here, so the subtraction cannot wrap
    if leaves + proof - 1 != flags {
        return Err(MultiproofFault::LengthMismatch {
            leaves,
            proof,
            flags,
        });
    }
    Ok(())
}

fn reduce<F>(
    proof: &[Digest],
    flags: &[bool],
    leaves: &[Digest],
    hash_fn: F,
) -> Result<Digest, MultiproofFault>
where
    F: Fn(&Digest, &Digest) -> Digest,
{
    check_lengths(leaves.len(), proof.len(), flags.len())?;

    let mut hashes: Vec<Digest> = Vec::with_capacity(flags.len());
    let mut pending = PendingQueue {
        leaves,
        leaf_pos: 0,
        hash_pos: 0,
    };
    let mut proof_pos = 0;

    for (step, &from_pending) in flags.iter().enumerate() {
        let a = pending.next(&hashes, step)?;
        let b = if from_pending {
            pending.next(&hashes, step)?
        } else {
            let sibling = proof
                .get(proof_pos)
                .ok_or(MultiproofFault::ProofExhausted { step })?;
            proof_pos += 1;
            *sibling
        };
        hashes.push(hash_fn(&a, &b));
    }

    if let Some(root) = hashes.last() {
        // Implied by the queue accounting above, checked regardless
        if proof_pos != proof.len() {
            return Err(MultiproofFault::ProofNotConsumed {
                consumed: proof_pos,
                len: proof.len(),
            });
        }
        return Ok(*root);
    }

    // No merge steps: exactly one of leaves/proof holds a single digest
    leaves
        .first()
        .or_else(|| proof.first())
        .copied()
        .ok_or(MultiproofFault::EmptyInput)
}

/// Rebuild a root from several leaves at once with an injected pairwise hash.
///
/// Each entry of `flags` is one merge step. Its first operand always comes
/// from the pending queue (unused leaves, then computed hashes); the second
/// comes from the pending queue when the flag is `true` and from `proof`
/// when it is `false`. `hash_fn` sees the operands in exactly that order.
///
/// Fails with [`MerkleError::InvalidMultiproof`] when the lengths disagree
/// (`flags != leaves + proof - 1`, or nothing supplied at all), when either
/// queue runs dry mid-reduction, or when proof elements are left over.
pub fn process_multi_proof_with<F>(
    proof: &[Digest],
    flags: &[bool],
    leaves: &[Digest],
    hash_fn: F,
) -> Result<Digest, MerkleError>
where
    F: Fn(&Digest, &Digest) -> Digest,
{
    reduce(proof, flags, leaves, hash_fn).map_err(|fault| {
        debug!(
            "rejected multiproof ({} leaves, {} proof, {} flags): {}",
            leaves.len(),
            proof.len(),
            flags.len(),
            fault
        );
        MerkleError::InvalidMultiproof(fault)
    })
}

pub fn process_multi_proof<Method: HashMethod>(
    proof: &[Digest],
    flags: &[bool],
    leaves: &[Digest],
) -> Result<Digest, MerkleError> {
    process_multi_proof_with(proof, flags, leaves, combine_ordered::<Method>)
}

pub fn verify_multi_proof_with<F>(
    proof: &[Digest],
    flags: &[bool],
    root: &Digest,
    leaves: &[Digest],
    hash_fn: F,
) -> Result<bool, MerkleError>
where
    F: Fn(&Digest, &Digest) -> Digest,
{
    let computed = process_multi_proof_with(proof, flags, leaves, hash_fn)?;
    trace!(
        "multiproof over {} leaves computed {}, expected {}",
        leaves.len(),
        computed,
        root
    );
    Ok(computed == *root)
}

/// `Ok(true)` iff every leaf is covered by `root`. A well-formed proof that
/// leads elsewhere is `Ok(false)`; malformed input is an `Err`.
pub fn verify_multi_proof<Method: HashMethod>(
    proof: &[Digest],
    flags: &[bool],
    root: &Digest,
    leaves: &[Digest],
) -> Result<bool, MerkleError> {
    verify_multi_proof_with(proof, flags, root, leaves, combine_ordered::<Method>)
}

/// An owned multiproof: the shared sibling pool plus one routing flag per
/// merge step.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct MultiProof<Method = Sha256>
where
    Method: HashMethod,
{
    pub proof: Vec<Digest>,
    pub flags: Vec<bool>,
    method: PhantomData<Method>,
}

impl<Method: HashMethod> MultiProof<Method> {
    pub fn new(proof: Vec<Digest>, flags: Vec<bool>) -> Self {
        Self {
            proof,
            flags,
            method: PhantomData,
        }
    }

    pub fn proof_hashes(&self) -> &[Digest] {
        &self.proof
    }

    pub fn proof_flags(&self) -> &[bool] {
        &self.flags
    }

    pub fn root(&self, leaves: &[Digest]) -> Result<Digest, MerkleError> {
        process_multi_proof::<Method>(&self.proof, &self.flags, leaves)
    }

    pub fn verify(&self, root: &Digest, leaves: &[Digest]) -> Result<bool, MerkleError> {
        verify_multi_proof::<Method>(&self.proof, &self.flags, root, leaves)
    }

    pub fn verify_with<F>(
        &self,
        root: &Digest,
        leaves: &[Digest],
        hash_fn: F,
    ) -> Result<bool, MerkleError>
    where
        F: Fn(&Digest, &Digest) -> Digest,
    {
        verify_multi_proof_with(&self.proof, &self.flags, root, leaves, hash_fn)
    }
}

impl<Method: HashMethod> fmt::Display for MultiProof<Method> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String = self
            .flags
            .iter()
            .map(|&flag| if flag { '1' } else { '0' })
            .collect();
        write!(
            f,
            "proof: [{}], flags: {}",
            self.proof.iter().join(", "),
            flags
        )
    }
}

impl<Method: HashMethod> fmt::Debug for MultiProof<Method> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiProof")
            .field("proof", &self.proof)
            .field("flags", &self.flags)
            .finish()
    }
}
