//! Many independent verifications against one root, spread over the rayon
//! thread pool. Each call is pure, so results only depend on the inputs.

use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, info};
use rayon::prelude::*;

use super::{
    digest::Digest,
    hash::HashMethod,
    proof::{MerkleProof, MultiProof},
};

/// One result per `(proof, leaf)` pair, in input order.
pub fn verify_proofs_parallel<Method>(
    root: &Digest,
    items: &[(MerkleProof<Method>, Digest)],
) -> Vec<bool>
where
    Method: HashMethod + Sync,
{
    let start = Instant::now();
    let results: Vec<bool> = items
        .par_iter()
        .map(|(proof, leaf)| proof.verify(root, *leaf))
        .collect();
    debug!(
        "Verifying {} single proofs took {:?}",
        items.len(),
        start.elapsed()
    );
    info!(
        "{} of {} single proofs matched {}",
        results.iter().filter(|ok| **ok).count(),
        items.len(),
        root
    );
    results
}

/// One result per `(multiproof, leaves)` pair, in input order.
///
/// A structurally invalid multiproof fails the whole batch; the error names
/// the offending item.
pub fn verify_multi_proofs_parallel<Method>(
    root: &Digest,
    items: &[(MultiProof<Method>, Vec<Digest>)],
) -> Result<Vec<bool>>
where
    Method: HashMethod + Sync,
{
    let start = Instant::now();
    let results = items
        .par_iter()
        .enumerate()
        .map(|(index, (multi, leaves))| {
            multi
                .verify(root, leaves)
                .with_context(|| format!("multiproof #{index} is malformed"))
        })
        .collect::<Result<Vec<bool>>>()?;
    debug!(
        "Verifying {} multiproofs took {:?}",
        items.len(),
        start.elapsed()
    );
    info!(
        "{} of {} multiproofs matched {}",
        results.iter().filter(|ok| **ok).count(),
        items.len(),
        root
    );
    Ok(results)
}
