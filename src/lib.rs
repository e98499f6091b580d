#![deny(clippy::all)]

//! Verification of binary Merkle tree membership from compact proofs.
//!
//! Single proofs are sibling paths folded with sorted-pair hashing, so they
//! carry no left/right bits. Multiproofs cover several leaves with one
//! shared sibling pool and a flag per merge step saying where that step's
//! second operand comes from.
//!
//! Every verifier has a `_with` form taking the pairwise hash as a closure
//! in place of the default sorted-pair hash of the chosen [`HashMethod`].

pub mod domain;

pub use domain::{
    batch::{verify_multi_proofs_parallel, verify_proofs_parallel},
    digest::{Digest, DIGEST_SIZE},
    error::{MerkleError, MultiproofFault},
    hash::{HashMethod, Keccak256, Sha256},
    pair::{combine, combine_ordered},
    proof::{
        process_multi_proof, process_multi_proof_with, process_proof, process_proof_with,
        verify_multi_proof, verify_multi_proof_with, verify_proof, verify_proof_with, MerkleProof,
        MultiProof,
    },
};
