pub mod multi;
pub mod single;

pub use multi::{
    process_multi_proof, process_multi_proof_with, verify_multi_proof, verify_multi_proof_with,
    MultiProof,
};
pub use single::{process_proof, process_proof_with, verify_proof, verify_proof_with, MerkleProof};
