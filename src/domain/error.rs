use std::fmt;

/// Why a multiproof was rejected before (or instead of) producing a root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiproofFault {
    /// Neither leaves nor proof elements were supplied.
    EmptyInput,
    /// `flags != leaves + proof - 1`.
    LengthMismatch {
        leaves: usize,
        proof: usize,
        flags: usize,
    },
    /// A `false` flag requested a proof element after the proof ran out.
    ProofExhausted { step: usize },
    /// The pending queue reached a hash slot that has not been written yet.
    HashQueueExhausted { step: usize },
    /// Trailing proof elements were left unused.
    ProofNotConsumed { consumed: usize, len: usize },
}

impl fmt::Display for MultiproofFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MultiproofFault::EmptyInput => write!(f, "no leaves and no proof supplied"),
            MultiproofFault::LengthMismatch {
                leaves,
                proof,
                flags,
            } => write!(
                f,
                "{} flags for {} leaves and {} proof elements",
                flags, leaves, proof
            ),
            MultiproofFault::ProofExhausted { step } => {
                write!(f, "proof exhausted at step {}", step)
            }
            MultiproofFault::HashQueueExhausted { step } => {
                write!(f, "no computed hash available at step {}", step)
            }
            MultiproofFault::ProofNotConsumed { consumed, len } => {
                write!(f, "only {} of {} proof elements consumed", consumed, len)
            }
        }
    }
}

#[derive(Debug)]
pub enum MerkleError {
    /// Structurally malformed multiproof input. Distinct from a proof that
    /// is well formed but does not lead to the claimed root.
    InvalidMultiproof(MultiproofFault),
    InvalidDigestLength { expected: usize, got: usize },
    InvalidHex(hex::FromHexError),
}

impl MerkleError {
    pub fn is_invalid_multiproof(&self) -> bool {
        matches!(self, MerkleError::InvalidMultiproof(_))
    }
}

impl From<MultiproofFault> for MerkleError {
    fn from(fault: MultiproofFault) -> Self {
        MerkleError::InvalidMultiproof(fault)
    }
}

impl fmt::Display for MerkleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MerkleError::InvalidMultiproof(fault) => write!(f, "invalid multiproof: {}", fault),
            MerkleError::InvalidDigestLength { expected, got } => {
                write!(f, "digest must be {} bytes, got {}", expected, got)
            }
            MerkleError::InvalidHex(err) => write!(f, "invalid hex digest: {}", err),
        }
    }
}

impl std::error::Error for MerkleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MerkleError::InvalidHex(err) => Some(err),
            _ => None,
        }
    }
}
