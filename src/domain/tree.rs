//! Array-backed sorted-pair tree used to produce proofs for tests.
//!
//! Nodes live in heap order: `tree[0]` is the root, the children of `i` are
//! `2i + 1` and `2i + 2`, and the `n` leaves occupy the last `n` slots.

use std::collections::VecDeque;
use std::marker::PhantomData;
use std::time::Instant;

use anyhow::{anyhow, bail, Result};
use log::debug;
use rayon::prelude::*;

use super::{
    digest::Digest,
    hash::HashMethod,
    pair::combine_ordered,
    proof::{MerkleProof, MultiProof},
};

pub struct ReferenceTree<Method: HashMethod> {
    pub tree: Vec<Digest>,
    leaves_len: usize,
    method: PhantomData<Method>,
}

impl<Method: HashMethod> ReferenceTree<Method> {
    fn parent_index(i: usize) -> Result<usize> {
        if i == 0 {
            Err(anyhow!("Root has no parent (index = 0)"))
        } else {
            Ok((i - 1) / 2)
        }
    }

    fn sibling_index(i: usize) -> Result<usize> {
        if i == 0 {
            Err(anyhow!("Root has no sibling (index = 0)"))
        } else if i % 2 == 1 {
            Ok(i + 1)
        } else {
            Ok(i - 1)
        }
    }

    pub fn from_leaves_data(leaves: &[Vec<u8>]) -> Result<Self> {
        let hashed: Vec<Digest> = leaves.par_iter().map(|leaf| Method::hash_leaf(leaf)).collect();
        Self::from_leaves_hashes(hashed)
    }

    pub fn from_leaves_hashes(leaves: Vec<Digest>) -> Result<Self> {
        let start = Instant::now();
        let leaves_len = leaves.len();
        if leaves_len == 0 {
            bail!("Leaves cannot be empty");
        }

        let tree_len = 2 * leaves_len - 1;
        let mut tree = vec![Digest::ZERO; tree_len];
        tree[tree_len - leaves_len..].copy_from_slice(&leaves);
        for i in (0..tree_len - leaves_len).rev() {
            tree[i] = combine_ordered::<Method>(&tree[2 * i + 1], &tree[2 * i + 2]);
        }
        debug!("Building a {}-leaf tree took {:?}", leaves_len, start.elapsed());

        Ok(Self {
            tree,
            leaves_len,
            method: PhantomData,
        })
    }

    pub fn get_root(&self) -> Digest {
        self.tree[0]
    }

    fn tree_index(&self, leaf_index: usize) -> Result<usize> {
        if leaf_index >= self.leaves_len {
            bail!("Index out of range");
        }
        Ok(self.tree.len() - self.leaves_len + leaf_index)
    }

    pub fn get_proof(&self, leaf_index: usize) -> Result<MerkleProof<Method>> {
        let mut node = self.tree_index(leaf_index)?;
        let mut path = Vec::new();
        while node > 0 {
            path.push(self.tree[Self::sibling_index(node)?]);
            node = Self::parent_index(node)?;
        }
        Ok(MerkleProof::new(path))
    }

    /// Returns the selected leaves in the order the verifier must consume
    /// them, together with the sibling pool and routing flags.
    pub fn get_multi_proof(
        &self,
        leaf_indices: &[usize],
    ) -> Result<(Vec<Digest>, MultiProof<Method>)> {
        let mut indices = leaf_indices
            .iter()
            .map(|&i| self.tree_index(i))
            .collect::<Result<Vec<_>>>()?;
        indices.sort_unstable_by(|a, b| b.cmp(a));
        if indices.windows(2).any(|pair| pair[0] == pair[1]) {
            bail!("Cannot prove duplicated index");
        }

        let mut stack: VecDeque<usize> = indices.iter().copied().collect();
        let mut proof = Vec::new();
        let mut flags = Vec::new();
        while let Some(&j) = stack.front() {
            if j == 0 {
                break;
            }
            stack.pop_front();
            let sibling = Self::sibling_index(j)?;
            if stack.front() == Some(&sibling) {
                flags.push(true);
                stack.pop_front();
            } else {
                flags.push(false);
                proof.push(self.tree[sibling]);
            }
            stack.push_back(Self::parent_index(j)?);
        }
        if indices.is_empty() {
            proof.push(self.get_root());
        }

        let leaves = indices.iter().map(|&i| self.tree[i]).collect();
        Ok((leaves, MultiProof::new(proof, flags)))
    }
}

#[cfg(test)]
mod tests {
    use super::ReferenceTree;
    use crate::domain::hash::{HashMethod, Sha256};

    #[test]
    fn test_empty_leaves_error() {
        assert!(ReferenceTree::<Sha256>::from_leaves_hashes(vec![]).is_err());
    }

    #[test]
    fn test_single_leaf_tree() {
        let tree = ReferenceTree::<Sha256>::from_leaves_data(&[b"only_leaf".to_vec()]).unwrap();
        let expected = Sha256::hash_leaf(b"only_leaf");

        assert_eq!(tree.get_root(), expected);
        assert!(tree.get_proof(0).unwrap().is_empty());
    }

    #[test]
    fn test_out_of_range_and_duplicates() {
        let tree =
            ReferenceTree::<Sha256>::from_leaves_data(&[b"a".to_vec(), b"b".to_vec()]).unwrap();
        assert!(tree.get_proof(999).is_err());
        assert!(tree.get_multi_proof(&[0, 0]).is_err());
        assert!(tree.get_multi_proof(&[2]).is_err());
    }

    #[test]
    fn test_every_single_proof_verifies() {
        let leaves: Vec<Vec<u8>> = (0..7).map(|i| format!("leaf_{i}").into_bytes()).collect();
        let tree = ReferenceTree::<Sha256>::from_leaves_data(&leaves).unwrap();
        let root = tree.get_root();

        for (i, data) in leaves.iter().enumerate() {
            let proof = tree.get_proof(i).unwrap();
            assert!(
                proof.verify(&root, Sha256::hash_leaf(data)),
                "Proof for leaf {} must verify",
                i
            );
        }
    }
}
