use alloc::vec::Vec;

use crate::{
    Felt, ZERO,
    hash::merge_nodes,
    merkle::{
        IndexedTreeLeafPreimage, MembershipWitness, NonMembershipHint, NullifierLeafPreimage,
        PublicDataTreeLeafPreimage,
    },
};

// INDEXED TREE LEAF
// ================================================================================================

/// A leaf preimage which [IndexedTree] knows how to create and relink.
pub trait IndexedTreeLeaf: IndexedTreeLeafPreimage + Copy + PartialEq {
    /// Returns a leaf for `key` holding `value`, with no successor.
    fn from_key_value(key: Felt, value: Felt) -> Self;

    /// Returns a copy of this leaf pointing at the given successor.
    fn with_successor(&self, next_key: Felt, next_index: u64) -> Self;
}

impl IndexedTreeLeaf for NullifierLeafPreimage {
    fn from_key_value(key: Felt, _value: Felt) -> Self {
        NullifierLeafPreimage::new(key, ZERO, 0)
    }

    fn with_successor(&self, next_key: Felt, next_index: u64) -> Self {
        NullifierLeafPreimage::new(self.nullifier(), next_key, next_index)
    }
}

impl IndexedTreeLeaf for PublicDataTreeLeafPreimage {
    fn from_key_value(key: Felt, value: Felt) -> Self {
        PublicDataTreeLeafPreimage::new(key, value, ZERO, 0)
    }

    fn with_successor(&self, next_key: Felt, next_index: u64) -> Self {
        PublicDataTreeLeafPreimage::new(self.slot(), self.value(), next_key, next_index)
    }
}

// INDEXED TREE
// ================================================================================================

/// An append-only indexed Merkle tree of height `HEIGHT`, kept entirely in memory.
///
/// The tree starts with a zero leaf at index 0 so that every non-zero key has a low leaf. Nodes
/// are recomputed on every query, which is only acceptable for the handful of leaves tests use.
#[derive(Debug, Clone)]
pub struct IndexedTree<L, const HEIGHT: usize> {
    leaves: Vec<L>,
}

impl<L: IndexedTreeLeaf, const HEIGHT: usize> IndexedTree<L, HEIGHT> {
    pub fn new() -> Self {
        Self { leaves: vec![L::empty()] }
    }

    /// Inserts `key` with a zero value and returns the index of the new leaf.
    pub fn insert(&mut self, key: Felt) -> u64 {
        self.insert_with_value(key, ZERO)
    }

    /// Inserts `key` holding `value` and returns the index of the new leaf.
    ///
    /// # Panics
    /// Panics if `key` is already in the tree or the tree is full.
    pub fn insert_with_value(&mut self, key: Felt, value: Felt) -> u64 {
        let low_index = self.low_leaf_index(key).expect("key is already in the tree");
        let new_index = self.leaves.len() as u64;
        assert!(HEIGHT >= u64::BITS as usize || new_index < 1 << HEIGHT, "tree is full");

        let low_leaf = self.leaves[low_index];
        let leaf = L::from_key_value(key, value)
            .with_successor(low_leaf.next_key(), low_leaf.next_index());
        self.leaves[low_index] = low_leaf.with_successor(key, new_index);
        self.leaves.push(leaf);

        new_index
    }

    pub fn root(&self) -> Felt {
        self.levels()[HEIGHT][0]
    }

    /// Returns the leaf holding `key`.
    pub fn leaf(&self, key: Felt) -> Option<&L> {
        self.leaves.iter().find(|leaf| leaf.key() == key && !leaf.is_empty())
    }

    /// Returns the membership witness of the leaf holding `key`.
    pub fn membership_witness(&self, key: Felt) -> Option<MembershipWitness<HEIGHT>> {
        let index = self.leaves.iter().position(|leaf| leaf.key() == key && !leaf.is_empty())?;
        Some(self.witness_at(index))
    }

    /// Returns the low leaf of `key` together with its membership witness, or `None` if `key` is
    /// in the tree.
    pub fn non_membership_hint(&self, key: Felt) -> Option<NonMembershipHint<HEIGHT, L>> {
        let index = self.low_leaf_index(key)?;
        Some(NonMembershipHint::new(self.witness_at(index), self.leaves[index]))
    }

    fn low_leaf_index(&self, key: Felt) -> Option<usize> {
        self.leaves.iter().position(|leaf| leaf.is_low_leaf_for(key))
    }

    fn witness_at(&self, index: usize) -> MembershipWitness<HEIGHT> {
        self.membership_witness_at(index as u64).expect("index of a stored leaf fits the tree")
    }

    /// Returns the membership witness of the slot at `leaf_index`, whether it holds a leaf or
    /// not, or `None` if the index does not fit the tree.
    pub fn membership_witness_at(&self, leaf_index: u64) -> Option<MembershipWitness<HEIGHT>> {
        let levels = self.levels();
        let mut sibling_path = [ZERO; HEIGHT];
        let mut node_index = usize::try_from(leaf_index).ok()?;
        let mut empty_subtree = ZERO;
        for (depth, sibling) in sibling_path.iter_mut().enumerate() {
            *sibling = levels[depth].get(node_index ^ 1).copied().unwrap_or(empty_subtree);
            node_index >>= 1;
            empty_subtree = merge_nodes(empty_subtree, empty_subtree);
        }
        MembershipWitness::new(leaf_index, sibling_path).ok()
    }

    /// Returns the populated prefix of every level, leaves first. Each level below the root is
    /// padded to an even length with the root of an empty subtree of that depth.
    fn levels(&self) -> Vec<Vec<Felt>> {
        let mut levels = Vec::with_capacity(HEIGHT + 1);
        let mut level: Vec<Felt> = self.leaves.iter().map(|leaf| leaf.hash()).collect();
        let mut empty_subtree = ZERO;

        for _ in 0..HEIGHT {
            if level.len() % 2 == 1 {
                level.push(empty_subtree);
            }
            let parents = level.chunks(2).map(|pair| merge_nodes(pair[0], pair[1])).collect();
            levels.push(level);
            level = parents;
            empty_subtree = merge_nodes(empty_subtree, empty_subtree);
        }
        levels.push(level);

        levels
    }
}

impl<L: IndexedTreeLeaf, const HEIGHT: usize> Default for IndexedTree<L, HEIGHT> {
    fn default() -> Self {
        Self::new()
    }
}
