use std::fmt;

use cosmwasm_schema::cw_serde;
use log::debug;

use crate::config::Config;
use crate::error::{MerkleError, Result};
use crate::hash::{Digest, Hasher};
use crate::tree::MerkleTree;

/// Which side of the running hash a sibling digest sits on.
#[cw_serde]
#[derive(Copy, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// An inclusion proof for one leaf.
///
/// `nodes[i]` and `sides[i]` describe step `i` of the replay. Steps are
/// ordered from the leaf up to the root: entry 0 is the leaf's own sibling.
/// Levels where the target was the unpaired last node contribute no entry.
#[cw_serde]
#[derive(Eq)]
#[serde(deny_unknown_fields)]
pub struct MerklePath {
    /// Sibling digests, leaf to root.
    pub nodes: Vec<Digest>,
    /// Side of each sibling in `nodes`.
    pub sides: Vec<Side>,
    pub leaf_index: u64,
    /// Number of leaves in the tree that issued this path.
    pub leaf_count: u64,
}

impl fmt::Display for MerklePath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "leaf index: {} of {}", self.leaf_index, self.leaf_count)?;
        for (i, (node, side)) in self.entries().enumerate() {
            writeln!(f, "{i}-th node, {side} sibling: {node}")?;
        }
        Ok(())
    }
}

impl MerklePath {
    /// Iterates over `(sibling, side)` pairs, leaf to root.
    pub fn entries(&self) -> impl Iterator<Item = (&Digest, Side)> {
        self.nodes.iter().zip(self.sides.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Performs structural validation only; no hashing.
    ///
    /// The expected number of entries is derived from `leaf_index` and
    /// `leaf_count`, which together fix where the unpaired levels are.
    pub fn validate_basic(&self, config: &Config) -> Result<()> {
        if self.nodes.len() != self.sides.len() {
            return Err(MerkleError::malformed_path(format!(
                "Expected one side per node, got {} nodes and {} sides",
                self.nodes.len(),
                self.sides.len()
            )));
        }
        if self.nodes.len() > config.max_path_len as usize {
            return Err(MerkleError::malformed_path(format!(
                "Expected no more than {} nodes, got {}",
                config.max_path_len,
                self.nodes.len()
            )));
        }
        let expected = expected_path_len(self.leaf_index, self.leaf_count).ok_or_else(|| {
            MerkleError::malformed_path(format!(
                "Invalid leaf index ({}) and/or leaf count ({})",
                self.leaf_index, self.leaf_count
            ))
        })?;
        if self.nodes.len() != expected {
            return Err(MerkleError::malformed_path(format!(
                "Expected {expected} nodes for leaf {} of {}, got {}",
                self.leaf_index,
                self.leaf_count,
                self.nodes.len()
            )));
        }
        Ok(())
    }

    /// Replays the path from `leaf` and returns the resulting root, without
    /// comparing it to anything.
    pub fn compute_root<H: Hasher>(&self, hasher: &H, leaf: &Digest) -> Result<Digest> {
        self.validate_basic(&Config::default())?;
        Ok(self.replay(hasher, leaf))
    }

    /// Combines in recorded order. Callers validate the structure first.
    pub(crate) fn replay<H: Hasher>(&self, hasher: &H, leaf: &Digest) -> Digest {
        self.entries()
            .fold(*leaf, |current, (sibling, side)| match side {
                Side::Right => hasher.combine(&current, sibling),
                Side::Left => hasher.combine(sibling, &current),
            })
    }
}

/// Number of sibling digests in the path of `leaf_index` within a tree of
/// `leaf_count` leaves, or `None` if the index is out of range.
pub fn expected_path_len(leaf_index: u64, leaf_count: u64) -> Option<usize> {
    if leaf_index >= leaf_count {
        return None;
    }
    let mut position = leaf_index;
    let mut width = leaf_count;
    let mut len = 0;
    while width > 1 {
        // An even position without a right neighbour is promoted unpaired.
        if position % 2 == 1 || position + 1 < width {
            len += 1;
        }
        position /= 2;
        width = width / 2 + width % 2;
    }
    Some(len)
}

impl MerkleTree {
    /// Extracts the inclusion proof for the leaf at `leaf_index`.
    pub fn path_by_index(&self, leaf_index: i64) -> Result<MerklePath> {
        let out_of_range = || MerkleError::IndexOutOfRange {
            index: leaf_index,
            leaf_count: self.leaf_count(),
        };
        let index = usize::try_from(leaf_index).map_err(|_| out_of_range())?;
        if index >= self.leaf_count() {
            return Err(out_of_range());
        }

        let mut nodes = Vec::with_capacity(self.height());
        let mut sides = Vec::with_capacity(self.height());
        let mut current = self.root_node();
        // `current` sits at `level + 1`; the target child is at `index >> level`.
        for level in (0..self.height()).rev() {
            // `next_level` only emits `Promoted` or `Inner` above the leaves.
            let Some(left) = current.left() else {
                unreachable!("leaf found above level 0");
            };
            current = match current.right() {
                Some(right) if (index >> level) & 1 == 1 => {
                    nodes.push(*left.digest());
                    sides.push(Side::Left);
                    right
                }
                Some(right) => {
                    nodes.push(*right.digest());
                    sides.push(Side::Right);
                    left
                }
                None => left,
            };
        }
        nodes.reverse();
        sides.reverse();

        debug!(
            "extracted merkle path for leaf {index} of {}: {} nodes",
            self.leaf_count(),
            nodes.len()
        );
        Ok(MerklePath {
            nodes,
            sides,
            leaf_index: index as u64,
            leaf_count: self.leaf_count() as u64,
        })
    }
}
