use std::fmt;

use log::{debug, trace};

use crate::error::{MerkleError, Result};
use crate::hash::{Digest, Hasher, Sha256Hasher};
use crate::node::Node;

/// Builds a [`MerkleTree`] bottom-up from ordered leaf digests.
///
/// Adjacent nodes are paired left to right. When a level has odd length its
/// last node is promoted to the next level as is; it is never paired with a
/// copy of itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeBuilder<H = Sha256Hasher> {
    hasher: H,
}

impl<H: Hasher> TreeBuilder<H> {
    pub fn new(hasher: H) -> Self {
        Self { hasher }
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Computes the full tree over `leaf_digests`, in input order.
    pub fn compute_tree<I>(&self, leaf_digests: I) -> Result<MerkleTree>
    where
        I: IntoIterator<Item = Digest>,
    {
        let mut level: Vec<Node> = leaf_digests.into_iter().map(Node::leaf).collect();
        let leaf_count = level.len();

        let mut height = 0;
        while level.len() > 1 {
            level = self.next_level(level);
            height += 1;
            trace!("built level {height} with {} nodes", level.len());
        }

        let root = level.pop().ok_or(MerkleError::EmptyInput)?;
        debug!(
            "computed merkle tree: leaves {leaf_count}, height {height}, root {}",
            root.digest()
        );
        Ok(MerkleTree {
            root,
            leaf_count,
            height,
        })
    }

    /// Hashes each raw item with [`Hasher::hash_leaf`] and builds the tree.
    pub fn from_leaf_data<I, T>(&self, items: I) -> Result<MerkleTree>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.compute_tree(self.hasher.hash_leaves(items))
    }

    fn next_level(&self, level: Vec<Node>) -> Vec<Node> {
        let mut next = Vec::with_capacity((level.len() + 1) / 2);
        let mut nodes = level.into_iter();
        while let Some(left) = nodes.next() {
            match nodes.next() {
                Some(right) => next.push(Node::inner(&self.hasher, left, right)),
                None => next.push(Node::promoted(left)),
            }
        }
        next
    }
}

/// Computes a tree with the default SHA-256 hasher.
pub fn compute_tree<I>(leaf_digests: I) -> Result<MerkleTree>
where
    I: IntoIterator<Item = Digest>,
{
    TreeBuilder::new(Sha256Hasher).compute_tree(leaf_digests)
}

/// An immutable, fully built Merkle tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree {
    root: Node,
    leaf_count: usize,
    height: usize,
}

impl MerkleTree {
    pub fn from_leaf_data<H, I, T>(hasher: H, items: I) -> Result<Self>
    where
        H: Hasher,
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        TreeBuilder::new(hasher).from_leaf_data(items)
    }

    pub fn root(&self) -> &Digest {
        self.root.digest()
    }

    pub fn root_node(&self) -> &Node {
        &self.root
    }

    /// Number of levels built above the leaves: `ceil(log2(leaf_count))`,
    /// or 0 for a single leaf.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Digests in level order, from the root level down to the leaf level.
    pub fn levels(&self) -> Vec<Vec<Digest>> {
        let mut levels = Vec::with_capacity(self.height + 1);
        let mut current = vec![&self.root];
        while !current.is_empty() {
            levels.push(current.iter().map(|node| *node.digest()).collect());
            current = current
                .into_iter()
                .flat_map(|node| node.children())
                .collect();
        }
        levels
    }

    /// The leaf digests, in input order.
    pub fn leaves(&self) -> Vec<Digest> {
        self.levels().pop().unwrap_or_default()
    }
}

impl fmt::Display for MerkleTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (depth, level) in self.levels().iter().enumerate() {
            writeln!(f, "level {depth}:")?;
            for (i, digest) in level.iter().enumerate() {
                writeln!(f, "  {i}: {digest}")?;
            }
        }
        Ok(())
    }
}
