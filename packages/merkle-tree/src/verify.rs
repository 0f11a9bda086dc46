use log::debug;

use crate::config::Config;
use crate::error::Result;
use crate::hash::{Digest, Hasher, Sha256Hasher};
use crate::path::MerklePath;

/// Checks [`MerklePath`]s against an expected root.
#[derive(Clone, Debug, Default)]
pub struct PathVerifier<H = Sha256Hasher> {
    hasher: H,
    config: Config,
}

impl<H: Hasher> PathVerifier<H> {
    pub fn new(hasher: H) -> Self {
        Self {
            hasher,
            config: Config::default(),
        }
    }

    pub fn with_config(hasher: H, config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { hasher, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Verifies that `path` proves `leaf_digest` under `expected_root`.
    ///
    /// Returns `Ok(false)` when the replayed root differs from
    /// `expected_root`. Only a structurally invalid path is an error.
    pub fn verify_path(
        &self,
        leaf_digest: &Digest,
        path: &MerklePath,
        expected_root: &Digest,
    ) -> Result<bool> {
        path.validate_basic(&self.config)?;
        let computed = path.replay(&self.hasher, leaf_digest);
        if computed != *expected_root {
            debug!(
                "merkle path for leaf {} does not match the root: wanted {expected_root} got {computed}",
                path.leaf_index
            );
            return Ok(false);
        }
        Ok(true)
    }
}

/// Verifies `path` with the default SHA-256 hasher and limits.
pub fn verify_path(
    leaf_digest: &Digest,
    path: &MerklePath,
    expected_root: &Digest,
) -> Result<bool> {
    PathVerifier::new(Sha256Hasher).verify_path(leaf_digest, path, expected_root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MerkleError;
    use crate::path::Side;
    use crate::tree::compute_tree;

    #[test]
    fn test_verify_scenario() {
        let hasher = Sha256Hasher;
        let leaves = hasher.hash_leaves(["merkle", "tree", "computation"]);
        let (h0, h1, h2) = (leaves[0], leaves[1], leaves[2]);
        let tree = compute_tree(vec![h0, h1, h2]).unwrap();

        let root = hasher.combine(&hasher.combine(&h0, &h1), &h2);
        assert_eq!(tree.root(), &root);

        let path = tree.path_by_index(2).unwrap();
        assert_eq!(path.nodes, vec![hasher.combine(&h0, &h1)]);
        assert_eq!(path.sides, vec![Side::Left]);
        assert_eq!(verify_path(&h2, &path, &root), Ok(true));

        // Wrong leaf and wrong root are mismatches, not errors.
        assert_eq!(verify_path(&h1, &path, &root), Ok(false));
        assert_eq!(verify_path(&h2, &path, &h0), Ok(false));
    }

    #[test]
    fn test_verify_flipped_side() {
        let tree = compute_tree(Sha256Hasher.hash_leaves(["a", "b", "c", "d"])).unwrap();
        let leaf = tree.leaves()[2];
        let mut path = tree.path_by_index(2).unwrap();
        assert_eq!(verify_path(&leaf, &path, tree.root()), Ok(true));

        path.sides[1] = match path.sides[1] {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        };
        assert_eq!(verify_path(&leaf, &path, tree.root()), Ok(false));
    }

    #[test]
    fn test_verify_malformed_path() {
        let tree = compute_tree(Sha256Hasher.hash_leaves(["a", "b", "c", "d", "e"])).unwrap();
        let leaf = tree.leaves()[0];
        let path = tree.path_by_index(0).unwrap();

        let mut truncated = path.clone();
        truncated.nodes.pop();
        truncated.sides.pop();
        assert_eq!(
            verify_path(&leaf, &truncated, tree.root()),
            Err(MerkleError::malformed_path(
                "Expected 3 nodes for leaf 0 of 5, got 2"
            ))
        );

        let mut extended = path.clone();
        extended.nodes.push(leaf);
        extended.sides.push(Side::Right);
        assert_eq!(
            verify_path(&leaf, &extended, tree.root()),
            Err(MerkleError::malformed_path(
                "Expected 3 nodes for leaf 0 of 5, got 4"
            ))
        );

        let mut out_of_range = path.clone();
        out_of_range.leaf_index = 5;
        assert!(matches!(
            verify_path(&leaf, &out_of_range, tree.root()),
            Err(MerkleError::MalformedPath(_))
        ));

        let strict = PathVerifier::with_config(Sha256Hasher, Config { max_path_len: 2 }).unwrap();
        assert_eq!(
            strict.verify_path(&leaf, &path, tree.root()),
            Err(MerkleError::malformed_path(
                "Expected no more than 2 nodes, got 3"
            ))
        );
    }

    #[test]
    fn test_with_config_validates() {
        assert!(matches!(
            PathVerifier::with_config(Sha256Hasher, Config { max_path_len: 0 }),
            Err(MerkleError::InvalidConfig(_))
        ));
        let verifier = PathVerifier::<Sha256Hasher>::default();
        assert_eq!(verifier.config(), &Config::default());
    }
}
