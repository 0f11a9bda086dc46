mod config;
mod error;
mod hash;
mod node;
mod path;
mod tree;
mod verify;

pub use self::config::{Config, DEFAULT_MAX_PATH_LEN};
pub use self::error::{MerkleError, Result};
pub use self::hash::{Digest, Hasher, Sha256Hasher, DIGEST_SIZE};
pub use self::node::Node;
pub use self::path::{expected_path_len, MerklePath, Side};
pub use self::tree::{compute_tree, MerkleTree, TreeBuilder};
pub use self::verify::{verify_path, PathVerifier};
