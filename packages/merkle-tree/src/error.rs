use hex::FromHexError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum MerkleError {
    #[error("Cannot compute a Merkle tree over zero leaves")]
    EmptyInput,

    #[error("Leaf index {index} is out of range for a tree with {leaf_count} leaves")]
    IndexOutOfRange { index: i64, leaf_count: usize },

    #[error("Malformed Merkle path: {0}")]
    MalformedPath(String),

    #[error("Invalid digest: {0}")]
    InvalidDigest(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl MerkleError {
    pub fn malformed_path(msg: impl Into<String>) -> Self {
        MerkleError::MalformedPath(msg.into())
    }

    pub fn invalid_digest(msg: impl Into<String>) -> Self {
        MerkleError::InvalidDigest(msg.into())
    }
}

impl From<FromHexError> for MerkleError {
    fn from(e: FromHexError) -> Self {
        Self::InvalidDigest(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MerkleError>;
