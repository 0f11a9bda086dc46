//! Domain-separated SHA-256 hashing, in the style of RFC 6962:
//! leaves are hashed as `H(0x00 || data)`, inner nodes as `H(0x01 || left || right)`.

use std::fmt;
use std::str::FromStr;

use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest as _, Sha256};

use crate::error::{MerkleError, Result};

/// Size in bytes of every digest handled by the tree.
pub const DIGEST_SIZE: usize = 32;

const LEAF_PREFIX: u8 = 0;
const INNER_PREFIX: u8 = 1;

/// A fixed-length hash output.
///
/// The external representation is always lowercase hex, both for `Display`
/// and for serde.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    pub const fn new(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; DIGEST_SIZE] = bytes.try_into().map_err(|_| {
            MerkleError::invalid_digest(format!(
                "expected {DIGEST_SIZE} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(array))
    }

    /// Parses a digest from its lowercase hex form.
    pub fn from_hex(s: &str) -> Result<Self> {
        if s.bytes().any(|b| b.is_ascii_uppercase()) {
            return Err(MerkleError::invalid_digest(format!(
                "hex must be lowercase, got {s}"
            )));
        }
        let bytes = hex::decode(s)?;
        Self::from_slice(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

struct DigestVisitor;

impl Visitor<'_> for DigestVisitor {
    type Value = Digest;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a {}-character lowercase hex string", DIGEST_SIZE * 2)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Digest, E> {
        Digest::from_hex(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_str(DigestVisitor)
    }
}

impl JsonSchema for Digest {
    fn schema_name() -> String {
        "Digest".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        String::json_schema(gen)
    }
}

/// Hash strategy used to build and verify trees.
///
/// Implementations must be pure: the same input always yields the same
/// digest, and `combine(a, b)` must differ from `combine(b, a)` as well as
/// from any `hash_leaf` output.
pub trait Hasher {
    /// Hashes raw leaf data into a leaf digest.
    fn hash_leaf(&self, data: &[u8]) -> Digest;

    /// Hashes an ordered pair of child digests into their parent digest.
    fn combine(&self, left: &Digest, right: &Digest) -> Digest;

    /// Hashes every item with [`Hasher::hash_leaf`], keeping the input order.
    fn hash_leaves<I, T>(&self, items: I) -> Vec<Digest>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        items
            .into_iter()
            .map(|item| self.hash_leaf(item.as_ref()))
            .collect()
    }
}

/// SHA-256 with a one byte domain tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    /// sha256(0x00 || leaf)
    fn hash_leaf(&self, data: &[u8]) -> Digest {
        let mut hasher = Sha256::new();
        hasher.update([LEAF_PREFIX]);
        hasher.update(data);
        Digest(hasher.finalize().into())
    }

    /// sha256(0x01 || left || right)
    fn combine(&self, left: &Digest, right: &Digest) -> Digest {
        let mut hasher = Sha256::new();
        hasher.update([INNER_PREFIX]);
        hasher.update(left.0);
        hasher.update(right.0);
        Digest(hasher.finalize().into())
    }
}
