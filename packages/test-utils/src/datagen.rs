use merkle_tree::{Digest, Hasher, Sha256Hasher};
use rand::{Rng, RngCore};

/// Raw records used across the tests and the documentation.
pub const SAMPLE_RECORDS: [&str; 3] = ["merkle", "tree", "computation"];

/// Generate random bytes of specified length using the provided RNG
pub fn gen_random_bytes<R: RngCore>(rng: &mut R, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.gen()).collect()
}

/// Generate `count` leaf digests from random records of 1 to 64 bytes
pub fn gen_random_leaves<R: RngCore>(rng: &mut R, count: usize) -> Vec<Digest> {
    (0..count)
        .map(|_| {
            let len = rng.gen_range(1..=64);
            Sha256Hasher.hash_leaf(&gen_random_bytes(rng, len))
        })
        .collect()
}

/// Generate a random digest that is not a hash of anything in particular
pub fn gen_random_digest<R: RngCore>(rng: &mut R) -> Digest {
    Digest::new(rng.gen())
}

/// Leaf digests of [`SAMPLE_RECORDS`], in order
pub fn sample_leaves() -> Vec<Digest> {
    Sha256Hasher.hash_leaves(SAMPLE_RECORDS)
}

/// Deterministic leaf digests `leaf-0`, `leaf-1`, ...
pub fn numbered_leaves(count: usize) -> Vec<Digest> {
    (0..count)
        .map(|i| Sha256Hasher.hash_leaf(format!("leaf-{i}").as_bytes()))
        .collect()
}

/// Returns `digest` with a single bit flipped
pub fn flip_bit(digest: &Digest, bit: usize) -> Digest {
    let mut bytes = *digest.as_bytes();
    bytes[bit / 8 % bytes.len()] ^= 1 << (bit % 8);
    Digest::new(bytes)
}
