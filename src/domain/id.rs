//! Identifier generation

use rand::Rng;

const ID_LEN: usize = 9;
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a short base-36 identifier for a new entity.
///
/// Uniqueness is probabilistic. Fine for one author's blog, not for
/// adversarial or high-volume use.
pub fn generate_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
