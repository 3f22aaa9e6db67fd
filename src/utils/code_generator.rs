//! Short code generation.
//!
//! Codes are 3 characters drawn uniformly from the 62-symbol alphabet of
//! ASCII digits and letters, giving 62^3 = 238,328 possible codes.
//! Generation is pure; uniqueness is enforced by the bookmark service
//! together with the `bookmarks_short_url_key` unique index.

use rand::Rng;

/// Alphabet the codes are drawn from: digits, then upper and lower ASCII letters.
const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Length of a short code in characters.
pub const CODE_LENGTH: usize = 3;

/// Generates a random short code.
///
/// Each character is an independent uniform sample from [`ALPHABET`].
/// The caller is responsible for collision checking and bounded retry.
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
