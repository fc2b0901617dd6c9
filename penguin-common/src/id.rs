//! Stable short project identifiers
//!
//! A project id is a 5-character code derived from the project's date,
//! company and location. The same folder always yields the same id, so a
//! rescan can be correlated with records already in the side-car store.

use sha2::{Digest, Sha256};

use crate::instant::Instant;

/// Symbols used in ids: digits 1-9 and uppercase letters without I, O, Q
pub const ID_ALPHABET: &[u8; 32] = b"123456789ABCDEFGHJKLMNPRSTUVWXYZ";

/// Number of symbols in an id
pub const ID_LENGTH: usize = 5;

/// Composite key for a project: `YYYY-MM-DD_company_location`
pub fn project_key(date: &Instant, company: &str, location: &str) -> String {
    format!("{}_{}_{}", date.date_string(), company, location)
}

/// Derive the 5-character id for a composite key.
///
/// **Algorithm:**
/// 1. SHA-256 over the key's UTF-8 bytes
/// 2. Take the first 25 bits of the digest, 5 bits per symbol
/// 3. Map each 5-bit group onto [`ID_ALPHABET`]
///
/// Total and deterministic. Distinct keys collide with probability about 1/32^5;
/// no collision resolution is attempted.
pub fn derive_id(key: &str) -> String {
    let digest = Sha256::digest(key.as_bytes());
    let bits = digest
        .iter()
        .take(8)
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte));

    (0..ID_LENGTH)
        .map(|i| {
            let shift = 64 - 5 * (i + 1);
            let index = ((bits >> shift) & 0x1f) as usize;
            char::from(ID_ALPHABET[index])
        })
        .collect()
}
