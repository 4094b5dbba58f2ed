//! Password hashing with PBKDF2-HMAC and self-describing tokens.
//!
//! A password is stretched with PBKDF2 keyed by one of md5, sha1, sha256 or
//! sha512, and the result is stored together with everything needed to
//! verify it:
//!
//! ```text
//! <algorithm>$<cost>$<base64(salt)>$<base64(digest)>
//! ```
//!
//! PBKDF2 is appropriate for password storage when used with a high cost,
//! a strong hash function and a unique salt per password. md5 and sha1 are
//! supported for compatibility only.
//!
//! ```no_run
//! let salt = pwdhash::generate_salt(32)?;
//! let token = pwdhash::generate_from_password(b"hunter2", &salt, 200_000, 32, "sha256")?;
//! pwdhash::compare_hash_and_password(&token, b"hunter2")?;
//! # Ok::<(), pwdhash::PwdHashError>(())
//! ```

pub mod crypto;
mod error;
pub mod format;

pub use crate::crypto::{Algorithm, DEFAULT_COST, HashParams, MAX_COST, MIN_COST, generate_salt};
pub use crate::error::{FormatError, PwdHashError, Result};
pub use crate::format::HashedPassword;

use crate::crypto::{constant_time_eq, derive_key};
use zeroize::Zeroizing;

/// Hashes `password` with the given salt, cost, key length and hash
/// function name, returning the encoded token.
///
/// # Errors
///
/// `InvalidHashFunction` if `algorithm` is not registered, `InvalidCost` if
/// `cost` is outside `[MIN_COST, MAX_COST]` and `InvalidKeyLength` if
/// `key_len` is zero. All are reported before any derivation work.
pub fn generate_from_password(
    password: &[u8],
    salt: &[u8],
    cost: u32,
    key_len: usize,
    algorithm: &str,
) -> Result<String> {
    let algorithm: Algorithm = algorithm.parse()?;
    let params = HashParams::new(algorithm, cost, key_len)?;
    hash_with_params(password, salt, &params)
}

/// Same as [`generate_from_password`] with validated parameters.
pub fn hash_with_params(password: &[u8], salt: &[u8], params: &HashParams) -> Result<String> {
    let digest = derive_key(password, salt, params)?;
    Ok(format::encode(
        params.algorithm(),
        params.cost(),
        salt,
        &digest,
    ))
}

/// Checks a plaintext password against a stored token.
///
/// The digest is re-derived from the token's own parameters, re-encoded and
/// compared against the stored token in constant time.
///
/// # Errors
///
/// Any parse failure of `token` is returned unchanged. A well-formed token
/// that does not match yields `MismatchedHashAndPassword`.
pub fn compare_hash_and_password(token: &str, password: &[u8]) -> Result<()> {
    let stored = format::parse(token)?;
    let params = stored.params()?;

    let digest = derive_key(password, stored.salt(), &params)?;
    let guess = Zeroizing::new(format::encode(
        params.algorithm(),
        params.cost(),
        stored.salt(),
        &digest,
    ));

    if constant_time_eq(token.as_bytes(), guess.as_bytes()) {
        Ok(())
    } else {
        Err(PwdHashError::MismatchedHashAndPassword)
    }
}

/// Returns the cost a token was created with.
///
/// Only the cost field is validated, so this works for deciding which
/// stored passwords need a higher work factor.
pub fn cost(token: &str) -> Result<u32> {
    format::parse_cost_field(token)
}

/// Whether a stored token was made with weaker or different parameters than
/// `target`.
///
/// True when the stored cost is lower, the algorithm differs or the digest
/// length differs. Call after a successful verification to decide whether
/// to re-hash the password.
pub fn needs_rehash(token: &str, target: &HashParams) -> Result<bool> {
    let stored = format::parse(token)?;
    Ok(stored.cost() < target.cost()
        || stored.algorithm() != target.algorithm()
        || stored.digest().len() != target.key_len())
}
