//! Cryptographic primitives for password hashing.
//!
//! Provides the hash function registry, PBKDF2 key derivation, salt
//! generation and constant-time comparison.

pub mod algorithm;
pub mod kdf;
pub mod random;
pub mod verify;

pub use algorithm::Algorithm;
pub use kdf::{HashParams, derive_key};
pub use random::generate_salt;
pub use verify::constant_time_eq;

/// Minimum allowable cost (PBKDF2 iteration count).
pub const MIN_COST: u32 = 1;
/// Maximum allowable cost, 2^31 - 1.
pub const MAX_COST: u32 = i32::MAX as u32;
/// Cost used by [`HashParams::default`].
pub const DEFAULT_COST: u32 = 200_000;
