//! Registry of the hash functions PBKDF2-HMAC can be keyed with.

use std::fmt;
use std::str::FromStr;

use md5::Md5;
use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::error::PwdHashError;

/// Fills `out` with PBKDF2-HMAC output for `(password, salt, rounds)`.
pub(crate) type DeriveFn = fn(&[u8], &[u8], u32, &mut [u8]);

/// Supported underlying hash functions.
///
/// md5 and sha1 are considered broken and are only kept for compatibility
/// with existing tokens. Prefer sha256 or sha512.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

struct Entry {
    algorithm: Algorithm,
    name: &'static str,
    digest_size: usize,
    derive: DeriveFn,
}

// Single source for accepted names and their PRFs. Indexed by `Algorithm as usize`.
static REGISTRY: [Entry; 4] = [
    Entry {
        algorithm: Algorithm::Md5,
        name: "md5",
        digest_size: 16,
        derive: pbkdf2_hmac::<Md5>,
    },
    Entry {
        algorithm: Algorithm::Sha1,
        name: "sha1",
        digest_size: 20,
        derive: pbkdf2_hmac::<Sha1>,
    },
    Entry {
        algorithm: Algorithm::Sha256,
        name: "sha256",
        digest_size: 32,
        derive: pbkdf2_hmac::<Sha256>,
    },
    Entry {
        algorithm: Algorithm::Sha512,
        name: "sha512",
        digest_size: 64,
        derive: pbkdf2_hmac::<Sha512>,
    },
];

impl Algorithm {
    /// All registered algorithms, in registry order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Md5,
        Algorithm::Sha1,
        Algorithm::Sha256,
        Algorithm::Sha512,
    ];

    fn entry(self) -> &'static Entry {
        &REGISTRY[self as usize]
    }

    /// Looks up an algorithm by its exact, case-sensitive token name.
    pub fn from_name(name: &str) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.algorithm)
    }

    /// Name used in the token's algorithm field.
    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// Natural output size of the hash in bytes.
    pub fn digest_size(self) -> usize {
        self.entry().digest_size
    }

    pub(crate) fn derive_fn(self) -> DeriveFn {
        self.entry().derive
    }
}

impl FromStr for Algorithm {
    type Err = PwdHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| PwdHashError::InvalidHashFunction(s.to_string()))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
