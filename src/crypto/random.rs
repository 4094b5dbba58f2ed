use getrandom::fill;

use crate::error::{PwdHashError, Result};

/// Fill buffer with cryptographically secure random bytes
fn secure_random(buf: &mut [u8]) -> Result<()> {
    fill(buf).map_err(PwdHashError::Random)
}

/// Generate a salt of exactly `len` bytes.
///
/// Never reuse a salt across passwords. A common rule of thumb is to make
/// the salt as long as the algorithm's digest.
pub fn generate_salt(len: usize) -> Result<Vec<u8>> {
    let mut salt = vec![0u8; len];
    secure_random(&mut salt)?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn salt_has_requested_length() {
        for len in [0, 1, 16, 20, 32, 64, 257] {
            assert_eq!(generate_salt(len).unwrap().len(), len);
        }
    }

    #[test]
    fn salts_are_unique() {
        let salts: HashSet<Vec<u8>> = (0..1000).map(|_| generate_salt(16).unwrap()).collect();
        assert_eq!(salts.len(), 1000);
    }
}
