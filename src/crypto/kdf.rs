use zeroize::Zeroizing;

use super::{Algorithm, DEFAULT_COST, MAX_COST, MIN_COST};
use crate::error::{PwdHashError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    algorithm: Algorithm,
    cost: u32,
    key_len: usize,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Sha256,
            // default number of iterations
            cost: DEFAULT_COST,
            key_len: Algorithm::Sha256.digest_size(),
        }
    }
}

impl HashParams {
    pub fn new(algorithm: Algorithm, cost: u32, key_len: usize) -> Result<Self> {
        let params = Self {
            algorithm,
            cost,
            key_len,
        };
        params.validate()?;
        Ok(params)
    }

    /// Default cost with a key as long as the algorithm's native digest.
    pub fn for_algorithm(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            cost: DEFAULT_COST,
            key_len: algorithm.digest_size(),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn key_len(&self) -> usize {
        self.key_len
    }

    pub fn validate(&self) -> Result<()> {
        check_cost(self.cost)?;
        check_key_len(self.key_len)
    }
}

pub(crate) fn check_cost(cost: u32) -> Result<()> {
    if !(MIN_COST..=MAX_COST).contains(&cost) {
        return Err(PwdHashError::InvalidCost(cost));
    }
    Ok(())
}

pub(crate) fn check_key_len(key_len: usize) -> Result<()> {
    if key_len == 0 {
        return Err(PwdHashError::InvalidKeyLength(key_len));
    }
    Ok(())
}

/// Derives `params.key_len()` bytes with PBKDF2-HMAC over the chosen hash.
pub fn derive_key(
    password: &[u8],
    salt: &[u8],
    params: &HashParams,
) -> Result<Zeroizing<Vec<u8>>> {
    params.validate()?;

    let mut key = Zeroizing::new(vec![0u8; params.key_len]);
    let derive = params.algorithm.derive_fn();
    derive(password, salt, params.cost, key.as_mut_slice());

    Ok(key)
}
