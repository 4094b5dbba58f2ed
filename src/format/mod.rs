//! Token encoding for hashed passwords.
//!
//! A token holds everything needed to verify a password later:
//! ```text
//! <algorithm>$<cost>$<base64(salt)>$<base64(digest)>
//! ```
//! Salt and digest use standard base64 with `=` padding. The cost is an
//! unsigned decimal. Exactly four fields, in this order.

use std::fmt;
use std::str::FromStr;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use zeroize::Zeroizing;

use crate::crypto::{Algorithm, HashParams, kdf};
use crate::error::{FormatError, PwdHashError, Result};

/// Field separator.
pub const DELIMITER: char = '$';
/// Number of fields in every token.
pub const FIELD_COUNT: usize = 4;
/// Radix of the cost field.
pub const COST_RADIX: u32 = 10;

pub const ALGORITHM_INDEX: usize = 0;
pub const COST_INDEX: usize = 1;
pub const SALT_INDEX: usize = 2;
pub const DIGEST_INDEX: usize = 3;

/// A parsed and validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedPassword {
    algorithm: Algorithm,
    cost: u32,
    salt: Vec<u8>,
    digest: Zeroizing<Vec<u8>>,
}

impl HashedPassword {
    pub fn new(
        algorithm: Algorithm,
        cost: u32,
        salt: Vec<u8>,
        digest: Zeroizing<Vec<u8>>,
    ) -> Self {
        Self {
            algorithm,
            cost,
            salt,
            digest,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Parameters that re-derive this digest. The key length is the length
    /// of the stored digest.
    pub fn params(&self) -> Result<HashParams> {
        HashParams::new(self.algorithm, self.cost, self.digest.len())
    }
}

impl fmt::Display for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self.algorithm, self.cost, &self.salt, &self.digest))
    }
}

impl FromStr for HashedPassword {
    type Err = PwdHashError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

/// Joins the four fields into a token.
pub fn encode(algorithm: Algorithm, cost: u32, salt: &[u8], digest: &[u8]) -> String {
    format!(
        "{algorithm}{DELIMITER}{cost}{DELIMITER}{salt}{DELIMITER}{digest}",
        algorithm = algorithm.name(),
        salt = STANDARD.encode(salt),
        digest = STANDARD.encode(digest),
    )
}

/// Serializes a parsed token back to text.
pub fn serialize(hashed: &HashedPassword) -> String {
    hashed.to_string()
}

/// Parses and fully validates a token.
///
/// # Errors
///
/// Checks run in field order and the first failure is returned:
/// - `InvalidHashFormat(FieldCount)` unless there are exactly four fields
/// - `InvalidHashFunction` for an unregistered algorithm name
/// - `InvalidHashFormat(CostEncoding)` or `InvalidCost` for the cost field
/// - `InvalidHashFormat(SaltEncoding)` / `InvalidHashFormat(DigestEncoding)`
///   for bad base64
pub fn parse(token: &str) -> Result<HashedPassword> {
    let fields = split_fields(token)?;

    let algorithm: Algorithm = fields[ALGORITHM_INDEX].parse()?;
    let cost = parse_cost(fields[COST_INDEX])?;

    let salt = STANDARD
        .decode(fields[SALT_INDEX])
        .map_err(|_| FormatError::SaltEncoding)?;
    let digest = STANDARD
        .decode(fields[DIGEST_INDEX])
        .map(Zeroizing::new)
        .map_err(|_| FormatError::DigestEncoding)?;

    Ok(HashedPassword::new(algorithm, cost, salt, digest))
}

/// Reads only the cost field. Salt and digest are not decoded.
pub fn parse_cost_field(token: &str) -> Result<u32> {
    let fields = split_fields(token)?;
    parse_cost(fields[COST_INDEX])
}

fn split_fields(token: &str) -> Result<[&str; FIELD_COUNT]> {
    let mut parts = token.split(DELIMITER);
    let mut fields = [""; FIELD_COUNT];

    for field in fields.iter_mut() {
        *field = parts.next().ok_or(FormatError::FieldCount)?;
    }
    if parts.next().is_some() {
        return Err(FormatError::FieldCount.into());
    }

    Ok(fields)
}

/// Digits only, no sign, no leading zeros, must fit in `u32`. Anything else
/// would not survive re-encoding unchanged.
fn parse_cost(field: &str) -> Result<u32> {
    let canonical = !field.is_empty()
        && field.bytes().all(|b| b.is_ascii_digit())
        && (field == "0" || !field.starts_with('0'));
    if !canonical {
        return Err(FormatError::CostEncoding.into());
    }

    let cost = u32::from_str_radix(field, COST_RADIX).map_err(|_| FormatError::CostEncoding)?;
    kdf::check_cost(cost)?;
    Ok(cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::MAX_COST;

    const TOKEN: &str = "sha256$1000$AAECAw==$3q2+7w==";

    fn format_error(result: Result<HashedPassword>) -> FormatError {
        match result {
            Err(PwdHashError::InvalidHashFormat(reason)) => reason,
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn parse_valid_token() {
        let parsed = parse(TOKEN).unwrap();

        assert_eq!(parsed.algorithm(), Algorithm::Sha256);
        assert_eq!(parsed.cost(), 1000);
        assert_eq!(parsed.salt(), [0u8, 1, 2, 3]);
        assert_eq!(parsed.digest(), [0xdeu8, 0xad, 0xbe, 0xef]);
        assert_eq!(serialize(&parsed), TOKEN);
    }

    #[test]
    fn encode_layout() {
        let token = encode(Algorithm::Md5, 7, b"salt", b"digest");
        let fields: Vec<&str> = token.split(DELIMITER).collect();

        assert_eq!(fields, ["md5", "7", "c2FsdA==", "ZGlnZXN0"]);
    }

    #[test]
    fn trailing_zero_bytes_are_kept() {
        let salt = vec![1u8, 0, 0];
        let digest = Zeroizing::new(vec![9u8, 8, 0, 0]);
        let token = encode(Algorithm::Sha1, 1, &salt, &digest);

        let parsed = parse(&token).unwrap();
        assert_eq!(parsed.salt(), salt.as_slice());
        assert_eq!(parsed.digest(), digest.as_slice());
    }

    #[test]
    fn wrong_field_count() {
        for token in [
            "",
            "sha256",
            "sha256$1000$AAECAw==",
            "sha256$1000$AAECAw==$3q2+7w==$",
            "sha256$1000$AAECAw==$3q2+7w==$extra",
        ] {
            assert_eq!(format_error(parse(token)), FormatError::FieldCount, "{token}");
        }
    }

    #[test]
    fn unknown_algorithm() {
        match parse("sha384$1000$AAECAw==$3q2+7w==") {
            Err(PwdHashError::InvalidHashFunction(name)) => assert_eq!(name, "sha384"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn bad_cost_encoding() {
        for cost in ["", "abc", "-1", "+5", " 5", "5 ", "1e3", "0010", "4294967296"] {
            let token = format!("sha256${cost}$AAECAw==$3q2+7w==");
            assert_eq!(format_error(parse(&token)), FormatError::CostEncoding, "{cost}");
        }
    }

    #[test]
    fn cost_out_of_range() {
        let zero = "sha256$0$AAECAw==$3q2+7w==";
        assert!(matches!(parse(zero), Err(PwdHashError::InvalidCost(0))));

        let over = format!("sha256${}$AAECAw==$3q2+7w==", u64::from(MAX_COST) + 1);
        assert!(matches!(parse(&over), Err(PwdHashError::InvalidCost(_))));

        let max = format!("sha256${MAX_COST}$AAECAw==$3q2+7w==");
        assert_eq!(parse(&max).unwrap().cost(), MAX_COST);
    }

    #[test]
    fn bad_salt_encoding() {
        for salt in ["AAECAw=", "AAEC*w==", "AAECAw==="] {
            let token = format!("sha256$1000${salt}$3q2+7w==");
            assert_eq!(format_error(parse(&token)), FormatError::SaltEncoding, "{salt}");
        }
    }

    #[test]
    fn bad_digest_encoding() {
        for digest in ["3q2+7w=", "3q2+7w", "3q2-7w==", "3q2+7w==\0"] {
            let token = format!("sha256$1000$AAECAw==${digest}");
            assert_eq!(format_error(parse(&token)), FormatError::DigestEncoding, "{digest}");
        }
    }

    #[test]
    fn salt_is_checked_before_digest() {
        let token = "sha256$1000$!!$!!";
        assert_eq!(format_error(parse(token)), FormatError::SaltEncoding);
    }

    #[test]
    fn cost_field_ignores_salt_and_digest() {
        assert_eq!(parse_cost_field("sha256$1000$!!$!!").unwrap(), 1000);
        assert_eq!(parse_cost_field("nope$42$$").unwrap(), 42);
        assert!(matches!(
            parse_cost_field("sha256$x$AA==$AA=="),
            Err(PwdHashError::InvalidHashFormat(FormatError::CostEncoding))
        ));
        assert!(matches!(
            parse_cost_field("sha256$1000"),
            Err(PwdHashError::InvalidHashFormat(FormatError::FieldCount))
        ));
    }

    #[test]
    fn from_str_matches_parse() {
        let parsed: HashedPassword = TOKEN.parse().unwrap();
        assert_eq!(parsed, parse(TOKEN).unwrap());
        assert_eq!(parsed.params().unwrap().key_len(), 4);
    }

    #[test]
    fn empty_digest_has_no_params() {
        let parsed = parse("sha256$1000$AAECAw==$").unwrap();
        assert!(matches!(
            parsed.params(),
            Err(PwdHashError::InvalidKeyLength(0))
        ));
    }
}
