use subtle::ConstantTimeEq;

/// Compares two byte strings without short-circuiting on the first
/// differing byte.
///
/// On a length mismatch `expected` is still compared against itself so the
/// work done depends only on `expected.len()`.
pub fn constant_time_eq(expected: &[u8], actual: &[u8]) -> bool {
    let same_len = expected.len().ct_eq(&actual.len());
    let other = if bool::from(same_len) { actual } else { expected };
    let same_bytes = expected.ct_eq(other);
    (same_len & same_bytes).into()
}
