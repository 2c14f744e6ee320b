//! Utility functions shared by the reference gadgets.

use eth_types::Fr;

/// Combine limbs into a single field element as
/// `limbs[0] + limbs[1]*base + limbs[2]*base^2 + ...`.
///
/// With `base = 2^16` this recomposes a multiple-precision integer from its
/// limb decomposition; with a random base it is the random linear
/// combination used to fold wide values into one field element.
pub fn linear_combine(limbs: &[Fr], base: Fr) -> Fr {
    limbs
        .iter()
        .rev()
        .fold(Fr::zero(), |acc, limb| acc * base + *limb)
}

/// Random linear combination of little-endian bytes under a challenge.
pub fn rlc(le_bytes: &[u8], randomness: Fr) -> Fr {
    le_bytes
        .iter()
        .rev()
        .fold(Fr::zero(), |acc, byte| acc * randomness + Fr::from(*byte as u64))
}
