//! Scalar field of BN254, the native field of the proving system.
//!
//! The reference checker never needs inversion or square roots, so an
//! element is stored as its canonical integer representative and the ring
//! operations reduce modulo the prime. Every range bound the state circuit
//! declares is far below the modulus, which lets range checks compare the
//! representative directly.

use crate::{ToLittleEndian, Word, U256, U512};
use lazy_static::lazy_static;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

lazy_static! {
    /// Modulus of the BN254 scalar field.
    pub static ref MODULUS: Word = Word::from_str_radix(
        "30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001",
        16,
    )
    .expect("static modulus");
}

/// An element of the BN254 scalar field, held in canonical form `[0, p)`.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fr(Word);

/// Widen a word to 512 bits for overflow-free multiplication.
fn widen(word: Word) -> U512 {
    U512([word.0[0], word.0[1], word.0[2], word.0[3], 0, 0, 0, 0])
}

impl Fr {
    /// The additive identity.
    pub fn zero() -> Self {
        Fr(Word::zero())
    }

    /// The multiplicative identity.
    pub fn one() -> Self {
        Fr(Word::one())
    }

    /// Build an element from a word, reducing modulo the field size.
    pub fn from_word(word: Word) -> Self {
        Fr(word % *MODULUS)
    }

    /// The canonical integer representative.
    pub fn to_word(&self) -> Word {
        self.0
    }

    /// Whether this is the zero element.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Gets the lower 32 bits of this field element when expressed
    /// canonically.
    pub fn get_lower_32(&self) -> u32 {
        self.0.low_u32()
    }

    /// Gets the lower 128 bits of this field element when expressed
    /// canonically.
    pub fn get_lower_128(&self) -> u128 {
        self.0.low_u128()
    }
}

impl From<u64> for Fr {
    fn from(value: u64) -> Self {
        // Always canonical, u64 is far below the modulus.
        Fr(Word::from(value))
    }
}

impl From<Fr> for Word {
    fn from(value: Fr) -> Self {
        value.0
    }
}

impl ToLittleEndian for Fr {
    fn to_le_bytes(&self) -> [u8; 32] {
        self.0.to_le_bytes()
    }
}

impl Add for Fr {
    type Output = Fr;

    fn add(self, rhs: Fr) -> Fr {
        // Both operands are canonical so the integer sum stays below 2*p,
        // which fits a Word.
        Fr((self.0 + rhs.0) % *MODULUS)
    }
}

impl AddAssign for Fr {
    fn add_assign(&mut self, rhs: Fr) {
        *self = *self + rhs;
    }
}

impl Sub for Fr {
    type Output = Fr;

    fn sub(self, rhs: Fr) -> Fr {
        Fr((self.0 + (*MODULUS - rhs.0)) % *MODULUS)
    }
}

impl Mul for Fr {
    type Output = Fr;

    fn mul(self, rhs: Fr) -> Fr {
        let wide = self.0.full_mul(rhs.0) % widen(*MODULUS);
        // The remainder is below the 256-bit modulus, the upper limbs are 0.
        Fr(U256([wide.0[0], wide.0[1], wide.0[2], wide.0[3]]))
    }
}

impl fmt::Debug for Fr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::Display for Fr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl Serialize for Fr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:#x}", self.0))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn add_wraps_at_modulus() {
        let max = Fr::from_word(*MODULUS - Word::one());
        assert_eq!(max + Fr::one(), Fr::zero());
        assert_eq!(Fr::zero() - Fr::one(), max);
    }

    #[test]
    fn from_word_reduces() {
        assert_eq!(Fr::from_word(*MODULUS), Fr::zero());
        assert_eq!(Fr::from_word(*MODULUS + Word::from(7u64)), Fr::from(7));
    }

    #[test]
    fn mul_matches_wide_model() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        for _ in 0..64 {
            let a: u128 = rng.gen();
            let b: u128 = rng.gen();
            let expect = Word::from(a).full_mul(Word::from(b)) % widen(*MODULUS);
            let got = Fr::from_word(Word::from(a)) * Fr::from_word(Word::from(b));
            assert_eq!(widen(got.to_word()), expect);
        }
    }

    #[test]
    fn representative_order_is_integer_order() {
        assert!(Fr::from(1023) < Fr::from(1024));
        assert!(Fr::zero() < Fr::one());
    }

    #[test]
    fn lower_bits() {
        let x = Fr::from(0xdead_beef_0123_4567);
        assert_eq!(x.get_lower_32(), 0x0123_4567);
        assert_eq!(x.get_lower_128(), 0xdead_beef_0123_4567u128);
    }
}
