//! Ethereum types used by the state circuit reference checker.

#![cfg_attr(docsrs, feature(doc_cfg))]
// Catch documentation errors caused by code changes.
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]
#![allow(clippy::upper_case_acronyms)] // Too pedantic

pub use ethers_core::abi::ethereum_types::U512;
pub use ethers_core::types::{Address, H160, H256, U256};

pub mod fr;

pub use fr::Fr;

/// Type alias for a 256-bit unsigned word.
pub type Word = U256;

/// Trait used to convert a scalar value to a 32 byte array in big endian.
pub trait ToBigEndian {
    /// Convert the value to a 32 byte array in big endian.
    fn to_be_bytes(&self) -> [u8; 32];
}

/// Trait used to convert a scalar value to a 32 byte array in little endian.
pub trait ToLittleEndian {
    /// Convert the value to a 32 byte array in little endian.
    fn to_le_bytes(&self) -> [u8; 32];
}

/// Trait used to convert a type to a [`Word`].
pub trait ToWord {
    /// Convert the type to a [`Word`].
    fn to_word(&self) -> Word;
}

impl ToBigEndian for U256 {
    /// Encode the value as byte array in big endian.
    fn to_be_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        self.to_big_endian(&mut bytes);
        bytes
    }
}

impl ToLittleEndian for U256 {
    /// Encode the value as byte array in little endian.
    fn to_le_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        self.to_little_endian(&mut bytes);
        bytes
    }
}

impl ToWord for Address {
    fn to_word(&self) -> Word {
        Word::from(self.as_bytes())
    }
}

impl ToWord for u64 {
    fn to_word(&self) -> Word {
        Word::from(*self)
    }
}

impl ToWord for bool {
    fn to_word(&self) -> Word {
        Word::from(*self as u64)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn address_to_word_is_big_endian() {
        let addr = Address::from_str("0x000000000000000000000000000000000000cafe").unwrap();
        assert_eq!(addr.to_word(), Word::from(0xcafeu64));
    }

    #[test]
    fn endianness_round_trip() {
        let word = Word::from(0x0102030405060708u64);
        assert_eq!(Word::from_big_endian(&word.to_be_bytes()), word);
        assert_eq!(Word::from_little_endian(&word.to_le_bytes()), word);
    }
}
