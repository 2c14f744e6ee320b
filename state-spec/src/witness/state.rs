use crate::constant::{N_ADDRESS_LIMBS, N_STORAGE_KEY_BYTES};
use eth_types::Fr;
use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString};

/// Tag used as the first key in the state table rows to select the
/// operation target
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, EnumIter, EnumString)]
pub enum Tag {
    // Start is used both as padding before the rest of the operations and
    // to discard the constraints against the previous row that would
    // otherwise wrap around at the top of the table.
    #[default]
    Start = 1,
    Memory = 2,
    Stack = 3,
    Storage = 4,
    CallContext = 5,
    Account = 6,
    TxRefund = 7,
    TxAccessListAccount = 8,
    TxAccessListAccountStorage = 9,
    AccountDestructed = 10,
    TxLog = 11,
    TxReceipt = 12,
}

impl Tag {
    /// Recover the variant a witness value encodes, if any.
    pub fn from_value(value: Fr) -> Option<Tag> {
        Tag::iter().find(|tag| Fr::from(*tag) == value)
    }
}

impl From<Tag> for Fr {
    fn from(tag: Tag) -> Self {
        Fr::from(tag as u64)
    }
}

/// State table row, fully decomposed.
///
/// Every field is a plain field element so that invalid witnesses can be
/// represented and rejected; nothing here is correct by construction. The
/// five keys sort the table as (tag, id, address, field_tag, storage_key),
/// most significant first, with rw_counter as the tie breaker.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Row {
    /// Counter reflecting the chronological access order during execution;
    /// 0 is reserved for Start padding
    pub rw_counter: Fr,
    /// Whether the access is a write, boolean
    pub is_write: Fr,
    /// Operation target, see [`Tag`]
    pub tag: Fr,
    /// Call id or transaction id
    pub id: Fr,
    /// Account address, memory address, stack pointer or log id
    pub address: Fr,
    /// Attribute selector for CallContext, Account, TxLog and TxReceipt
    pub field_tag: Fr,
    /// Storage slot key, RLC encoded under the per-proof randomness
    pub storage_key: Fr,
    /// `address` in little-endian base-2^16 limbs, each range checked
    #[serde(skip)]
    pub address_limbs: [Fr; N_ADDRESS_LIMBS],
    /// The 256-bit storage key in little-endian bytes; binds `storage_key`
    /// through the RLC and feeds the ordering limbs, since the RLC itself
    /// does not preserve integer order
    #[serde(skip)]
    pub storage_key_bytes: [Fr; N_STORAGE_KEY_BYTES],
    /// Accessed value; a byte for Memory, an RLC encoded word for Storage
    /// and Account, a small integer elsewhere
    pub value: Fr,
    /// Value of the slot at the start of the enclosing transaction/block,
    /// the lookup baseline for the first touch of a key
    pub committed_value: Fr,
    /// Index into the external trie update proof, advanced once per
    /// Storage/Account row
    pub mpt_counter: Fr,
}

impl Row {
    /// The five sort keys, most significant first.
    pub fn keys(&self) -> [Fr; 5] {
        [
            self.tag,
            self.id,
            self.address,
            self.field_tag,
            self.storage_key,
        ]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io;

    #[test]
    fn tag_value_round_trip() {
        for tag in Tag::iter() {
            assert_eq!(Tag::from_value(tag.into()), Some(tag));
        }
        assert_eq!(Tag::from_value(Fr::zero()), None);
        assert_eq!(Tag::from_value(Fr::from(13)), None);
    }

    #[test]
    fn print_csv() {
        let row1 = Row {
            tag: Tag::Memory.into(),
            rw_counter: Fr::one(),
            is_write: Fr::one(),
            id: Fr::one(),
            address: Fr::from(50),
            value: Fr::from(5),
            ..Default::default()
        };
        let row2 = Row {
            tag: Tag::TxReceipt.into(),
            rw_counter: Fr::from(2),
            id: Fr::one(),
            field_tag: Fr::from(2),
            value: Fr::from(21000),
            ..Default::default()
        };
        let mut wtr = csv::Writer::from_writer(io::stdout());
        wtr.serialize(&row1).unwrap();
        wtr.serialize(&row2).unwrap();
        wtr.flush().unwrap();
    }
}
