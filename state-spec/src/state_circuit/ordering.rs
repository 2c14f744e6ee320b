use crate::constant::{ID_BITS, TAG_BITS};
use crate::error::StateError;
use crate::witness::state::Row;
use eth_types::ToBigEndian;
use gadgets::simple_lt_limbs::SimpleLtLimbsGadget;
use itertools::Itertools;

/// Number of 16-bit limbs in the composite ordering key:
/// tag+id (2), address (10), field_tag (1), storage key bytes (16),
/// rw_counter (2).
pub const N_ORDERING_LIMBS: usize = 31;

// tag and id share a 32-bit slot
const _: () = assert!(TAG_BITS + ID_BITS == 2 * 16);

/// Pack the sort keys and the rw_counter of a row into little-endian
/// 16-bit limbs, most significant field first: tag, id, address,
/// field_tag, storage_key, rw_counter.
///
/// `storage_key` itself is RLC encoded and does not preserve integer
/// order, so its byte decomposition is packed instead. The caller must
/// have range checked the row; excess bits of oversized values are
/// truncated here.
pub fn keys_rwc_to_limbs(row: &Row) -> [u16; N_ORDERING_LIMBS] {
    let tag_id = (row.tag.get_lower_32() << ID_BITS) | row.id.get_lower_32();

    let mut be_bytes = Vec::with_capacity(2 * N_ORDERING_LIMBS);
    be_bytes.extend(tag_id.to_be_bytes());
    // 160-bit address = 20 bytes
    be_bytes.extend_from_slice(&row.address.to_word().to_be_bytes()[12..]);
    be_bytes.extend((row.field_tag.get_lower_32() as u16).to_be_bytes());
    for byte in row.storage_key_bytes.iter().rev() {
        be_bytes.push(byte.get_lower_32() as u8);
    }
    be_bytes.extend(row.rw_counter.get_lower_32().to_be_bytes());

    let mut limbs: Vec<u16> = be_bytes
        .iter()
        .tuples()
        .map(|(hi, lo)| u16::from_be_bytes([*hi, *lo]))
        .collect();
    limbs.reverse();
    limbs.try_into().expect("exactly 31 limbs")
}

/// The composite key must strictly increase between consecutive rows.
/// This single comparison also forces the tag to progress monotonically
/// once the Start padding is over. The caller skips it for Start rows,
/// which have no meaningful predecessor.
pub fn check_ordering(row: &Row, row_prev: &Row) -> Result<(), StateError> {
    let prev_limbs = keys_rwc_to_limbs(row_prev);
    let cur_limbs = keys_rwc_to_limbs(row);
    if SimpleLtLimbsGadget::new(&prev_limbs, &cur_limbs).is_lt() {
        Ok(())
    } else {
        Err(StateError::Order)
    }
}
