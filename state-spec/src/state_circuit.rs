pub mod ordering;

use crate::constant::{
    MAX_FIELD_TAG, MAX_ID, MAX_MEMORY_ADDRESS, MAX_RECEIPT_TX_ID, MAX_STACK_PTR, MAX_TAG,
};
use crate::error::{LookupError, StateCheckError, StateError};
use crate::table::{MptLookup, MptTableTag, TxReceiptFieldTag};
use crate::witness::state::{Row, Tag};
use eth_types::Fr;
use gadgets::util::linear_combine;

fn assert_in_range(x: Fr, min: u64, max: u64, field: &'static str) -> Result<(), StateError> {
    if x >= Fr::from(min) && x <= Fr::from(max) {
        Ok(())
    } else {
        Err(StateError::Range { field })
    }
}

fn assert_zero(x: Fr, field: &'static str) -> Result<(), StateError> {
    if x.is_zero() {
        Ok(())
    } else {
        Err(StateError::Shape { field })
    }
}

fn all_keys_eq(row: &Row, row_prev: &Row) -> bool {
    row.keys() == row_prev.keys()
}

fn check_start(row: &Row, _row_prev: &Row) -> Result<(), StateError> {
    if !row.rw_counter.is_zero() {
        return Err(StateError::Counter {
            field: "rw_counter",
        });
    }
    if !row.mpt_counter.is_zero() {
        return Err(StateError::Counter {
            field: "mpt_counter",
        });
    }
    Ok(())
}

fn check_memory(row: &Row, row_prev: &Row) -> Result<(), StateError> {
    // Unused keys are 0
    assert_zero(row.field_tag, "field_tag")?;
    assert_zero(row.storage_key, "storage_key")?;

    // First access of an address in a call: a read sees uninitialized
    // memory, which is zero.
    if !all_keys_eq(row, row_prev) && row.is_write.is_zero() && !row.value.is_zero() {
        return Err(StateError::Consistency { field: "value" });
    }

    assert_in_range(row.address, 0, MAX_MEMORY_ADDRESS, "memory_address")?;

    // value is a byte
    assert_in_range(row.value, 0, (1 << 8) - 1, "memory_value")
}

fn check_stack(row: &Row, row_prev: &Row) -> Result<(), StateError> {
    // Unused keys are 0
    assert_zero(row.field_tag, "field_tag")?;
    assert_zero(row.storage_key, "storage_key")?;

    // A stack position cannot be read before it is written, so the first
    // access of a position in a call must be a write.
    if !all_keys_eq(row, row_prev) && row.is_write.is_zero() {
        return Err(StateError::Consistency { field: "is_write" });
    }

    assert_in_range(row.address, 0, MAX_STACK_PTR, "stack_ptr")?;

    // Within a call the pointer only stays or grows by one. The
    // difference is computed in the field, so a decrease wraps around and
    // fails the range bound.
    if row.tag == row_prev.tag && row.id == row_prev.id {
        assert_in_range(row.address - row_prev.address, 0, 1, "stack_ptr_diff")?;
    }
    Ok(())
}

fn check_storage(
    row: &Row,
    row_prev: &Row,
    tables: &impl MptLookup,
) -> Result<(), StateError> {
    // Unused keys are 0
    assert_zero(row.field_tag, "field_tag")?;

    // The committed value is fixed at the first touch of a key and must
    // not drift while the keys repeat.
    if all_keys_eq(row, row_prev) && row.committed_value != row_prev.committed_value {
        return Err(StateError::Consistency {
            field: "committed_value",
        });
    }

    // TODO: merge all updates of a key into a single MPT lookup, using
    // the first and last access values.

    // One MPT lookup per row, keyed by the incremental counter. While the
    // keys repeat, value_prev chains to the previous row's value; on a key
    // change it restarts from the committed value.
    let value_prev = if all_keys_eq(row, row_prev) {
        row_prev.value
    } else {
        row.committed_value
    };
    mpt_lookup(
        tables,
        row.mpt_counter,
        MptTableTag::Storage.into(),
        row.address,
        row.storage_key,
        row.value,
        value_prev,
    )
}

fn check_call_context(row: &Row, _row_prev: &Row) -> Result<(), StateError> {
    // Unused keys are 0
    assert_zero(row.address, "address")?;
    assert_zero(row.storage_key, "storage_key")?;

    // TODO: constraints for the call context attributes are not specified
    // yet
    Ok(())
}

fn check_account(
    row: &Row,
    row_prev: &Row,
    tables: &impl MptLookup,
) -> Result<(), StateError> {
    // Unused keys are 0
    assert_zero(row.id, "id")?;
    assert_zero(row.storage_key, "storage_key")?;

    if all_keys_eq(row, row_prev) && row.committed_value != row_prev.committed_value {
        return Err(StateError::Consistency {
            field: "committed_value",
        });
    }

    // Same lookup protocol as Storage, but the target selects the account
    // attribute, so the MPT circuit knows which trie field to open.
    let value_prev = if all_keys_eq(row, row_prev) {
        row_prev.value
    } else {
        row.committed_value
    };
    mpt_lookup(
        tables,
        row.mpt_counter,
        row.field_tag,
        row.address,
        row.storage_key,
        row.value,
        value_prev,
    )

    // Value transition legality (e.g. the nonce moving by one) is
    // constrained by the EVM circuit, not here.
}

fn check_tx_refund(row: &Row, _row_prev: &Row) -> Result<(), StateError> {
    // Unused keys are 0
    assert_zero(row.address, "address")?;
    assert_zero(row.field_tag, "field_tag")?;
    assert_zero(row.storage_key, "storage_key")?;

    // TODO: missing constraint: when the keys change, value must be 0
    Ok(())
}

fn check_tx_access_list_account(row: &Row, _row_prev: &Row) -> Result<(), StateError> {
    // Unused keys are 0
    assert_zero(row.field_tag, "field_tag")?;
    assert_zero(row.storage_key, "storage_key")?;

    // TODO: missing constraint: when the keys change, value must be 0
    Ok(())
}

fn check_tx_access_list_account_storage(row: &Row, _row_prev: &Row) -> Result<(), StateError> {
    // Unused keys are 0
    assert_zero(row.field_tag, "field_tag")?;

    // TODO: missing constraint: when the keys change, value must be 0
    Ok(())
}

fn check_account_destructed(row: &Row, _row_prev: &Row) -> Result<(), StateError> {
    // Unused keys are 0
    assert_zero(row.id, "id")?;
    assert_zero(row.field_tag, "field_tag")?;
    assert_zero(row.storage_key, "storage_key")?;

    // TODO: missing constraint: when the keys change, value must be 0
    Ok(())
}

fn check_tx_log(row: &Row, _row_prev: &Row) -> Result<(), StateError> {
    // Logs are append-only: every row is a write
    if row.is_write != Fr::one() {
        return Err(StateError::Shape { field: "is_write" });
    }
    Ok(())
}

fn check_tx_receipt(row: &Row, row_prev: &Row) -> Result<(), StateError> {
    let tx_id = row.id;
    let prev_tx_id = row_prev.id;

    // Unused keys are 0
    assert_zero(row.address, "address")?;
    assert_zero(row.storage_key, "storage_key")?;

    // PostStateOrStatus is a boolean per EIP-658
    if row.field_tag == TxReceiptFieldTag::PostStateOrStatus.into() {
        assert_in_range(row.value, 0, 1, "post_state_or_status")?;
    }

    // Receipts are laid out per transaction: across a transaction
    // boundary the id advances by exactly one and cumulative gas keeps
    // growing.
    if tx_id != prev_tx_id && row.tag == row_prev.tag {
        if tx_id != prev_tx_id + Fr::one() {
            return Err(StateError::Consistency { field: "tx_id" });
        }
        if row.field_tag == TxReceiptFieldTag::CumulativeGasUsed.into()
            && row.value <= row_prev.value
        {
            return Err(StateError::Consistency {
                field: "cumulative_gas_used",
            });
        }
    }

    // The first receipt row belongs to transaction 1
    if row.tag != row_prev.tag && tx_id != Fr::one() {
        return Err(StateError::Consistency { field: "tx_id" });
    }

    assert_in_range(tx_id, 1, MAX_RECEIPT_TX_ID, "tx_id")
}

fn mpt_lookup(
    tables: &impl MptLookup,
    counter: Fr,
    target: Fr,
    address: Fr,
    key: Fr,
    value: Fr,
    value_prev: Fr,
) -> Result<(), StateError> {
    let (mpt_value, mpt_value_prev) = tables
        .lookup(counter, target, address, key)
        .ok_or(StateError::Lookup(LookupError::MissingEntry))?;
    if mpt_value != value {
        return Err(StateError::Lookup(LookupError::ValueMismatch));
    }
    if mpt_value_prev != value_prev {
        return Err(StateError::Lookup(LookupError::ValuePrevMismatch));
    }
    Ok(())
}

/// Decide whether one row of the state table is valid given its immediate
/// predecessor.
///
/// Rows are checked in canonical key order and every rule only ever sees
/// this window of two, plus the read-only MPT table for Storage and
/// Account rows. The same (row, previous row, table, randomness) always
/// yields the same verdict; the arithmetic circuit must agree with this
/// function on every input.
pub fn check_state_row(
    row: &Row,
    row_prev: &Row,
    tables: &impl MptLookup,
    randomness: Fr,
) -> Result<(), StateError> {
    // Constraints that affect all rows, no matter which tag they use.
    assert_in_range(row.tag, 1, MAX_TAG, "tag")?;
    assert_in_range(row.id, 0, MAX_ID, "id")?;
    assert_in_range(row.field_tag, 0, MAX_FIELD_TAG, "field_tag")?;

    // address is a linear combination of 10 range-checked 16-bit limbs
    for limb in &row.address_limbs {
        assert_in_range(*limb, 0, (1 << 16) - 1, "address_limb")?;
    }
    if row.address != linear_combine(&row.address_limbs, Fr::from(1 << 16)) {
        return Err(StateError::Range { field: "address" });
    }

    // storage_key is bound to its byte decomposition by the RLC; the
    // bytes also have to be bytes, since the ordering limbs are built
    // from them
    for byte in &row.storage_key_bytes {
        assert_in_range(*byte, 0, (1 << 8) - 1, "storage_key_byte")?;
    }
    if row.storage_key != linear_combine(&row.storage_key_bytes, randomness) {
        return Err(StateError::Range {
            field: "storage_key",
        });
    }

    // is_write is boolean
    assert_in_range(row.is_write, 0, 1, "is_write")?;

    // Keys and rw_counter are sorted lexicographically; Start rows have
    // no meaningful predecessor and are exempt.
    if row.tag != Tag::Start.into() {
        ordering::check_ordering(row, row_prev)?;
    }

    // Read consistency: a read under unchanged keys returns the last
    // value.
    if row.is_write.is_zero() && all_keys_eq(row, row_prev) && row.value != row_prev.value {
        return Err(StateError::Consistency { field: "value" });
    }

    if row.tag != Tag::Start.into() {
        // The MPT counter advances by one exactly on Storage and Account
        // rows and holds everywhere else.
        let expected = if row.tag == Tag::Storage.into() || row.tag == Tag::Account.into() {
            row_prev.mpt_counter + Fr::one()
        } else {
            row_prev.mpt_counter
        };
        if row.mpt_counter != expected {
            return Err(StateError::Counter {
                field: "mpt_counter",
            });
        }

        // rw_counter 0 is reserved for Start padding
        if row.rw_counter.is_zero() {
            return Err(StateError::Counter {
                field: "rw_counter",
            });
        }
    }

    // Constraints specific to each tag.
    match Tag::from_value(row.tag).expect("tag was range checked") {
        Tag::Start => check_start(row, row_prev),
        Tag::Memory => check_memory(row, row_prev),
        Tag::Stack => check_stack(row, row_prev),
        Tag::Storage => check_storage(row, row_prev, tables),
        Tag::CallContext => check_call_context(row, row_prev),
        Tag::Account => check_account(row, row_prev, tables),
        Tag::TxRefund => check_tx_refund(row, row_prev),
        Tag::TxAccessListAccount => check_tx_access_list_account(row, row_prev),
        Tag::TxAccessListAccountStorage => check_tx_access_list_account_storage(row, row_prev),
        Tag::AccountDestructed => check_account_destructed(row, row_prev),
        Tag::TxLog => check_tx_log(row, row_prev),
        Tag::TxReceipt => check_tx_receipt(row, row_prev),
    }
}

/// Check a whole state table in one forward scan.
///
/// The first row is checked against an all-zero synthetic predecessor, so
/// a well-formed table opens with a Start row. Stops at the first
/// rejection; there is no partial acceptance.
pub fn check_state_rows(
    rows: &[Row],
    tables: &impl MptLookup,
    randomness: Fr,
) -> Result<(), StateCheckError> {
    let mut row_prev = Row::default();
    for (row_index, row) in rows.iter().enumerate() {
        if let Err(error) = check_state_row(row, &row_prev, tables, randomness) {
            let rejection = StateCheckError {
                row_index,
                tag: Tag::from_value(row.tag),
                error,
            };
            log::debug!("state table rejected: {rejection}");
            return Err(rejection);
        }
        row_prev = row.clone();
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::table::MptTable;
    use crate::witness::state::Row;

    fn start_row() -> Row {
        Row {
            tag: Tag::Start.into(),
            ..Default::default()
        }
    }

    #[test]
    fn start_row_against_zero_predecessor() {
        let table = MptTable::default();
        assert_eq!(
            check_state_row(&start_row(), &Row::default(), &table, Fr::from(2)),
            Ok(())
        );
    }

    #[test]
    fn start_row_with_nonzero_counters() {
        let table = MptTable::default();
        let mut row = start_row();
        row.rw_counter = Fr::one();
        assert_eq!(
            check_state_row(&row, &Row::default(), &table, Fr::from(2)),
            Err(StateError::Counter {
                field: "rw_counter"
            })
        );
    }

    #[test]
    fn tag_out_of_range() {
        let table = MptTable::default();
        for bad in [Fr::zero(), Fr::from(13)] {
            let mut row = start_row();
            row.tag = bad;
            assert_eq!(
                check_state_row(&row, &Row::default(), &table, Fr::from(2)),
                Err(StateError::Range { field: "tag" })
            );
        }
    }

    #[test]
    fn forged_address_limbs() {
        let table = MptTable::default();
        let mut row = start_row();
        row.address = Fr::one();
        assert_eq!(
            check_state_row(&row, &Row::default(), &table, Fr::from(2)),
            Err(StateError::Range { field: "address" })
        );
    }

    #[test]
    fn forged_storage_key_byte() {
        let table = MptTable::default();
        let mut row = start_row();
        row.storage_key_bytes[0] = Fr::from(256);
        row.storage_key = linear_combine(&row.storage_key_bytes, Fr::from(2));
        assert_eq!(
            check_state_row(&row, &Row::default(), &table, Fr::from(2)),
            Err(StateError::Range {
                field: "storage_key_byte"
            })
        );
    }
}
