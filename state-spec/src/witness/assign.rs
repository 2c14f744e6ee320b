use crate::constant::N_ADDRESS_LIMBS;
use crate::witness::operation::{Operation, OperationKind};
use crate::witness::state::{Row, Tag};
use eth_types::{Fr, ToLittleEndian, ToWord, Word};
use gadgets::util::rlc;
use std::array;

/// Stateful Operation-to-Row transformer.
///
/// Owns the running trie-lookup counter, so one assigner must see all the
/// operations of a table, in their final order, exactly once.
#[derive(Debug, Default)]
pub struct Assigner {
    mpt_counter: u64,
}

impl Assigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decompose one operation into its table row: address limbs, storage
    /// key bytes plus RLC, and the stamped mpt_counter.
    pub fn assign_row(&mut self, op: &Operation, randomness: Fr) -> Row {
        let tag = op.tag();
        let (id, address, field_tag, storage_key, value, committed_value) = unpack(&op.kind);

        let address_bytes = address.to_le_bytes();
        let address_limbs: [Fr; N_ADDRESS_LIMBS] = array::from_fn(|i| {
            Fr::from(address_bytes[2 * i] as u64 + ((address_bytes[2 * i + 1] as u64) << 8))
        });
        let key_bytes = storage_key.to_le_bytes();
        let storage_key_bytes = key_bytes.map(|byte| Fr::from(byte as u64));

        if matches!(tag, Tag::Storage | Tag::Account) {
            self.mpt_counter += 1;
        }

        Row {
            rw_counter: Fr::from(op.rw_counter as u64),
            is_write: Fr::from(op.rw.is_write() as u64),
            tag: tag.into(),
            id,
            address: Fr::from_word(address),
            field_tag,
            storage_key: rlc(&key_bytes, randomness),
            address_limbs,
            storage_key_bytes,
            value,
            committed_value,
            mpt_counter: Fr::from(self.mpt_counter),
        }
    }
}

/// Extract the generic (id, address, field_tag, storage_key, value,
/// committed_value) view of a typed operation; slots the target does not
/// use read zero.
fn unpack(kind: &OperationKind) -> (Fr, Word, Fr, Word, Fr, Fr) {
    let zero = Fr::zero();
    match *kind {
        OperationKind::Start => (zero, Word::zero(), zero, Word::zero(), zero, zero),
        OperationKind::Memory {
            call_id,
            address,
            value,
        } => (
            Fr::from(call_id as u64),
            Word::from(address),
            zero,
            Word::zero(),
            Fr::from(value as u64),
            zero,
        ),
        OperationKind::Stack {
            call_id,
            stack_ptr,
            value,
        } => (
            Fr::from(call_id as u64),
            Word::from(stack_ptr),
            zero,
            Word::zero(),
            value,
            zero,
        ),
        OperationKind::Storage {
            tx_id,
            address,
            key,
            value,
            committed_value,
        } => (
            Fr::from(tx_id as u64),
            address.to_word(),
            zero,
            key,
            value,
            committed_value,
        ),
        OperationKind::CallContext {
            call_id,
            field_tag,
            value,
        } => (
            Fr::from(call_id as u64),
            Word::zero(),
            field_tag.into(),
            Word::zero(),
            value,
            zero,
        ),
        OperationKind::Account {
            address,
            field_tag,
            value,
            committed_value,
        } => (
            zero,
            address.to_word(),
            field_tag.into(),
            Word::zero(),
            value,
            committed_value,
        ),
        OperationKind::TxRefund { tx_id, value } => (
            Fr::from(tx_id as u64),
            Word::zero(),
            zero,
            Word::zero(),
            value,
            zero,
        ),
        OperationKind::TxAccessListAccount {
            tx_id,
            address,
            value,
        } => (
            Fr::from(tx_id as u64),
            address.to_word(),
            zero,
            Word::zero(),
            value,
            zero,
        ),
        OperationKind::TxAccessListAccountStorage {
            tx_id,
            address,
            key,
            value,
        } => (
            Fr::from(tx_id as u64),
            address.to_word(),
            zero,
            key,
            value,
            zero,
        ),
        OperationKind::AccountDestructed { address, value } => (
            zero,
            address.to_word(),
            zero,
            Word::zero(),
            value,
            zero,
        ),
        OperationKind::TxLog {
            tx_id,
            log_id,
            field_tag,
            index,
            value,
        } => (
            Fr::from(tx_id as u64),
            Word::from(log_id),
            field_tag.into(),
            Word::from(index),
            value,
            zero,
        ),
        OperationKind::TxReceipt {
            tx_id,
            field_tag,
            value,
        } => (
            Fr::from(tx_id as u64),
            Word::zero(),
            field_tag.into(),
            Word::zero(),
            value,
            zero,
        ),
    }
}

/// Generate the state rows from an ordered list of operations. Total:
/// never rejects, order preserving; rejection is the checker's job.
pub fn assign_state_rows(operations: &[Operation], randomness: Fr) -> Vec<Row> {
    let mut assigner = Assigner::new();
    operations
        .iter()
        .map(|op| assigner.assign_row(op, randomness))
        .collect()
}
