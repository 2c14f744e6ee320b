use crate::witness::assign::assign_state_rows;
use crate::witness::operation::Operation;
use crate::witness::state::{Row, Tag};
use eth_types::Fr;
use std::collections::HashSet;
use strum_macros::EnumIter;

/// Target column of the MPT table: which trie attribute an update touches.
/// Account rows use their field tag as the target, so the account variants
/// share discriminants with [`AccountFieldTag`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter)]
pub enum MptTableTag {
    Nonce = 1,
    Balance = 2,
    CodeHash = 3,
    Storage = 4,
}

/// Which attribute of an account an Account row reads or writes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountFieldTag {
    Nonce = 1,
    Balance = 2,
    CodeHash = 3,
}

/// Which attribute of a call context a CallContext row reads or writes.
/// Beyond the unused-keys-zero rule, constraints for this target are not
/// specified yet; the variants exist so operations stay tag-typed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallContextFieldTag {
    RwCounterEndOfReversion = 1,
    CallerId,
    TxId,
    Depth,
    CallerAddress,
    CalleeAddress,
    CallDataOffset,
    CallDataLength,
    ReturnDataOffset,
    ReturnDataLength,
    Value,
    IsSuccess,
    IsPersistent,
    IsStatic,
    LastCalleeId,
    LastCalleeReturnDataOffset,
    LastCalleeReturnDataLength,
    IsRoot,
    IsCreate,
    CodeHash,
    ProgramCounter,
    StackPointer,
    GasLeft,
    MemorySize,
}

/// Which part of a log entry a TxLog row writes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxLogFieldTag {
    Address = 1,
    Topic = 2,
    Data = 3,
}

/// Which attribute of a receipt a TxReceipt row reads or writes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxReceiptFieldTag {
    /// Status of the transaction per EIP-658, a boolean
    PostStateOrStatus = 1,
    /// Gas used by the block up to and including this transaction
    CumulativeGasUsed = 2,
    LogLength = 3,
}

macro_rules! impl_field_tag_into_fr {
    ($($tag:ty),*) => {
        $(impl From<$tag> for Fr {
            fn from(tag: $tag) -> Self {
                Fr::from(tag as u64)
            }
        })*
    };
}
impl_field_tag_into_fr!(
    MptTableTag,
    AccountFieldTag,
    CallContextFieldTag,
    TxLogFieldTag,
    TxReceiptFieldTag
);

/// One trie update the MPT circuit has verified against the account and
/// storage tries
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MptTableRow {
    /// Step index in the trie update proof
    pub counter: Fr,
    /// [`MptTableTag`] value selecting the updated attribute
    pub target: Fr,
    /// Account address
    pub address: Fr,
    /// Storage key (RLC encoded), zero for account targets
    pub key: Fr,
    /// Value after the update
    pub value: Fr,
    /// Value before the update
    pub value_prev: Fr,
}

/// Read-only exact-match view of the MPT table. The state circuit only
/// ever consults it; building and authenticating it belongs to the MPT
/// circuit, so tests may substitute any fixture.
pub trait MptLookup {
    /// Exact-match lookup on (counter, target, address, key), returning
    /// the (value, value_prev) pair of the matching update.
    fn lookup(&self, counter: Fr, target: Fr, address: Fr, key: Fr) -> Option<(Fr, Fr)>;
}

/// The set of verified trie updates, immutable once constructed
#[derive(Clone, Debug, Default)]
pub struct MptTable {
    rows: HashSet<MptTableRow>,
}

impl MptTable {
    pub fn new(rows: impl IntoIterator<Item = MptTableRow>) -> Self {
        MptTable {
            rows: rows.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MptTableRow> {
        self.rows.iter()
    }

    /// Project a finalized state row sequence into the updates the MPT
    /// circuit must authenticate: one entry per Storage or Account row,
    /// keyed by its mpt_counter. The value before the update is the
    /// previous row's value while the keys repeat, and the committed value
    /// on the first touch of a key.
    pub fn from_rows(rows: &[Row]) -> Self {
        let mut table = HashSet::new();
        for (idx, row) in rows.iter().enumerate() {
            let is_storage = row.tag == Tag::Storage.into();
            let is_account = row.tag == Tag::Account.into();
            if !is_storage && !is_account {
                continue;
            }
            let mut value_prev = row.committed_value;
            if idx > 0 && rows[idx - 1].keys() == row.keys() {
                value_prev = rows[idx - 1].value;
            }
            let target = if is_storage {
                MptTableTag::Storage.into()
            } else {
                row.field_tag
            };
            table.insert(MptTableRow {
                counter: row.mpt_counter,
                target,
                address: row.address,
                key: row.storage_key,
                value: row.value,
                value_prev,
            });
        }
        MptTable { rows: table }
    }

    /// Convenience overload: assign the rows first, then project them.
    pub fn from_operations(operations: &[Operation], randomness: Fr) -> Self {
        Self::from_rows(&assign_state_rows(operations, randomness))
    }
}

impl MptLookup for MptTable {
    fn lookup(&self, counter: Fr, target: Fr, address: Fr, key: Fr) -> Option<(Fr, Fr)> {
        self.rows
            .iter()
            .find(|row| {
                row.counter == counter
                    && row.target == target
                    && row.address == address
                    && row.key == key
            })
            .map(|row| (row.value, row.value_prev))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::witness::operation::RW;
    use eth_types::{Address, Word};

    #[test]
    fn storage_projection_uses_committed_then_previous_value() {
        let addr = Address::repeat_byte(0x11);
        let key = Word::from(0x33);
        let randomness = Fr::from(0x10000);
        let ops = [
            Operation::start(),
            Operation::storage(1, RW::Write, 1, addr, key, Fr::from(9), Fr::from(2)),
            Operation::storage(2, RW::Write, 1, addr, key, Fr::from(7), Fr::from(2)),
        ];
        let rows = assign_state_rows(&ops, randomness);
        let table = MptTable::from_rows(&rows);
        assert_eq!(table.len(), 2);

        let storage = Fr::from(MptTableTag::Storage as u64);
        // first touch: value_prev is the committed value
        assert_eq!(
            table.lookup(Fr::from(1), storage, rows[1].address, rows[1].storage_key),
            Some((Fr::from(9), Fr::from(2)))
        );
        // repeated keys: value_prev is the previous row's value
        assert_eq!(
            table.lookup(Fr::from(2), storage, rows[1].address, rows[1].storage_key),
            Some((Fr::from(7), Fr::from(9)))
        );
    }

    #[test]
    fn account_projection_targets_field_tag() {
        let addr = Address::repeat_byte(0x22);
        let ops = [
            Operation::start(),
            Operation::account(1, RW::Write, addr, AccountFieldTag::Nonce, Fr::one(), Fr::zero()),
        ];
        let table = MptTable::from_operations(&ops, Fr::from(0x10000));
        let got = table.lookup(
            Fr::from(1),
            AccountFieldTag::Nonce.into(),
            Fr::from_word(Word::from(addr.as_bytes())),
            Fr::zero(),
        );
        assert_eq!(got, Some((Fr::one(), Fr::zero())));
    }

    #[test]
    fn lookup_misses_on_any_key_difference() {
        let table = MptTable::new([MptTableRow {
            counter: Fr::one(),
            target: MptTableTag::Storage.into(),
            address: Fr::from(5),
            key: Fr::from(6),
            value: Fr::from(7),
            value_prev: Fr::zero(),
        }]);
        assert!(table
            .lookup(Fr::one(), MptTableTag::Storage.into(), Fr::from(5), Fr::from(6))
            .is_some());
        assert!(table
            .lookup(Fr::from(2), MptTableTag::Storage.into(), Fr::from(5), Fr::from(6))
            .is_none());
        assert!(table
            .lookup(Fr::one(), MptTableTag::Nonce.into(), Fr::from(5), Fr::from(6))
            .is_none());
    }
}
