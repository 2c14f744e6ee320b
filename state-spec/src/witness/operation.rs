use crate::table::{AccountFieldTag, CallContextFieldTag, TxLogFieldTag, TxReceiptFieldTag};
use crate::witness::state::Tag;
use eth_types::{Address, Fr, Word};

/// Direction of an access
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RW {
    Read,
    Write,
}

impl RW {
    /// True for writes; rows encode this as a boolean field element.
    pub fn is_write(&self) -> bool {
        matches!(self, RW::Write)
    }
}

/// A logical access to mutable EVM state, as the execution layer produces
/// it, before any limb decomposition.
///
/// The constructors pin the key slots a target does not use to zero, so
/// shape violations can only come from rows forged by hand.
#[derive(Clone, Debug)]
pub struct Operation {
    /// Chronological access counter, unique per operation
    pub rw_counter: u32,
    /// Read or write
    pub rw: RW,
    /// Target-specific keys and values
    pub kind: OperationKind,
}

/// Target-specific payload of an [`Operation`]
#[derive(Clone, Debug)]
pub enum OperationKind {
    Start,
    Memory {
        call_id: u32,
        address: u32,
        value: u8,
    },
    Stack {
        call_id: u32,
        stack_ptr: u32,
        value: Fr,
    },
    Storage {
        tx_id: u32,
        address: Address,
        key: Word,
        value: Fr,
        committed_value: Fr,
    },
    CallContext {
        call_id: u32,
        field_tag: CallContextFieldTag,
        value: Fr,
    },
    Account {
        address: Address,
        field_tag: AccountFieldTag,
        value: Fr,
        committed_value: Fr,
    },
    TxRefund {
        tx_id: u32,
        value: Fr,
    },
    TxAccessListAccount {
        tx_id: u32,
        address: Address,
        value: Fr,
    },
    TxAccessListAccountStorage {
        tx_id: u32,
        address: Address,
        key: Word,
        value: Fr,
    },
    AccountDestructed {
        address: Address,
        value: Fr,
    },
    TxLog {
        tx_id: u32,
        log_id: u32,
        field_tag: TxLogFieldTag,
        index: u32,
        value: Fr,
    },
    TxReceipt {
        tx_id: u32,
        field_tag: TxReceiptFieldTag,
        value: Fr,
    },
}

impl Operation {
    /// The sentinel/padding operation; rw_counter 0 is reserved for it.
    pub fn start() -> Self {
        Operation {
            rw_counter: 0,
            rw: RW::Read,
            kind: OperationKind::Start,
        }
    }

    /// Byte access to the memory of a call.
    ///
    /// The yellow paper allows memory addresses of up to 256 bits, but the
    /// gas cost of memory operations is quadratic in the maximum address
    /// touched, so any address reachable below a gas limit of 3.6e16 fits
    /// 32 bits.
    pub fn memory(rw_counter: u32, rw: RW, call_id: u32, address: u32, value: u8) -> Self {
        Operation {
            rw_counter,
            rw,
            kind: OperationKind::Memory {
                call_id,
                address,
                value,
            },
        }
    }

    /// Access to a stack slot of a call; the address key carries the stack
    /// pointer.
    pub fn stack(rw_counter: u32, rw: RW, call_id: u32, stack_ptr: u32, value: Fr) -> Self {
        Operation {
            rw_counter,
            rw,
            kind: OperationKind::Stack {
                call_id,
                stack_ptr,
                value,
            },
        }
    }

    /// Access to a storage slot. `committed_value` is the slot value at
    /// the start of the enclosing transaction.
    pub fn storage(
        rw_counter: u32,
        rw: RW,
        tx_id: u32,
        address: Address,
        key: Word,
        value: Fr,
        committed_value: Fr,
    ) -> Self {
        Operation {
            rw_counter,
            rw,
            kind: OperationKind::Storage {
                tx_id,
                address,
                key,
                value,
                committed_value,
            },
        }
    }

    /// Access to an attribute of the call context.
    pub fn call_context(
        rw_counter: u32,
        rw: RW,
        call_id: u32,
        field_tag: CallContextFieldTag,
        value: Fr,
    ) -> Self {
        Operation {
            rw_counter,
            rw,
            kind: OperationKind::CallContext {
                call_id,
                field_tag,
                value,
            },
        }
    }

    /// Access to an account attribute. `committed_value` is the attribute
    /// value at the start of the enclosing block.
    pub fn account(
        rw_counter: u32,
        rw: RW,
        address: Address,
        field_tag: AccountFieldTag,
        value: Fr,
        committed_value: Fr,
    ) -> Self {
        Operation {
            rw_counter,
            rw,
            kind: OperationKind::Account {
                address,
                field_tag,
                value,
                committed_value,
            },
        }
    }

    /// Access to the gas refund counter of a transaction.
    pub fn tx_refund(rw_counter: u32, rw: RW, tx_id: u32, value: Fr) -> Self {
        Operation {
            rw_counter,
            rw,
            kind: OperationKind::TxRefund { tx_id, value },
        }
    }

    /// Access to the per-transaction account access list (EIP-2929 warmth).
    pub fn tx_access_list_account(
        rw_counter: u32,
        rw: RW,
        tx_id: u32,
        address: Address,
        value: Fr,
    ) -> Self {
        Operation {
            rw_counter,
            rw,
            kind: OperationKind::TxAccessListAccount {
                tx_id,
                address,
                value,
            },
        }
    }

    /// Access to the per-transaction storage slot access list.
    pub fn tx_access_list_account_storage(
        rw_counter: u32,
        rw: RW,
        tx_id: u32,
        address: Address,
        key: Word,
        value: Fr,
    ) -> Self {
        Operation {
            rw_counter,
            rw,
            kind: OperationKind::TxAccessListAccountStorage {
                tx_id,
                address,
                key,
                value,
            },
        }
    }

    /// Access to the destructed flag of an account.
    pub fn account_destructed(rw_counter: u32, rw: RW, address: Address, value: Fr) -> Self {
        Operation {
            rw_counter,
            rw,
            kind: OperationKind::AccountDestructed { address, value },
        }
    }

    /// Append-only write of one log attribute; the address key carries the
    /// log id and the storage key the index within the attribute.
    pub fn tx_log(
        rw_counter: u32,
        rw: RW,
        tx_id: u32,
        log_id: u32,
        field_tag: TxLogFieldTag,
        index: u32,
        value: Fr,
    ) -> Self {
        Operation {
            rw_counter,
            rw,
            kind: OperationKind::TxLog {
                tx_id,
                log_id,
                field_tag,
                index,
                value,
            },
        }
    }

    /// Access to a receipt attribute of a transaction.
    pub fn tx_receipt(
        rw_counter: u32,
        rw: RW,
        tx_id: u32,
        field_tag: TxReceiptFieldTag,
        value: Fr,
    ) -> Self {
        Operation {
            rw_counter,
            rw,
            kind: OperationKind::TxReceipt {
                tx_id,
                field_tag,
                value,
            },
        }
    }

    /// The row tag this operation assigns to.
    pub fn tag(&self) -> Tag {
        match self.kind {
            OperationKind::Start => Tag::Start,
            OperationKind::Memory { .. } => Tag::Memory,
            OperationKind::Stack { .. } => Tag::Stack,
            OperationKind::Storage { .. } => Tag::Storage,
            OperationKind::CallContext { .. } => Tag::CallContext,
            OperationKind::Account { .. } => Tag::Account,
            OperationKind::TxRefund { .. } => Tag::TxRefund,
            OperationKind::TxAccessListAccount { .. } => Tag::TxAccessListAccount,
            OperationKind::TxAccessListAccountStorage { .. } => Tag::TxAccessListAccountStorage,
            OperationKind::AccountDestructed { .. } => Tag::AccountDestructed,
            OperationKind::TxLog { .. } => Tag::TxLog,
            OperationKind::TxReceipt { .. } => Tag::TxReceipt,
        }
    }
}
