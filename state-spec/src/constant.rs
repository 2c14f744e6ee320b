/// Highest read-write counter value a block can reach
pub const MAX_RW_COUNTER: u64 = (1 << 32) - 1;
/// Memory addresses reachable before the gas limit passes 3.6e16 fit 32 bits
pub const MAX_MEMORY_ADDRESS: u64 = (1 << 32) - 1;
/// EVM stack depth is 1024
pub const MAX_STACK_PTR: u64 = 1023;
/// Number of Tag variants
pub const MAX_TAG: u64 = 12;
/// Maximum number of calls in a block
pub const MAX_ID: u64 = (1 << 28) - 1;
/// Max(# of CallContextFieldTag, # of AccountFieldTag)
pub const MAX_FIELD_TAG: u64 = 24;
/// Transaction ids in receipt rows are 11 bits, starting at 1
pub const MAX_RECEIPT_TX_ID: u64 = (1 << 11) - 1;

pub const RW_COUNTER_BITS: usize = 32;
pub const TAG_BITS: usize = 4;
pub const ID_BITS: usize = 28;
pub const ADDRESS_BITS: usize = 160;
pub const FIELD_TAG_BITS: usize = 5;

/// Address decomposition: 10 limbs of 16 bits
pub const N_ADDRESS_LIMBS: usize = 10;
/// Storage key decomposition: 32 limbs of 8 bits
pub const N_STORAGE_KEY_BYTES: usize = 32;
