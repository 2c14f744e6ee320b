use eth_types::Fr;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use state_spec::error::{StateCheckError, StateError};
use state_spec::state_circuit::{check_state_row, check_state_rows};
use state_spec::table::{MptTable, TxLogFieldTag, TxReceiptFieldTag};
use state_spec::witness::assign::assign_state_rows;
use state_spec::witness::operation::{Operation, RW};
use state_spec::witness::Witness;
use test_case::test_case;

fn randomness() -> Fr {
    let mut rng = ChaCha20Rng::seed_from_u64(0x7278);
    Fr::from(rng.gen::<u64>())
}

fn check(ops: &[Operation]) -> Result<(), StateCheckError> {
    let randomness = randomness();
    let witness = Witness::from_operations(ops, randomness);
    check_state_rows(&witness.state, &MptTable::default(), randomness)
}

#[test]
fn receipts_over_two_transactions_accept() {
    let ops = [
        Operation::start(),
        Operation::tx_receipt(1, RW::Write, 1, TxReceiptFieldTag::PostStateOrStatus, Fr::one()),
        Operation::tx_receipt(2, RW::Write, 1, TxReceiptFieldTag::CumulativeGasUsed, Fr::from(21000)),
        Operation::tx_receipt(3, RW::Write, 2, TxReceiptFieldTag::CumulativeGasUsed, Fr::from(43000)),
    ];
    assert_eq!(check(&ops), Ok(()));
}

#[test]
fn cumulative_gas_must_strictly_increase() {
    let ops = [
        Operation::start(),
        Operation::tx_receipt(1, RW::Write, 1, TxReceiptFieldTag::CumulativeGasUsed, Fr::from(150)),
        Operation::tx_receipt(2, RW::Write, 2, TxReceiptFieldTag::CumulativeGasUsed, Fr::from(100)),
    ];
    let got = check(&ops).unwrap_err();
    assert_eq!(got.row_index, 2);
    assert_eq!(
        got.error,
        StateError::Consistency {
            field: "cumulative_gas_used"
        }
    );
}

#[test]
fn first_receipt_belongs_to_transaction_one() {
    let ops = [
        Operation::start(),
        Operation::tx_receipt(1, RW::Write, 2, TxReceiptFieldTag::PostStateOrStatus, Fr::one()),
    ];
    let got = check(&ops).unwrap_err();
    assert_eq!(got.error, StateError::Consistency { field: "tx_id" });
}

#[test]
fn receipt_tx_id_must_advance_by_one() {
    let ops = [
        Operation::start(),
        Operation::tx_receipt(1, RW::Write, 1, TxReceiptFieldTag::LogLength, Fr::zero()),
        Operation::tx_receipt(2, RW::Write, 3, TxReceiptFieldTag::LogLength, Fr::zero()),
    ];
    let got = check(&ops).unwrap_err();
    assert_eq!(got.row_index, 2);
    assert_eq!(got.error, StateError::Consistency { field: "tx_id" });
}

#[test_case(0 ; "status_zero")]
#[test_case(1 ; "status_one")]
fn post_state_or_status_is_boolean(value: u64) {
    let ops = [
        Operation::start(),
        Operation::tx_receipt(1, RW::Write, 1, TxReceiptFieldTag::PostStateOrStatus, Fr::from(value)),
    ];
    assert_eq!(check(&ops), Ok(()));
}

#[test]
fn post_state_or_status_two_is_rejected() {
    let ops = [
        Operation::start(),
        Operation::tx_receipt(1, RW::Write, 1, TxReceiptFieldTag::PostStateOrStatus, Fr::from(2)),
    ];
    let got = check(&ops).unwrap_err();
    assert_eq!(
        got.error,
        StateError::Range {
            field: "post_state_or_status"
        }
    );
}

#[test]
fn receipt_tx_id_is_eleven_bits() {
    // drive the pair check directly: a predecessor deep into the table
    // with the id cap already reached
    let randomness = randomness();
    let ops = [
        Operation::tx_receipt(1, RW::Write, 2047, TxReceiptFieldTag::CumulativeGasUsed, Fr::from(10)),
        Operation::tx_receipt(2, RW::Write, 2048, TxReceiptFieldTag::CumulativeGasUsed, Fr::from(20)),
    ];
    let rows = assign_state_rows(&ops, randomness);
    let got = check_state_row(&rows[1], &rows[0], &MptTable::default(), randomness).unwrap_err();
    assert_eq!(got, StateError::Range { field: "tx_id" });
}

#[test]
fn tx_log_rows_are_write_only() {
    let ops = [
        Operation::start(),
        Operation::tx_log(1, RW::Read, 1, 1, TxLogFieldTag::Topic, 0, Fr::from(3)),
    ];
    let got = check(&ops).unwrap_err();
    assert_eq!(got.error, StateError::Shape { field: "is_write" });
}

#[test]
fn tx_log_writes_accept() {
    let ops = [
        Operation::start(),
        Operation::tx_log(1, RW::Write, 1, 1, TxLogFieldTag::Address, 0, Fr::from(0xbeef)),
        Operation::tx_log(2, RW::Write, 1, 1, TxLogFieldTag::Topic, 0, Fr::from(0x01)),
        Operation::tx_log(3, RW::Write, 1, 1, TxLogFieldTag::Topic, 1, Fr::from(0x02)),
    ];
    assert_eq!(check(&ops), Ok(()));
}
