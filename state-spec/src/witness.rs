pub mod assign;
pub mod operation;
pub mod state;

use crate::witness::operation::Operation;
use eth_types::Fr;

/// Witness of the state circuit: the fully decomposed access log, in
/// canonical key order.
#[derive(Clone, Debug, Default)]
pub struct Witness {
    pub state: Vec<state::Row>,
}

impl Witness {
    /// Assign the rows from the ordered logical operations of a trace.
    pub fn from_operations(operations: &[Operation], randomness: Fr) -> Self {
        Witness {
            state: assign::assign_state_rows(operations, randomness),
        }
    }

    /// Dump the state table to stdout for debugging.
    pub fn print_csv(&self) {
        let mut wtr = csv::Writer::from_writer(std::io::stdout());
        for row in &self.state {
            wtr.serialize(row).unwrap();
        }
        wtr.flush().unwrap();
    }
}
