// Copyright (C) SAFIT. All rights reserved.
// Copyright (C) BABEC. All rights reserved.
// Copyright (C) THL A29 Limited, a Tencent company. All rights reserved.
//
// SPDX-License-Identifier: Apache-2.0

use crate::witness::state::Tag;
use std::fmt;

/// Ways the MPT lookup of a Storage or Account row can fail
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupError {
    /// No table row matches (counter, target, address, key)
    MissingEntry,
    /// The matching table row carries a different value
    ValueMismatch,
    /// The matching table row carries a different value_prev
    ValuePrevMismatch,
}

/// A violated state circuit constraint
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateError {
    /// A field exceeds its declared bit width, or a value its claimed
    /// decomposition
    Range {
        /// Name of the offending field
        field: &'static str,
    },
    /// The lexicographic key order is broken between consecutive rows
    Order,
    /// A read diverges from the last write, or a per-key constant drifts
    /// across rows with equal keys
    Consistency {
        /// Name of the offending field
        field: &'static str,
    },
    /// A counter fails to advance, or to hold, as its tag requires
    Counter {
        /// Name of the offending counter
        field: &'static str,
    },
    /// The MPT lookup for a Storage/Account row failed
    Lookup(LookupError),
    /// A key the row's tag does not use is nonzero, or a structurally
    /// fixed flag carries the wrong value
    Shape {
        /// Name of the offending field
        field: &'static str,
    },
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::MissingEntry => write!(f, "no matching mpt table row"),
            LookupError::ValueMismatch => write!(f, "mpt table value differs"),
            LookupError::ValuePrevMismatch => write!(f, "mpt table value_prev differs"),
        }
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::Range { field } => write!(f, "{field} out of range"),
            StateError::Order => write!(f, "keys not sorted against previous row"),
            StateError::Consistency { field } => {
                write!(f, "{field} inconsistent with previous row")
            }
            StateError::Counter { field } => write!(f, "{field} does not advance correctly"),
            StateError::Lookup(e) => write!(f, "mpt lookup failed: {e}"),
            StateError::Shape { field } => write!(f, "{field} breaks the row shape of this tag"),
        }
    }
}

impl std::error::Error for StateError {}

/// Rejection of one row of the state table.
///
/// Verification is all or nothing; a single rejected row invalidates the
/// whole trace. The index and tag are carried so the upstream trace
/// generator can be debugged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateCheckError {
    /// Position of the rejected row in the checked sequence
    pub row_index: usize,
    /// Decoded tag of the rejected row, if its witness value encodes one
    pub tag: Option<Tag>,
    /// The violated rule
    pub error: StateError,
}

impl fmt::Display for StateCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag {
            Some(tag) => write!(f, "row {} ({:?}): {}", self.row_index, tag, self.error),
            None => write!(f, "row {} (unknown tag): {}", self.row_index, self.error),
        }
    }
}

impl std::error::Error for StateCheckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
