//! # ZKEVM-Gadgets
//!
//! A collection of reusable reference gadgets for the zk_evm state checker.
//! Unlike their in-circuit counterparts these evaluate directly over witness
//! values, so they can serve as the executable specification the circuit
//! gates must agree with.

#![cfg_attr(docsrs, feature(doc_cfg))]
// We want to have UPPERCASE idents sometimes.
#![allow(clippy::upper_case_acronyms)]
// Catch documentation errors caused by code changes.
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod simple_lt_limbs;
pub mod util;
