//! Core Kernel - Foundational types shared across the ledger crates
//!
//! This crate provides the building blocks used by the domain and
//! infrastructure layers:
//! - Strongly-typed entity identifiers

pub mod identifiers;

pub use identifiers::{FundId, TransactionId};
