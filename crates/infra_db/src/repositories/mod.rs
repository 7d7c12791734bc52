//! Ledger repositories
//!
//! Each repository owns the SQL for one aggregate. Queries are
//! runtime-checked (`sqlx::query_as` with `FromRow` rows), so no offline
//! query cache is needed to build the crate.

pub mod fund;
pub mod transaction;

pub use fund::{FundRepository, FundRow};
pub use transaction::{RecordError, TransactionRepository};
