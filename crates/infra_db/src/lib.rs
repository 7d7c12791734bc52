//! Infrastructure Database Layer
//!
//! This crate provides PostgreSQL persistence for the quota ledger using
//! SQLx: connection pool management, embedded migrations, and the
//! repositories the HTTP layer talks to.
//!
//! # Atomicity
//!
//! Recording a transaction writes two rows: the immutable transaction record
//! and the updated fund balances. [`repositories::TransactionRepository`]
//! performs both inside one SQL transaction with the fund row locked
//! `FOR UPDATE`, so either both writes commit or neither does, and two
//! concurrent withdrawals cannot both pass the balance check against a stale
//! balance.

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, run_migrations, DatabaseConfig, DatabasePool};
pub use repositories::{FundRepository, RecordError, TransactionRepository};

/// Schema migrations embedded at compile time
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
