//! Test Utilities Crate
//!
//! Shared test infrastructure for the quota ledger test suite.
//!
//! # Modules
//!
//! - `builders`: builder patterns for domain entities in known states
//! - `assertions`: decimal assertion helpers with rounding tolerance
//! - `database`: a testcontainers-backed PostgreSQL harness with the schema
//!   applied (integration tests using it are `#[ignore]`d so the suite runs
//!   without Docker)

pub mod assertions;
pub mod builders;
pub mod database;

pub use assertions::*;
pub use builders::*;
pub use database::*;
