//! Database test harness
//!
//! Starts a disposable PostgreSQL container, connects a pool, and applies the
//! ledger schema. Tests that use this harness need Docker, so they carry
//! `#[ignore]` and are run explicitly with `cargo test -- --ignored`.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use testcontainers::{
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

const POSTGRES_IMAGE: &str = "postgres";
const POSTGRES_TAG: &str = "16-alpine";
const POSTGRES_USER: &str = "ledger_test";
const POSTGRES_PASSWORD: &str = "ledger_test";
const POSTGRES_DB: &str = "quota_ledger_test";

/// A PostgreSQL container with the ledger schema applied
pub struct TestDatabase {
    _container: ContainerAsync<GenericImage>,
    pub pool: PgPool,
    pub url: String,
}

impl TestDatabase {
    /// Starts a fresh container and migrates the schema
    ///
    /// # Errors
    ///
    /// Returns an error if the container fails to start, the pool cannot
    /// connect, or migrations fail to apply
    pub async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let container = GenericImage::new(POSTGRES_IMAGE, POSTGRES_TAG)
            .with_exposed_port(5432.tcp())
            .with_wait_for(WaitFor::message_on_stderr(
                "database system is ready to accept connections",
            ))
            .with_env_var("POSTGRES_USER", POSTGRES_USER)
            .with_env_var("POSTGRES_PASSWORD", POSTGRES_PASSWORD)
            .with_env_var("POSTGRES_DB", POSTGRES_DB)
            .start()
            .await?;

        let host = container.get_host().await?.to_string();
        let port = container.get_host_port_ipv4(5432).await?;
        let url = format!(
            "postgres://{}:{}@{}:{}/{}",
            POSTGRES_USER, POSTGRES_PASSWORD, host, port, POSTGRES_DB
        );

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&url)
            .await?;

        infra_db::MIGRATOR.run(&pool).await?;

        Ok(Self {
            _container: container,
            pool,
            url,
        })
    }
}
