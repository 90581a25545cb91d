//! Postgres-backed store writer.
//!
//! Each insert opens its own connection, so a write never borrows anything
//! from the request that produced the quotation. The `quotations` table is
//! expected to exist:
//!
//! ```sql
//! CREATE TABLE quotations (
//!     id        BIGSERIAL PRIMARY KEY,
//!     code_out  TEXT   NOT NULL,
//!     code_in   TEXT   NOT NULL,
//!     bid       REAL   NOT NULL,
//!     timestamp BIGINT NOT NULL
//! );
//! ```

use async_trait::async_trait;
use tokio_postgres::NoTls;

use crate::quotation::Quotation;
use crate::resilience::Deadline;
use crate::store::{PersistError, QuoteSink};

const INSERT_QUOTATION: &str =
    "INSERT INTO quotations (code_out, code_in, bid, timestamp) VALUES ($1, $2, $3, $4)";

/// Store writer that inserts one row per quotation.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    url: String,
}

impl PostgresStore {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    async fn write(&self, quotation: &Quotation) -> Result<(), PersistError> {
        let (client, connection) = tokio_postgres::connect(&self.url, NoTls).await?;

        // The connection task ends on its own once `client` is dropped.
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::warn!(error = %e, "Store connection error");
            }
        });

        let code_out = quotation.base().as_str();
        let code_in = quotation.quote().as_str();
        let bid = quotation.bid();
        let timestamp = quotation.observed_epoch_secs();

        client
            .execute(INSERT_QUOTATION, &[&code_out, &code_in, &bid, &timestamp])
            .await?;
        Ok(())
    }
}

#[async_trait]
impl QuoteSink for PostgresStore {
    async fn insert(&self, quotation: &Quotation, deadline: Deadline) -> Result<(), PersistError> {
        match deadline.run(self.write(quotation)).await {
            Ok(result) => result,
            Err(_) => Err(PersistError::DeadlineExceeded),
        }
    }
}
