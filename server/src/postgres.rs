//! PostgreSQL storage collaborator.
//!
//! Each `connect` opens a fresh session; there is no pool. The connection
//! driver runs on its own task and exits once the `Client` is dropped.

use stack_core::{StackConnection, StackStore, StoreError, StoreOp};
use tokio_postgres::{Client, NoTls};
use tracing::warn;

use crate::config::DatabaseConfig;

const CREATE_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS stack (id SERIAL PRIMARY KEY, value INT NOT NULL)";
const INSERT: &str = "INSERT INTO stack (value) VALUES ($1)";
// One statement, so selecting the top row and deleting it cannot interleave
// with another caller.
const POP: &str =
    "DELETE FROM stack WHERE id = (SELECT id FROM stack ORDER BY id DESC LIMIT 1) RETURNING value";
const LIST: &str = "SELECT value FROM stack ORDER BY id DESC";

#[derive(Debug, Clone)]
pub struct PgStore {
    config: tokio_postgres::Config,
}

impl PgStore {
    pub fn new(database: &DatabaseConfig) -> Self {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&database.host)
            .dbname(&database.name)
            .user(&database.user)
            .password(&database.password);
        Self { config }
    }
}

impl StackStore for PgStore {
    type Conn = PgConnection;

    async fn connect(&self) -> Result<PgConnection, StoreError> {
        let (client, connection) = self
            .config
            .connect(NoTls)
            .await
            .map_err(|err| StoreError::new(StoreOp::Connect, err))?;
        tokio::spawn(async move {
            if let Err(err) = connection.await {
                warn!(%err, "postgres connection closed with error");
            }
        });
        Ok(PgConnection { client })
    }
}

pub struct PgConnection {
    client: Client,
}

impl StackConnection for PgConnection {
    async fn ensure_table(&mut self) -> Result<(), StoreError> {
        self.client
            .batch_execute(CREATE_TABLE)
            .await
            .map_err(|err| StoreError::new(StoreOp::Bootstrap, err))
    }

    async fn push(&mut self, value: i32) -> Result<(), StoreError> {
        self.client
            .execute(INSERT, &[&value])
            .await
            .map(|_| ())
            .map_err(|err| StoreError::new(StoreOp::Insert, err))
    }

    async fn pop(&mut self) -> Result<Option<i32>, StoreError> {
        let row = self
            .client
            .query_opt(POP, &[])
            .await
            .map_err(|err| StoreError::new(StoreOp::Delete, err))?;
        row.map(|row| row.try_get::<_, i32>(0))
            .transpose()
            .map_err(|err| StoreError::new(StoreOp::Delete, err))
    }

    async fn list(&mut self) -> Result<Vec<i32>, StoreError> {
        let rows = self
            .client
            .query(LIST, &[])
            .await
            .map_err(|err| StoreError::new(StoreOp::Select, err))?;
        rows.iter()
            .map(|row| row.try_get::<_, i32>(0))
            .collect::<Result<Vec<i32>, _>>()
            .map_err(|err| StoreError::new(StoreOp::Select, err))
    }
}
