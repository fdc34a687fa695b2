//! Storage collaborator interface and an in-memory implementation.
//!
//! # Design
//! A `StackStore` hands out one `StackConnection` per request; the handler
//! drops it before the response is returned. Entries are ordered by a
//! storage-assigned id, and the highest id is the top of the stack.
//!
//! `pop` must remove and return the top entry as a single atomic step. The
//! server handles one request at a time, so nothing exercises this yet, but
//! a concurrent accept loop would depend on it.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::StoreError;

/// Source of per-request storage connections.
#[allow(async_fn_in_trait)]
pub trait StackStore {
    type Conn: StackConnection;

    async fn connect(&self) -> Result<Self::Conn, StoreError>;
}

/// One storage session. All operations block the request until done.
#[allow(async_fn_in_trait)]
pub trait StackConnection {
    /// Create the backing table if it does not exist. Idempotent.
    async fn ensure_table(&mut self) -> Result<(), StoreError>;

    async fn push(&mut self, value: i32) -> Result<(), StoreError>;

    /// Remove and return the top entry, or `None` when the stack is empty.
    async fn pop(&mut self) -> Result<Option<i32>, StoreError>;

    /// All values, most recently pushed first.
    async fn list(&mut self) -> Result<Vec<i32>, StoreError>;
}

#[derive(Debug, Default)]
struct Entries {
    next_id: u64,
    // Ascending by id.
    rows: Vec<(u64, i32)>,
}

/// In-memory `StackStore`. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<Entries>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StackStore for MemoryStore {
    type Conn = MemoryConnection;

    async fn connect(&self) -> Result<MemoryConnection, StoreError> {
        Ok(MemoryConnection {
            entries: Arc::clone(&self.entries),
        })
    }
}

#[derive(Debug)]
pub struct MemoryConnection {
    entries: Arc<Mutex<Entries>>,
}

impl MemoryConnection {
    fn lock(&self) -> MutexGuard<'_, Entries> {
        // Every mutation below leaves `Entries` consistent, so a poisoned
        // lock still holds valid data.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StackConnection for MemoryConnection {
    async fn ensure_table(&mut self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn push(&mut self, value: i32) -> Result<(), StoreError> {
        let mut entries = self.lock();
        entries.next_id += 1;
        let id = entries.next_id;
        entries.rows.push((id, value));
        Ok(())
    }

    async fn pop(&mut self) -> Result<Option<i32>, StoreError> {
        Ok(self.lock().rows.pop().map(|(_, value)| value))
    }

    async fn list(&mut self) -> Result<Vec<i32>, StoreError> {
        Ok(self.lock().rows.iter().rev().map(|&(_, value)| value).collect())
    }
}
