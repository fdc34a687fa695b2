//! Network host for the stack service.
//!
//! # Overview
//! Owns everything `stack-core` leaves to its caller: configuration, the
//! PostgreSQL storage collaborator, and the accept loop that moves bytes
//! between sockets and the core handler.
//!
//! # Design
//! Connections are served strictly one at a time. Each one is read until the
//! request is framed, answered, and closed before the next `accept`. A slow
//! client therefore delays every client behind it.

pub mod config;
pub mod postgres;
pub mod serve;

pub use config::{Config, DatabaseConfig, StoreKind};
pub use postgres::PgStore;
pub use serve::{read_request, run, write_response};
