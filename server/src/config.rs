//! Process configuration, parsed once at startup.
//!
//! Every option can come from a flag or from its environment variable. The
//! resulting `Config` is passed by reference into the store and the accept
//! loop; nothing re-reads the environment per request.

use std::fmt;

use anyhow::bail;
use clap::{Parser, ValueEnum};

pub const DEFAULT_PORT: u16 = 5050;

/// Storage backend behind the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// PostgreSQL, using the `DB_*` settings.
    Postgres,
    /// Process-local stack, lost on exit.
    Memory,
}

#[derive(Parser, Debug, Clone)]
#[command(version, about = "LIFO integer stack over HTTP", long_about = None)]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0")]
    pub bind: String,

    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(long, env = "STACK_STORE", value_enum, default_value_t = StoreKind::Postgres)]
    pub store: StoreKind,

    #[arg(long, env = "DB_HOST")]
    pub db_host: Option<String>,

    #[arg(long, env = "DB_NAME")]
    pub db_name: Option<String>,

    #[arg(long, env = "DB_USER")]
    pub db_user: Option<String>,

    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,
}

impl Config {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    /// Database settings, failing with the names of any that are missing.
    pub fn database(&self) -> anyhow::Result<DatabaseConfig> {
        let settings = [
            ("DB_HOST", &self.db_host),
            ("DB_NAME", &self.db_name),
            ("DB_USER", &self.db_user),
            ("DB_PASSWORD", &self.db_password),
        ];
        let missing: Vec<&str> = settings
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            bail!("missing database settings: {}", missing.join(", "));
        }

        Ok(DatabaseConfig {
            host: self.db_host.clone().unwrap_or_default(),
            name: self.db_name.clone().unwrap_or_default(),
            user: self.db_user.clone().unwrap_or_default(),
            password: self.db_password.clone().unwrap_or_default(),
        })
    }
}

/// Connection parameters for the PostgreSQL store.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}
