//! # embers-firebird — Firebird backend for the Embers data layer
//!
//! This crate provides the Firebird-specific pieces of Embers. It depends
//! on [`embers-data`] for the descriptor registry, clause builder, mapper,
//! and repository, and adds the dialect strategy plus connection
//! configuration needed to point all of that at a real Firebird server.
//!
//! # What's in this crate
//!
//! | Type | Description |
//! |------|-------------|
//! | [`FirebirdDialect`] | `Dialect` strategy: `?` placeholders, `ROWS n` / `OFFSET m` row window, `GEN_ID(GEN_<table>_ID, step)` sequence reads |
//! | [`ConnectionConfig`] | Server/credentials/pool settings, serde-deserializable or loaded from `EMBERS_DB_*` env vars |
//!
//! # Quick start
//!
//! ```ignore
//! use embers_data::{DescriptorRegistry, SqlRepository};
//! use embers_firebird::{ConnectionConfig, FirebirdDialect};
//!
//! let config = ConnectionConfig::from_env()?;
//! let provider = MyPool::connect(&config);   // your ConnectionProvider impl
//! let registry = Arc::new(DescriptorRegistry::new());
//! let repo = SqlRepository::<Person, _>::new(provider, registry, Arc::new(FirebirdDialect));
//! ```
//!
//! # Identity generation
//!
//! `save` on an entity without an identity value reads
//! `GEN_ID(GEN_<table>_ID, 1)` before inserting, so the new key is known to
//! the caller's round trip alone — two concurrent inserts can never observe
//! the same value. The generator must exist; Embers does not create it.

pub mod config;
pub mod dialect;

pub use config::{ConfigError, ConnectionConfig};
pub use dialect::FirebirdDialect;

/// Re-exports of the most commonly used types from both `embers-data` and
/// this crate.
pub mod prelude {
    pub use crate::{ConnectionConfig, FirebirdDialect};
    pub use embers_data::prelude::*;
}
