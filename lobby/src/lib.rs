//! Composition root for the arcade.
//!
//! Builds the shared ledger, event bus and random source, hands them to the
//! five tables and exposes a single inbound surface ([`Arcade`]) plus the
//! line-oriented [`console::Console`] used by the `arcade` binary.

pub mod arcade;
pub mod command;
pub mod config;
pub mod console;
pub mod history;
pub mod render;
pub mod rescue;
pub mod store;

pub use arcade::{Arcade, ArcadeError, Reply};
pub use config::{Config, ConfigError, PaceConfig, ValidatedConfig};
pub use store::{FileStore, MemoryStore, Store, StoreError};
