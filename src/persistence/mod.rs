//! Local persistence for the remembered token.
//!
//! Ratescope uses a local `SQLite` database to remember the last token that
//! successfully authenticated. The schema is managed with Diesel migrations
//! so the database can be created and upgraded consistently across machines.

mod error;
mod migrator;
mod token_store;

pub use error::PersistenceError;
pub use migrator::{INITIAL_SCHEMA_VERSION, SchemaVersion, migrate_database};
pub use token_store::{InMemoryTokenStore, SqliteTokenStore, TokenStore};

#[cfg(test)]
pub use token_store::MockTokenStore;
