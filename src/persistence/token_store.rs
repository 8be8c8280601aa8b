//! Token store backed by `SQLite`.
//!
//! The dashboard remembers exactly one value between sessions: the
//! last-known-good personal access token. The store is a single-row table
//! managed by Diesel migrations; `get`/`set`/`remove` are all idempotent.

use std::sync::Mutex;

use diesel::Connection;
use diesel::OptionalExtension;
use diesel::QueryableByName;
use diesel::RunQueryDsl;
use diesel::sql_query;
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;

use super::PersistenceError;

/// Persistent key-value store for the personal access token.
///
/// Synchronous by design: it is read once at start-up and written only after
/// a successful authenticated fetch, so there are no concurrent writers. The
/// trait exists so the session controller can be handed a test double instead
/// of a real database.
#[cfg_attr(test, mockall::automock)]
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the database cannot be opened or the
    /// query fails.
    fn get(&self) -> Result<Option<String>, PersistenceError>;

    /// Stores the token, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the database cannot be opened or the
    /// write fails.
    fn set(&self, token: &str) -> Result<(), PersistenceError>;

    /// Removes the stored token. Removing an absent token is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the database cannot be opened or the
    /// delete fails.
    fn remove(&self) -> Result<(), PersistenceError>;
}

/// `SQLite`-backed token store.
#[derive(Debug, Clone)]
pub struct SqliteTokenStore {
    database_url: String,
}

impl SqliteTokenStore {
    /// Create a store targeting the configured `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::BlankDatabaseUrl`] when the URL is blank.
    pub fn new(database_url: impl Into<String>) -> Result<Self, PersistenceError> {
        let database_url_string = database_url.into();
        if database_url_string.trim().is_empty() {
            return Err(PersistenceError::BlankDatabaseUrl);
        }
        Ok(Self {
            database_url: database_url_string,
        })
    }

    fn establish_connection(&self) -> Result<SqliteConnection, PersistenceError> {
        SqliteConnection::establish(&self.database_url).map_err(|error| {
            PersistenceError::ConnectionFailed {
                message: error.to_string(),
            }
        })
    }
}

fn map_query_error(error: &diesel::result::Error) -> PersistenceError {
    let message = error.to_string();
    if message.contains("no such table") {
        return PersistenceError::SchemaNotInitialised;
    }
    PersistenceError::QueryFailed { message }
}

impl TokenStore for SqliteTokenStore {
    fn get(&self) -> Result<Option<String>, PersistenceError> {
        #[derive(Debug, QueryableByName)]
        struct Row {
            #[diesel(sql_type = Text)]
            value: String,
        }

        let mut connection = self.establish_connection()?;

        let result: Option<Row> =
            sql_query("SELECT value FROM auth_token WHERE id = 0 LIMIT 1;")
                .get_result(&mut connection)
                .optional()
                .map_err(|error| map_query_error(&error))?;

        Ok(result.map(|row| row.value))
    }

    fn set(&self, token: &str) -> Result<(), PersistenceError> {
        let mut connection = self.establish_connection()?;

        sql_query(
            "INSERT INTO auth_token (id, value) VALUES (0, ?) \
             ON CONFLICT(id) DO UPDATE SET \
               value = excluded.value, \
               updated_at = CURRENT_TIMESTAMP;",
        )
        .bind::<Text, _>(token)
        .execute(&mut connection)
        .map(drop)
        .map_err(|error| map_query_error(&error))
    }

    fn remove(&self) -> Result<(), PersistenceError> {
        let mut connection = self.establish_connection()?;

        sql_query("DELETE FROM auth_token WHERE id = 0;")
            .execute(&mut connection)
            .map(drop)
            .map_err(|error| map_query_error(&error))
    }
}

/// Non-persistent token store.
///
/// Used as a fallback when no database can be opened, and as a test double.
/// Tokens survive only for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl TokenStore for InMemoryTokenStore {
    fn get(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.token.lock().map(|token| token.clone()).unwrap_or(None))
    }

    fn set(&self, token: &str) -> Result<(), PersistenceError> {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_owned());
        }
        Ok(())
    }

    fn remove(&self) -> Result<(), PersistenceError> {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryTokenStore, PersistenceError, SqliteTokenStore, TokenStore};
    use crate::persistence::migrate_database;
    use crate::telemetry::NoopTelemetrySink;

    fn migrated_store(path: &str) -> SqliteTokenStore {
        migrate_database(path, &NoopTelemetrySink).expect("migration should succeed");
        SqliteTokenStore::new(path).expect("store should build")
    }

    #[test]
    fn new_rejects_blank_database_url() {
        assert!(matches!(
            SqliteTokenStore::new("  "),
            Err(PersistenceError::BlankDatabaseUrl)
        ));
    }

    #[test]
    fn get_without_schema_reports_uninitialised() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("bare.sqlite");
        let store =
            SqliteTokenStore::new(path.to_string_lossy().into_owned()).expect("store should build");

        assert_eq!(store.get(), Err(PersistenceError::SchemaNotInitialised));
    }

    #[test]
    fn set_then_get_round_trips_and_overwrites() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("tokens.sqlite");
        let store = migrated_store(&path.to_string_lossy());

        assert_eq!(store.get(), Ok(None));

        store.set("ghp_first").expect("set should succeed");
        assert_eq!(store.get(), Ok(Some("ghp_first".to_owned())));

        store.set("ghp_second").expect("set should succeed");
        assert_eq!(store.get(), Ok(Some("ghp_second".to_owned())));
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("tokens.sqlite");
        let store = migrated_store(&path.to_string_lossy());

        store.set("ghp_example").expect("set should succeed");
        store.remove().expect("remove should succeed");
        assert_eq!(store.get(), Ok(None));

        store.remove().expect("second remove should succeed");
        assert_eq!(store.get(), Ok(None));
    }

    #[test]
    fn in_memory_store_round_trips() {
        let store = InMemoryTokenStore::default();
        assert_eq!(store.get(), Ok(None));
        store.set("ghp_example").expect("set should succeed");
        assert_eq!(store.get(), Ok(Some("ghp_example".to_owned())));
        store.remove().expect("remove should succeed");
        assert_eq!(store.get(), Ok(None));
    }
}
