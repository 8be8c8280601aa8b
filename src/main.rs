//! Ratescope CLI entrypoint for the GitHub rate-limit dashboard.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use bubbletea_rs::Program;
use ortho_config::OrthoConfig;

use ratescope::persistence::{
    InMemoryTokenStore, PersistenceError, SqliteTokenStore, TokenStore, migrate_database,
};
use ratescope::telemetry::StderrJsonlTelemetrySink;
use ratescope::tui::{
    DashboardApp, set_initial_terminal_size, set_session_context, set_telemetry_sink,
};
use ratescope::{HttpRateLimitGateway, QuotaError, RatescopeConfig};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), QuotaError> {
    let config = load_config()?;
    let database_url = config.resolve_database_url();

    if config.migrate_db {
        return run_migrations(&database_url);
    }
    if config.logout {
        return remove_stored_token(&database_url);
    }

    let store = open_token_store(&database_url);
    let gateway = HttpRateLimitGateway::new(&config.resolve_api_base())?;

    // Prefer an explicitly configured token; fall back to the remembered one.
    let initial_token = config
        .resolve_token()
        .or_else(|| store.get().ok().flatten());

    if let Ok((width, height)) = crossterm::terminal::size() {
        let _ = set_initial_terminal_size(width, height);
    }
    let _ = set_session_context(Arc::new(gateway), store, initial_token);
    if config.telemetry {
        let _ = set_telemetry_sink(Arc::new(StderrJsonlTelemetrySink));
    }

    run_tui().await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`QuotaError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<RatescopeConfig, QuotaError> {
    RatescopeConfig::load().map_err(|error| QuotaError::Configuration {
        message: error.to_string(),
    })
}

/// Applies pending migrations and reports the resulting schema version.
fn run_migrations(database_url: &str) -> Result<(), QuotaError> {
    let telemetry = StderrJsonlTelemetrySink;
    let version = migrate_database(database_url, &telemetry).map_err(storage_error)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "Database migrated to schema version {}", version.as_str()).map_err(|error| {
        QuotaError::Io {
            message: error.to_string(),
        }
    })
}

/// Removes the remembered token, treating a missing schema as already done.
fn remove_stored_token(database_url: &str) -> Result<(), QuotaError> {
    let store = SqliteTokenStore::new(database_url).map_err(storage_error)?;
    match store.remove() {
        Ok(()) | Err(PersistenceError::SchemaNotInitialised) => {}
        Err(error) => return Err(storage_error(error)),
    }

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "Stored token removed").map_err(|error| QuotaError::Io {
        message: error.to_string(),
    })
}

/// Opens the sqlite token store, falling back to in-memory storage.
///
/// The dashboard stays usable without a database; the token simply is not
/// remembered across sessions.
fn open_token_store(database_url: &str) -> Arc<dyn TokenStore> {
    match migrate_database(database_url, &ratescope::telemetry::NoopTelemetrySink)
        .and_then(|_| SqliteTokenStore::new(database_url))
    {
        Ok(store) => Arc::new(store),
        Err(error) => {
            tracing::warn!("token persistence unavailable: {error}");
            Arc::new(InMemoryTokenStore::default())
        }
    }
}

fn storage_error(error: PersistenceError) -> QuotaError {
    QuotaError::Storage {
        message: error.to_string(),
    }
}

/// Runs the bubbletea-rs program with the `DashboardApp` model.
async fn run_tui() -> Result<(), QuotaError> {
    let program = Program::<DashboardApp>::builder()
        .alt_screen(true)
        .build()
        .map_err(tui_error)?;

    program.run().await.map_err(tui_error)?;

    io::stdout().flush().ok();
    Ok(())
}

fn tui_error(error: bubbletea_rs::Error) -> QuotaError {
    QuotaError::Configuration {
        message: format!("TUI error: {error}"),
    }
}
