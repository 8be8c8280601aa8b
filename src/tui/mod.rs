//! Terminal User Interface for the GitHub rate-limit dashboard.
//!
//! This module provides an interactive TUI for entering a personal access
//! token and browsing per-resource quota cards using the bubbletea-rs
//! framework.
//!
//! # Architecture
//!
//! The TUI follows the Model-View-Update (MVU) pattern:
//!
//! - **Model**: Application state in [`app::DashboardApp`]
//! - **View**: Rendering logic in the app and card components
//! - **Update**: Message-driven state transitions in `update()`
//!
//! # Modules
//!
//! - [`app`]: Main application model and entry point
//! - [`messages`]: Message types for the update loop
//! - [`state`]: Token-entry field state
//! - [`components`]: Reusable UI components
//! - [`input`]: Key-to-message mapping for input handling
//!
//! # Initial Wiring
//!
//! Because bubbletea-rs's `Model` trait requires `init()` to be a static
//! function, the gateway, token store, and startup token are parked in
//! module-level storage. Call [`set_session_context`] before starting the
//! program, and `DashboardApp::init()` will retrieve them.

pub mod app;
pub mod components;
pub mod input;
pub mod messages;
pub mod state;
mod storage;

pub use app::DashboardApp;
pub use storage::{set_initial_terminal_size, set_session_context, set_telemetry_sink};
