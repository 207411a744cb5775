// Quickcalc - Scientific desk calculator with persistent history
//
// This is the library crate containing the core calculator logic and data
// structures. The binary crate (main.rs) provides the console entry point.

pub mod config;
pub mod history;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use history::{HistoryEntry, HistoryStore};
pub use models::{CalcState, Operator, ScientificFunction, ThemePreference, UserConfig};
pub use services::{InputEvent, KeyEvent, MathError};
pub use state::{StateChange, StateManager};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
