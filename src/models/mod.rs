//! Data models for the Quickcalc application.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`CalcState`]: the calculator's state record (operand entry, pending operation, panels, theme)
//! - [`Operator`] / [`ScientificFunction`]: the fixed operation tables the engine evaluates
//! - [`UserConfig`]: theme and display timing preferences loaded from `Quickcalc Config.yaml`
//! - [`ThemePreference`]: the persisted light/dark choice
//!
//! # Architecture Note
//!
//! The models are designed to be:
//! - **Serializable**: config structs derive `Serialize`/`Deserialize` for YAML persistence
//! - **Cloneable**: `CalcState` is wrapped in `Arc<RwLock<>>` by [`StateManager`](crate::state::StateManager)
//! - **Mediated**: state mutations go through the manager's transition methods so change events stay consistent

pub mod calc_state;
pub mod config;

pub use calc_state::{CalcState, Operator, ScientificFunction};
pub use config::{CalcSettings, ThemePreference, UserConfig};
