//! Services module - Pure calculator logic with no UI or storage dependencies.
//!
//! This module contains the evaluation and translation layers the state
//! machine drives. The services are **framework-agnostic**: no console code,
//! no persistence, only functions from inputs to outputs, which keeps them
//! directly testable.
//!
//! # Components
//!
//! - [`arithmetic`]: evaluates the binary operator and scientific function
//!   tables over parsed `f64` operands, with domain-error detection:
//!   - division by a zero divisor is rejected before it can produce infinity
//!   - factorial enforces the non-negative-integer domain and the 170 cap
//!   - any NaN or non-finite result becomes [`MathError::Domain`]
//!
//! - [`format`]: renders raw numeric strings for the display and history:
//!   exponential fallback outside `1e-6 ..= 1e15`, comma grouping from a
//!   thousand up, shortest plain decimal otherwise
//!
//! - [`keymap`]: translates raw [`KeyEvent`]s into typed [`InputEvent`]s per
//!   the keyboard contract, and exposes the ordered shortcut-reference table
//!   for the overlay
//!
//! # Usage Example
//!
//! ```ignore
//! use quickcalc::models::Operator;
//! use quickcalc::services::{arithmetic, format};
//!
//! let result = arithmetic::apply_operation(Operator::Divide, 22.0, 7.0)?;
//! let display = format::format_value(result);
//! ```

pub mod arithmetic;
pub mod format;
pub mod keymap;

pub use arithmetic::MathError;
pub use keymap::{InputEvent, KeyEvent};
