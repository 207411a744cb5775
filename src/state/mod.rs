// State management module
//
// This module provides the StateManager which wraps CalcState with thread-safe
// access using Arc<RwLock<T>> and emits change events for display updates.
// The transition methods below are the calculator's state machine: every
// input event resolves to exactly one of them, runs to completion, and
// reports what changed.

use crate::history::HistoryEntry;
use crate::models::{CalcState, Operator, ScientificFunction, ThemePreference, UserConfig};
use crate::services::arithmetic::{self, MathError};
use crate::services::format;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

/// Change events emitted when state is modified
///
/// These events are the display-update commands of the input dispatch: the
/// frontend re-renders from them without polling the state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateChange {
    /// The calculation line or result line changed
    DisplayUpdated {
        calculation: String,
        result: String,
    },

    /// A calculation completed and produced a history entry
    HistoryRecorded {
        entry: HistoryEntry,
    },

    /// The history list was bulk-cleared
    HistoryCleared,

    /// The theme preference flipped
    ThemeChanged {
        theme: ThemePreference,
    },

    /// The scientific panel was shown or hidden
    ScientificPanelToggled {
        visible: bool,
    },

    /// The history panel was shown or hidden
    HistoryPanelToggled {
        visible: bool,
    },

    /// The transient shortcuts overlay was shown or hidden
    ShortcutsToggled {
        visible: bool,
    },

    /// A calculation failed; the display now shows the error indicator
    ErrorRaised {
        kind: MathError,
    },

    /// State has been reset to initial values
    StateReset,
}

/// Thread-safe state manager with event emission
///
/// This is the central state management component that:
/// - Provides thread-safe access to [`CalcState`] via `Arc<RwLock<T>>`
/// - Runs the input/calculation state machine transitions
/// - Detects state changes and emits [`StateChange`] events
/// - Supports subscribing to state changes via tokio broadcast channels
///
/// # Usage
///
/// Always use `StateManager` instead of mutating [`CalcState`] directly:
/// - [`read()`](Self::read) for reading state without cloning
/// - [`update()`](Self::update) for mutations with automatic event emission
/// - [`subscribe()`](Self::subscribe) for listening to state changes
///
/// The fallible transitions ([`calculate()`](Self::calculate),
/// [`apply_function()`](Self::apply_function),
/// [`input_operation()`](Self::input_operation)) leave the state untouched on
/// error; the caller shows the error indicator and schedules the reset.
///
/// # Related Types
///
/// - [`crate::models::CalcState`]: The underlying state structure
/// - [`StateChange`]: Event types emitted on state mutations
/// - [`crate::ui::CalcController`]: Primary consumer of state events
pub struct StateManager {
    /// The calculator state protected by RwLock for thread-safe access
    state: Arc<RwLock<CalcState>>,

    /// Broadcast channel for emitting state change events
    /// Multiple subscribers can listen for state changes
    state_tx: broadcast::Sender<StateChange>,
}

impl StateManager {
    /// Create a new StateManager with default state
    ///
    /// # Returns
    /// A new StateManager with a broadcast channel buffer of 100 events
    pub fn new() -> Self {
        let (state_tx, _) = broadcast::channel(100);
        Self {
            state: Arc::new(RwLock::new(CalcState::default())),
            state_tx,
        }
    }

    /// Get a read-only snapshot of the current state
    pub fn snapshot(&self) -> CalcState {
        self.state.read().unwrap().clone()
    }

    /// Execute a function with read access to the state
    ///
    /// # Example
    /// ```ignore
    /// let pending = state_manager.read(|state| state.has_pending_operation());
    /// ```
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CalcState) -> R,
    {
        let state = self.state.read().unwrap();
        f(&state)
    }

    /// Update the state and emit change events
    ///
    /// This is the primary way to modify state. It:
    /// 1. Captures the old state
    /// 2. Applies the update function
    /// 3. Detects what changed
    /// 4. Emits appropriate events
    ///
    /// # Returns
    /// A vector of StateChange events that were emitted
    pub fn update<F>(&self, update_fn: F) -> Vec<StateChange>
    where
        F: FnOnce(&mut CalcState),
    {
        let mut state = self.state.write().unwrap();
        let old_state = state.clone();

        // Apply the update
        update_fn(&mut state);

        // Detect changes and emit events
        let changes = self.detect_changes(&old_state, &state);

        for change in &changes {
            // Ignore send errors - it's OK if no one is listening
            let _ = self.state_tx.send(change.clone());
        }

        changes
    }

    /// Subscribe to state change events
    ///
    /// Returns a receiver that will get notified of all future state changes.
    /// Multiple subscribers can listen simultaneously.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.state_tx.subscribe()
    }

    /// The current display lines: (calculation, result).
    pub fn display(&self) -> (String, String) {
        self.read(display_lines)
    }

    /// Detect what changed between two states and generate events
    fn detect_changes(&self, old: &CalcState, new: &CalcState) -> Vec<StateChange> {
        let mut changes = Vec::new();

        let old_display = display_lines(old);
        let new_display = display_lines(new);
        if old_display != new_display {
            changes.push(StateChange::DisplayUpdated {
                calculation: new_display.0,
                result: new_display.1,
            });
        }

        if old.theme != new.theme {
            changes.push(StateChange::ThemeChanged { theme: new.theme });
        }

        if old.scientific_visible != new.scientific_visible {
            changes.push(StateChange::ScientificPanelToggled {
                visible: new.scientific_visible,
            });
        }

        if old.history_visible != new.history_visible {
            changes.push(StateChange::HistoryPanelToggled {
                visible: new.history_visible,
            });
        }

        if old.shortcuts_visible != new.shortcuts_visible {
            changes.push(StateChange::ShortcutsToggled {
                visible: new.shortcuts_visible,
            });
        }

        changes
    }

    // Transition methods - one per input event

    /// Append a digit to the current entry
    pub fn input_digit(&self, digit: char) -> Vec<StateChange> {
        self.update(|state| state.input_digit(digit))
    }

    /// Append a decimal point to the current entry
    pub fn input_decimal(&self) -> Vec<StateChange> {
        self.update(|state| state.input_decimal())
    }

    /// Install a constant (pi, e) as the current entry
    pub fn input_constant(&self, value: f64) -> Vec<StateChange> {
        self.update(|state| state.input_constant(value))
    }

    /// Select a binary operation
    ///
    /// No-op while the current entry is empty. When an operation is already
    /// pending and the screen is not awaiting its operand, the pending
    /// calculation runs first (chaining: `3 + 4 *` computes 7 before the
    /// multiply starts). If that implicit calculation fails, the error
    /// propagates and no new operation is recorded.
    pub fn input_operation(&self, op: Operator) -> Result<Vec<StateChange>, MathError> {
        if self.read(|state| state.current_input.is_empty()) {
            return Ok(Vec::new());
        }

        let mut changes = Vec::new();

        let needs_chain =
            self.read(|state| !state.previous_input.is_empty() && !state.should_reset_screen);
        if needs_chain {
            changes.extend(self.calculate()?);
        }

        changes.extend(self.update(|state| {
            state.previous_input = state.current_input.clone();
            state.operation = Some(op);
            state.should_reset_screen = true;
        }));

        Ok(changes)
    }

    /// Complete the pending binary operation
    ///
    /// No-op when there is no pending operation, when the screen is awaiting
    /// a fresh operand, or when either operand string is empty. On success
    /// the raw result string becomes the current entry and a
    /// [`StateChange::HistoryRecorded`] event carries the formatted entry.
    pub fn calculate(&self) -> Result<Vec<StateChange>, MathError> {
        let pending = self.read(|state| {
            if state.should_reset_screen
                || state.previous_input.is_empty()
                || state.current_input.is_empty()
            {
                return None;
            }
            state
                .operation
                .map(|op| (op, state.previous_input.clone(), state.current_input.clone()))
        });

        let Some((op, prev_text, curr_text)) = pending else {
            return Ok(Vec::new());
        };

        let prev = parse_operand(&prev_text);
        let curr = parse_operand(&curr_text);
        let result = arithmetic::apply_operation(op, prev, curr)?;

        let entry = HistoryEntry::new(
            format!("{} {} {}", prev, op.symbol(), curr),
            format::format_value(result),
        );

        let mut changes = self.update(|state| {
            state.current_input = result.to_string();
            state.operation = None;
            state.previous_input.clear();
            state.should_reset_screen = true;
        });

        let recorded = StateChange::HistoryRecorded { entry };
        let _ = self.state_tx.send(recorded.clone());
        changes.push(recorded);

        Ok(changes)
    }

    /// Apply a unary scientific function to the current entry
    ///
    /// An empty entry is treated as 0. On success the raw result string
    /// becomes the current entry and a [`StateChange::HistoryRecorded`]
    /// event carries the formatted entry.
    pub fn apply_function(
        &self,
        function: ScientificFunction,
    ) -> Result<Vec<StateChange>, MathError> {
        let text = self.read(|state| state.current_input.clone());
        let x = if text.is_empty() {
            0.0
        } else {
            parse_operand(&text)
        };

        let result = arithmetic::apply_function(function, x)?;

        let entry = HistoryEntry::new(
            format!("{}({})", function.name(), x),
            format::format_value(result),
        );

        let mut changes = self.update(|state| {
            state.current_input = result.to_string();
            state.should_reset_screen = true;
        });

        let recorded = StateChange::HistoryRecorded { entry };
        let _ = self.state_tx.send(recorded.clone());
        changes.push(recorded);

        Ok(changes)
    }

    /// Remove the last character of the current entry
    pub fn backspace(&self) -> Vec<StateChange> {
        self.update(|state| state.backspace())
    }

    /// Empty the current entry only
    pub fn clear_entry(&self) -> Vec<StateChange> {
        self.update(|state| state.clear_entry())
    }

    /// Reset the expression state to initial values
    pub fn clear_all(&self) -> Vec<StateChange> {
        let mut changes = self.update(|state| state.clear_all());

        // Emit a reset event
        let reset_event = StateChange::StateReset;
        let _ = self.state_tx.send(reset_event.clone());
        changes.push(reset_event);

        changes
    }

    /// Show the generic error indicator until the next reset
    pub fn show_error(&self, kind: MathError) -> Vec<StateChange> {
        let mut changes = self.update(|state| state.showing_error = true);

        let error_event = StateChange::ErrorRaised { kind };
        let _ = self.state_tx.send(error_event.clone());
        changes.push(error_event);

        changes
    }

    /// Flip the theme preference
    pub fn toggle_theme(&self) -> Vec<StateChange> {
        self.update(|state| state.theme = state.theme.toggled())
    }

    /// Show or hide the scientific function panel
    pub fn toggle_scientific(&self) -> Vec<StateChange> {
        self.update(|state| state.scientific_visible = !state.scientific_visible)
    }

    /// Show or hide the history panel
    pub fn toggle_history_panel(&self) -> Vec<StateChange> {
        self.update(|state| state.history_visible = !state.history_visible)
    }

    /// Show or hide the transient shortcuts overlay
    pub fn toggle_shortcuts(&self) -> Vec<StateChange> {
        self.update(|state| state.shortcuts_visible = !state.shortcuts_visible)
    }

    /// Hide the shortcuts overlay (used by the auto-dismiss timer)
    pub fn dismiss_shortcuts(&self) -> Vec<StateChange> {
        self.update(|state| state.shortcuts_visible = false)
    }

    /// Install a past result as the current entry, hiding the history panel
    pub fn use_history_result(&self, result: &str) -> Vec<StateChange> {
        self.update(|state| {
            // Stored results are display-formatted; strip the grouping
            state.current_input = result.replace(',', "");
            state.should_reset_screen = true;
            state.history_visible = false;
        })
    }

    /// Announce that the history list was bulk-cleared
    pub fn note_history_cleared(&self) -> Vec<StateChange> {
        let event = StateChange::HistoryCleared;
        let _ = self.state_tx.send(event.clone());
        vec![event]
    }

    /// Load preferences from the user configuration
    ///
    /// # Arguments
    /// * `user_config` - The loaded user configuration
    pub fn load_from_user_config(&self, user_config: &UserConfig) -> Vec<StateChange> {
        self.update(|state| {
            state.theme = user_config.settings.theme;

            tracing::info!(
                "Loaded user config: theme={}, error_reset_delay={}ms, overlay_dismiss_delay={}ms",
                state.theme.as_str(),
                user_config.settings.error_reset_delay_ms,
                user_config.settings.overlay_dismiss_delay_ms
            );
        })
    }

    /// Get an Arc reference to the state for use in worker tasks
    pub fn state_arc(&self) -> Arc<RwLock<CalcState>> {
        Arc::clone(&self.state)
    }
}

/// Compute the two display lines from a state: (calculation, result).
fn display_lines(state: &CalcState) -> (String, String) {
    let calculation = state.expression_prefix();
    let result = if state.showing_error {
        "Error".to_string()
    } else {
        format::format_display(&state.current_input)
    };
    (calculation, result)
}

fn parse_operand(text: &str) -> f64 {
    // Operand strings come from digit entry and result strings, so this only
    // falls to NaN on a bug upstream; NaN then fails as a domain error.
    text.parse().unwrap_or(f64::NAN)
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

// Make StateManager cloneable for sharing across tasks
impl Clone for StateManager {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            state_tx: self.state_tx.clone(),
        }
    }
}
