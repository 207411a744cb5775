// CalcController - Input dispatch and session orchestration
//
// The controller is the single place where input events meet the rest of the
// system. It:
// - resolves every InputEvent to one StateManager transition
// - appends and persists history entries as calculations complete
// - saves the theme preference on every toggle
// - schedules the two deferred timers (error auto-reset, shortcuts overlay
//   auto-dismiss) on the tokio runtime, replacing rather than stacking
// - records session metrics
//
// All state transitions run synchronously inside dispatch(); only the two
// timers run later, and each of them funnels back through the StateManager.

use crate::config::ConfigManager;
use crate::history::{HistoryEntry, HistoryStore};
use crate::metrics::Metrics;
use crate::models::{CalcSettings, CalcState, UserConfig};
use crate::services::keymap::InputEvent;
use crate::state::{StateChange, StateManager};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Wires input events to state transitions, history persistence and timers.
///
/// # Related Types
///
/// - [`crate::state::StateManager`]: runs the actual transitions
/// - [`crate::history::HistoryStore`]: owns the persisted calculation log
/// - [`crate::ui::console`]: feeds the controller from the terminal
pub struct CalcController {
    state: Arc<StateManager>,
    history: Mutex<HistoryStore>,
    config_manager: ConfigManager,
    settings: Mutex<CalcSettings>,
    metrics: Arc<Metrics>,
    runtime: tokio::runtime::Handle,

    // Deferred display timers; scheduling a new one aborts its predecessor
    error_timer: Mutex<Option<JoinHandle<()>>>,
    overlay_timer: Mutex<Option<JoinHandle<()>>>,
}

impl CalcController {
    /// Create a controller over an already-loaded state manager and history.
    pub fn new(
        state: Arc<StateManager>,
        history: HistoryStore,
        settings: CalcSettings,
        config_manager: ConfigManager,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        Self {
            state,
            history: Mutex::new(history),
            config_manager,
            settings: Mutex::new(settings),
            metrics: Arc::new(Metrics::new()),
            runtime,
            error_timer: Mutex::new(None),
            overlay_timer: Mutex::new(None),
        }
    }

    /// Dispatch one input event through the state machine.
    ///
    /// Runs to completion before returning; the returned changes are the
    /// display-update commands this event produced. A math error is absorbed
    /// here: the display switches to the error indicator and a full reset is
    /// scheduled after the configured delay.
    pub fn dispatch(&self, event: InputEvent) -> Vec<StateChange> {
        self.metrics.record_key_dispatched();
        tracing::debug!("Dispatching input event: {:?}", event);

        let outcome = match event {
            InputEvent::Digit(digit) => Ok(self.state.input_digit(digit)),
            InputEvent::Decimal => Ok(self.state.input_decimal()),
            InputEvent::Constant(value) => Ok(self.state.input_constant(value)),
            InputEvent::Operation(op) => self.state.input_operation(op).map(|changes| {
                if has_history(&changes) {
                    self.metrics.record_calculation();
                }
                changes
            }),
            InputEvent::Calculate => self.state.calculate().map(|changes| {
                if has_history(&changes) {
                    self.metrics.record_calculation();
                }
                changes
            }),
            InputEvent::Function(function) => {
                self.state.apply_function(function).map(|changes| {
                    self.metrics.record_function_applied();
                    changes
                })
            }
            InputEvent::ClearEntry => Ok(self.state.clear_entry()),
            InputEvent::ClearAll => Ok(self.state.clear_all()),
            InputEvent::Backspace => Ok(self.state.backspace()),
            InputEvent::ToggleScientific => Ok(self.state.toggle_scientific()),
            InputEvent::ToggleTheme => Ok(self.toggle_theme()),
            InputEvent::ToggleHistory => Ok(self.state.toggle_history_panel()),
            InputEvent::ToggleShortcuts => Ok(self.toggle_shortcuts()),
            InputEvent::ClearHistory => Ok(self.clear_history()),
            InputEvent::UseHistoryResult(result) => Ok(self.state.use_history_result(&result)),
        };

        match outcome {
            Ok(changes) => {
                self.commit_history(&changes);
                changes
            }
            Err(err) => {
                tracing::warn!("Calculation failed: {}", err);
                self.metrics.record_error();
                let changes = self.state.show_error(err);
                self.schedule_error_reset();
                changes
            }
        }
    }

    /// The current display lines: (calculation, result).
    pub fn display(&self) -> (String, String) {
        self.state.display()
    }

    /// A snapshot of the calculator state.
    pub fn snapshot(&self) -> CalcState {
        self.state.snapshot()
    }

    /// The history entries, most recent first.
    pub fn history_snapshot(&self) -> Vec<HistoryEntry> {
        self.history.lock().unwrap().entries().to_vec()
    }

    /// Session metrics.
    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }

    /// Persist the history once more and log the session summary.
    ///
    /// The final persist covers any in-memory mutation whose earlier write
    /// failed; history writes during the session are already per-mutation.
    pub fn shutdown(&self) {
        if let Err(e) = self.history.lock().unwrap().persist() {
            tracing::warn!("Failed to persist history at shutdown: {}", e);
        }

        if self.settings.lock().unwrap().stat_logging {
            self.metrics.log_summary();
        }
    }

    /// Append every history entry the changes carry, persisting after each.
    fn commit_history(&self, changes: &[StateChange]) {
        for change in changes {
            if let StateChange::HistoryRecorded { entry } = change {
                let mut history = self.history.lock().unwrap();
                history.append(entry.clone());
                self.metrics.record_history_append();
                if let Err(e) = history.persist() {
                    tracing::warn!("Failed to persist history: {}", e);
                }
            }
        }
    }

    fn toggle_theme(&self) -> Vec<StateChange> {
        let changes = self.state.toggle_theme();

        let theme = self.state.read(|state| state.theme);
        let mut settings = self.settings.lock().unwrap();
        settings.theme = theme;

        let config = UserConfig {
            settings: settings.clone(),
        };
        if let Err(e) = self.config_manager.save_user_config(&config) {
            tracing::warn!("Failed to persist theme preference: {}", e);
        }

        changes
    }

    fn toggle_shortcuts(&self) -> Vec<StateChange> {
        let changes = self.state.toggle_shortcuts();

        if self.state.read(|state| state.shortcuts_visible) {
            self.schedule_overlay_dismiss();
        }

        changes
    }

    fn clear_history(&self) -> Vec<StateChange> {
        let mut history = self.history.lock().unwrap();
        history.clear();
        if let Err(e) = history.persist() {
            tracing::warn!("Failed to persist cleared history: {}", e);
        }
        drop(history);

        tracing::info!("Calculation history cleared");
        self.state.note_history_cleared()
    }

    /// Schedule the full reset that follows an error display.
    ///
    /// Re-invocation replaces the pending reset rather than stacking a
    /// second one.
    fn schedule_error_reset(&self) {
        let delay = Duration::from_millis(self.settings.lock().unwrap().error_reset_delay_ms);
        let state = Arc::clone(&self.state);

        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            state.clear_all();
            tracing::debug!("Error display cleared after {:?}", delay);
        });

        if let Some(previous) = self.error_timer.lock().unwrap().replace(handle) {
            previous.abort();
        }
    }

    /// Schedule the shortcuts overlay auto-dismiss.
    ///
    /// Same replacement semantics as the error reset timer.
    fn schedule_overlay_dismiss(&self) {
        let delay = Duration::from_millis(self.settings.lock().unwrap().overlay_dismiss_delay_ms);
        let state = Arc::clone(&self.state);

        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            state.dismiss_shortcuts();
        });

        if let Some(previous) = self.overlay_timer.lock().unwrap().replace(handle) {
            previous.abort();
        }
    }
}

fn has_history(changes: &[StateChange]) -> bool {
    changes
        .iter()
        .any(|change| matches!(change, StateChange::HistoryRecorded { .. }))
}
