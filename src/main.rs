//! Quickcalc - Scientific desk calculator with persistent history
//!
//! Main entry point for the console application.
//!
//! # Overview
//!
//! This binary crate provides the interactive console frontend for Quickcalc.
//! It initializes:
//! - Logging infrastructure (file rotation + console output)
//! - Tokio async runtime (worker threads for the deferred display timers)
//! - State management ([`StateManager`])
//! - Configuration and history loading ([`ConfigManager`], [`HistoryStore`])
//! - Input dispatch ([`CalcController`] - bridges the console with the state machine)
//!
//! The application uses a hybrid threading model:
//! - **Main thread**: Runs the blocking console read/render loop
//! - **Tokio workers**: Run the deferred timers (error auto-reset, shortcuts
//!   overlay auto-dismiss), which re-enter the thread-safe state manager
//!
//! # Execution Flow
//!
//! 1. Initialize logging → logs/quickcalc_<date>.log
//! 2. Create tokio runtime with 2 worker threads
//! 3. Create StateManager (Arc<RwLock<CalcState>>)
//! 4. Load Quickcalc Config.yaml → theme + display timing settings
//! 5. Load calculator-history.json → past calculations (capped at 50)
//! 6. Create CalcController and run the console loop (blocks until EOF/:quit)
//! 7. Persist history once more, log session metrics
//! 8. Shutdown tokio runtime with 5s timeout
//!
//! # Data Files
//!
//! Expected in the `Quickcalc Data/` directory (created on first run):
//! - `Quickcalc Config.yaml`: Theme preference and display timing settings
//! - `calculator-history.json`: Persisted calculation history

use anyhow::Result;
use quickcalc::ui::CalcController;
use quickcalc::{ConfigManager, HistoryStore, StateManager, APP_NAME, VERSION};
use std::sync::Arc;

/// Main entry point for the Quickcalc console application
///
/// # Errors
///
/// This function can fail if:
/// - Logging initialization fails (disk space, permissions)
/// - Tokio runtime creation fails (system resources)
/// - The data directory cannot be created
/// - Reading from the terminal fails
fn main() -> Result<()> {
    // Setup logging with both file and console output
    let _guard =
        quickcalc::logging::setup_logging_with_console("logs", "quickcalc", false, true)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    // Create tokio runtime for the deferred display timers
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(2)
        .thread_name("quickcalc-worker")
        .build()?;

    // Create state manager for the calculator state
    let state_manager = Arc::new(StateManager::new());
    tracing::info!("State manager initialized");

    // Load user configuration (theme, display timings)
    let config_manager = ConfigManager::new("Quickcalc Data")?;
    let user_config = config_manager.load_user_config();
    state_manager.load_from_user_config(&user_config);

    // Load persisted calculation history
    let mut history = HistoryStore::new(config_manager.config_dir())?;
    history.load();
    tracing::info!("Loaded {} history entries", history.len());

    // Create the controller wiring input events to state, history and timers
    let controller = CalcController::new(
        state_manager,
        history,
        user_config.settings,
        config_manager,
        runtime.handle().clone(),
    );

    tracing::info!("Controller initialized, starting console loop");

    // Run the console loop (blocks until EOF or :quit)
    let result = quickcalc::ui::console::run(&controller);

    tracing::info!("Console session ended, shutting down");

    // Final history persist + session metrics
    controller.shutdown();

    // Shutdown the tokio runtime gracefully
    runtime.shutdown_timeout(std::time::Duration::from_secs(5));

    tracing::info!("Application shutdown complete");

    result
}
