//! Property-based tests for the calculator core.
//!
//! These tests use proptest to verify invariants hold across
//! many randomly generated input sequences.

use proptest::prelude::*;
use quickcalc::history::{HISTORY_CAPACITY, HistoryEntry, HistoryStore};
use quickcalc::models::CalcState;
use quickcalc::services::format::format_display;
use quickcalc::{Operator, StateManager};
use tempfile::TempDir;

#[derive(Clone, Debug)]
enum EntryKey {
    Digit(char),
    Decimal,
    Backspace,
    ClearEntry,
}

prop_compose! {
    fn arbitrary_entry_key()(variant in 0..10u8, digit in 0..10u8) -> EntryKey {
        match variant {
            0..=6 => EntryKey::Digit(char::from(b'0' + digit)),
            7 => EntryKey::Decimal,
            8 => EntryKey::Backspace,
            _ => EntryKey::ClearEntry,
        }
    }
}

proptest! {
    #[test]
    fn entry_never_holds_two_decimal_points(keys in prop::collection::vec(arbitrary_entry_key(), 0..64)) {
        let mut state = CalcState::default();
        for key in keys {
            match key {
                EntryKey::Digit(d) => state.input_digit(d),
                EntryKey::Decimal => state.input_decimal(),
                EntryKey::Backspace => state.backspace(),
                EntryKey::ClearEntry => state.clear_entry(),
            }
            prop_assert!(state.current_input.matches('.').count() <= 1);
        }
    }

    #[test]
    fn zero_is_noop_exactly_when_entry_is_zero(keys in prop::collection::vec(arbitrary_entry_key(), 0..32)) {
        let mut state = CalcState::default();
        for key in keys {
            match key {
                EntryKey::Digit(d) => state.input_digit(d),
                EntryKey::Decimal => state.input_decimal(),
                EntryKey::Backspace => state.backspace(),
                EntryKey::ClearEntry => state.clear_entry(),
            }
        }

        let before = state.clone();
        state.input_digit('0');
        let was_noop = state == before;
        prop_assert_eq!(was_noop, before.current_input == "0");
    }

    #[test]
    fn entry_never_keeps_redundant_leading_zero(keys in prop::collection::vec(arbitrary_entry_key(), 0..64)) {
        let mut state = CalcState::default();
        for key in keys {
            match key {
                EntryKey::Digit(d) => state.input_digit(d),
                EntryKey::Decimal => state.input_decimal(),
                EntryKey::Backspace => state.backspace(),
                EntryKey::ClearEntry => state.clear_entry(),
            }
            // "0" may only be followed by a decimal point
            if state.current_input.starts_with('0') && state.current_input.len() > 1 {
                prop_assert!(state.current_input.as_bytes()[1] == b'.');
            }
        }
    }

    #[test]
    fn clear_all_always_restores_initial_expression_state(keys in prop::collection::vec(arbitrary_entry_key(), 0..32)) {
        let manager = StateManager::new();
        for key in keys {
            match key {
                EntryKey::Digit(d) => { manager.input_digit(d); }
                EntryKey::Decimal => { manager.input_decimal(); }
                EntryKey::Backspace => { manager.backspace(); }
                EntryKey::ClearEntry => { manager.clear_entry(); }
            }
        }
        let _ = manager.input_operation(Operator::Add);

        manager.clear_all();
        let state = manager.snapshot();
        prop_assert!(state.current_input.is_empty());
        prop_assert!(state.previous_input.is_empty());
        prop_assert!(state.operation.is_none());
        prop_assert!(!state.should_reset_screen);
    }

    #[test]
    fn history_cap_and_order_hold(count in 0usize..120) {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = camino::Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let mut store = HistoryStore::new(&data_dir).unwrap();

        for n in 0..count {
            store.append(HistoryEntry {
                calculation: format!("{} + 0", n),
                result: n.to_string(),
                timestamp: String::new(),
            });
        }

        prop_assert!(store.len() <= HISTORY_CAPACITY);
        prop_assert_eq!(store.len(), count.min(HISTORY_CAPACITY));

        // Most-recent-first: results decrease front to back
        for window in store.entries().windows(2) {
            let newer: usize = window[0].result.parse().unwrap();
            let older: usize = window[1].result.parse().unwrap();
            prop_assert_eq!(newer, older + 1);
        }
    }

    #[test]
    fn format_display_never_panics(raw in ".{0,24}") {
        let formatted = format_display(&raw);
        prop_assert!(!formatted.is_empty());
    }

    #[test]
    fn formatted_grouped_values_parse_back(value in -1e15f64..1e15f64) {
        prop_assume!(value.is_finite());
        let formatted = quickcalc::services::format::format_value(value);
        if !formatted.contains('e') {
            let ungrouped = formatted.replace(',', "");
            let parsed: f64 = ungrouped.parse().unwrap();
            // Grouping rounds to 8 fractional digits at most
            let tolerance = 1e-8_f64.max(value.abs() * 1e-12);
            prop_assert!((parsed - value).abs() <= tolerance);
        }
    }
}
