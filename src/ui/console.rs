// Console frontend - line-oriented stand-in for the display surface
//
// Each input line is tokenized into calculator input events: bare characters
// travel through the keyboard map exactly as key presses would, and
// `:`-prefixed words act as button presses for surfaces the keyboard
// contract does not cover (scientific functions, constants, history rows).

use crate::models::{Operator, ScientificFunction};
use crate::services::keymap::{self, InputEvent, KeyEvent};
use crate::ui::controller::CalcController;
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// Run the interactive console loop until EOF or `:quit`.
pub fn run(controller: &CalcController) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    print_banner(&mut stdout)?;
    render(controller, &mut stdout)?;

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read input line")?;
        let trimmed = line.trim();

        if matches!(trimmed, ":quit" | ":q" | ":exit") {
            break;
        }

        if trimmed == ":clear-history" {
            // The store performs no confirmation of its own; ask here
            write!(stdout, "Clear all calculation history? [y/N] ")?;
            stdout.flush()?;
            let answer = lines.next().transpose()?.unwrap_or_default();
            if answer.trim().eq_ignore_ascii_case("y") {
                controller.dispatch(InputEvent::ClearHistory);
            }
            render(controller, &mut stdout)?;
            continue;
        }

        for event in parse_line(trimmed, controller, &mut stdout)? {
            controller.dispatch(event);
        }
        render(controller, &mut stdout)?;
    }

    Ok(())
}

/// Tokenize one input line into calculator input events.
///
/// Bare tokens are processed character by character through the keyboard
/// map; `^` acts as the power button and `?` stands in for `Ctrl+/`, neither
/// of which a line-oriented terminal can deliver as a real key event.
fn parse_line(
    line: &str,
    controller: &CalcController,
    out: &mut impl Write,
) -> Result<Vec<InputEvent>> {
    let mut events = Vec::new();
    let mut tokens = line.split_whitespace();

    while let Some(token) = tokens.next() {
        if let Some(command) = token.strip_prefix(':') {
            if command == "use" {
                let entry = tokens
                    .next()
                    .and_then(|index| index.parse::<usize>().ok())
                    .and_then(|index| controller.history_snapshot().get(index).cloned());
                match entry {
                    Some(entry) => events.push(InputEvent::UseHistoryResult(entry.result)),
                    None => writeln!(out, "no such history entry")?,
                }
            } else if let Some(event) = command_event(command) {
                events.push(event);
            } else {
                writeln!(out, "unknown command :{}", command)?;
            }
        } else {
            for c in token.chars() {
                if let Some(event) = char_event(c) {
                    events.push(event);
                }
            }
        }
    }

    Ok(events)
}

/// Map a single typed character, treating it as the equivalent key press.
fn char_event(c: char) -> Option<InputEvent> {
    match c {
        '^' => Some(InputEvent::Operation(Operator::Power)),
        '?' => Some(InputEvent::ToggleShortcuts),
        _ => keymap::map_key(&KeyEvent::plain(c.to_string())),
    }
}

/// Map a `:`-prefixed word to its button press.
fn command_event(command: &str) -> Option<InputEvent> {
    let event = match command {
        "sin" => InputEvent::Function(ScientificFunction::Sin),
        "cos" => InputEvent::Function(ScientificFunction::Cos),
        "tan" => InputEvent::Function(ScientificFunction::Tan),
        "log" => InputEvent::Function(ScientificFunction::Log10),
        "ln" => InputEvent::Function(ScientificFunction::Ln),
        "sqrt" => InputEvent::Function(ScientificFunction::Sqrt),
        "sq" | "pow" => InputEvent::Function(ScientificFunction::Square),
        "fact" => InputEvent::Function(ScientificFunction::Factorial),
        "pi" => InputEvent::Constant(std::f64::consts::PI),
        "e" => InputEvent::Constant(std::f64::consts::E),
        "neg" => InputEvent::Operation(Operator::Negate),
        "ce" => InputEvent::ClearEntry,
        _ => return None,
    };
    Some(event)
}

fn print_banner(out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "{} v{} - type digits and operators, = to calculate",
        crate::APP_NAME,
        crate::VERSION
    )?;
    writeln!(
        out,
        "s scientific panel | t theme | h history | ? shortcuts | :quit to exit"
    )?;
    Ok(())
}

/// Render the display lines and any visible panel.
fn render(controller: &CalcController, out: &mut impl Write) -> Result<()> {
    let (calculation, result) = controller.display();
    let state = controller.snapshot();

    if !calculation.is_empty() {
        writeln!(out, "  {}", calculation)?;
    }
    writeln!(out, "[{}] {}", state.theme.as_str(), result)?;

    if state.scientific_visible {
        writeln!(
            out,
            "  fn: :sin :cos :tan :log :ln :sqrt :sq :fact | const: :pi :e | :neg"
        )?;
    }

    if state.shortcuts_visible {
        for (action, keys) in keymap::shortcut_reference() {
            writeln!(out, "  {:<22} {}", action, keys)?;
        }
    }

    if state.history_visible {
        let entries = controller.history_snapshot();
        if entries.is_empty() {
            writeln!(out, "  -- no calculations yet --")?;
        }
        for (index, entry) in entries.iter().enumerate() {
            writeln!(
                out,
                "  [{}] {} = {}  ({})",
                index, entry.calculation, entry.result, entry.timestamp
            )?;
        }
    }

    Ok(())
}
