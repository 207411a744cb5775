use crate::models::config::ThemePreference;

/// Binary operators reachable from the operator keys and buttons.
///
/// `Negate` is a unary sign flip that travels through the binary-operation
/// path: it ignores the previous operand and yields `-curr`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Modulo,
    Negate,
}

impl Operator {
    /// Display symbol, also used in history expression text.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Power => "^",
            Operator::Modulo => "%",
            Operator::Negate => "+/-",
        }
    }
}

/// Unary scientific functions available from the scientific panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScientificFunction {
    Sin,
    Cos,
    Tan,
    Log10,
    Ln,
    Sqrt,
    Square,
    Factorial,
}

impl ScientificFunction {
    /// Name written into history entries, e.g. `sin(30)`.
    pub fn name(&self) -> &'static str {
        match self {
            ScientificFunction::Sin => "sin",
            ScientificFunction::Cos => "cos",
            ScientificFunction::Tan => "tan",
            ScientificFunction::Log10 => "log",
            ScientificFunction::Ln => "ln",
            ScientificFunction::Sqrt => "sqrt",
            ScientificFunction::Square => "pow",
            ScientificFunction::Factorial => "factorial",
        }
    }
}

/// Single source of truth for the calculator's state.
///
/// The expression fields behave as a small implicit state machine:
/// **Entry** (no pending operation) moves to **AwaitingOperand** when an
/// operator is pressed (`should_reset_screen` set), and back to Entry once
/// a calculation completes.
///
/// # Invariants
///
/// - `operation` is `Some` only while `previous_input` is non-empty.
/// - `current_input` holds at most one decimal point and never keeps a
///   redundant leading "0" in front of other digits.
///
/// # Thread Safety
///
/// `CalcState` is wrapped in `Arc<RwLock<CalcState>>` by
/// [`crate::state::StateManager`]. Never mutate it directly from outside the
/// state module - use the manager's transition methods so change events are
/// emitted.
#[derive(Clone, Debug, PartialEq)]
pub struct CalcState {
    /// Digits/decimal text being typed. Empty string means "nothing typed",
    /// which the display and the engine both treat as 0.
    pub current_input: String,

    /// First operand, captured when an operator is pressed.
    pub previous_input: String,

    /// Pending binary operator, if any.
    pub operation: Option<Operator>,

    /// Next digit press starts a fresh entry instead of appending.
    pub should_reset_screen: bool,

    // Panel visibility
    pub scientific_visible: bool,
    pub history_visible: bool,
    pub shortcuts_visible: bool,

    /// The display shows the generic error indicator until the next reset.
    pub showing_error: bool,

    /// Active theme, loaded from the user config at startup.
    pub theme: ThemePreference,
}

impl Default for CalcState {
    fn default() -> Self {
        Self {
            current_input: String::new(),
            previous_input: String::new(),
            operation: None,
            should_reset_screen: false,
            scientific_visible: false,
            history_visible: false,
            shortcuts_visible: false,
            showing_error: false,
            theme: ThemePreference::Light,
        }
    }
}

impl CalcState {
    /// Append a digit to the current entry.
    ///
    /// Typing "0" onto an entry that is exactly "0" is a no-op; a first
    /// non-zero digit replaces a lone "0". Non-digit characters are ignored.
    pub fn input_digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() {
            return;
        }

        if self.should_reset_screen {
            self.current_input.clear();
            self.should_reset_screen = false;
        }

        if digit == '0' && self.current_input == "0" {
            return;
        }

        if self.current_input == "0" {
            self.current_input = digit.to_string();
        } else {
            self.current_input.push(digit);
        }
    }

    /// Append a decimal point, defaulting an empty entry to "0" first.
    ///
    /// No-op if the entry already contains a decimal point.
    pub fn input_decimal(&mut self) {
        if self.should_reset_screen {
            self.current_input = "0".to_string();
            self.should_reset_screen = false;
        }

        if self.current_input.contains('.') {
            return;
        }

        if self.current_input.is_empty() {
            self.current_input = "0".to_string();
        }

        self.current_input.push('.');
    }

    /// Install a constant (pi, e) as the current entry.
    ///
    /// Replaces the entry instead of appending, which keeps the
    /// one-decimal-point invariant intact.
    pub fn input_constant(&mut self, value: f64) {
        self.should_reset_screen = false;
        self.current_input = value.to_string();
    }

    /// Remove the last character of the current entry.
    ///
    /// A single remaining character clears to empty; empty is treated as 0
    /// everywhere else, so no partial token can survive.
    pub fn backspace(&mut self) {
        if self.current_input.len() > 1 {
            self.current_input.pop();
        } else {
            self.current_input.clear();
        }
    }

    /// Empty the current entry only, keeping any pending operation.
    pub fn clear_entry(&mut self) {
        self.current_input.clear();
    }

    /// Reset the expression state to initial values.
    ///
    /// Theme and panel visibility are preferences, not expression state, and
    /// survive a clear.
    pub fn clear_all(&mut self) {
        self.current_input.clear();
        self.previous_input.clear();
        self.operation = None;
        self.should_reset_screen = false;
        self.showing_error = false;
    }

    /// Whether a binary operation is pending completion.
    pub fn has_pending_operation(&self) -> bool {
        self.operation.is_some()
    }

    /// The calculation line shown above the result, e.g. `"3 +"`.
    ///
    /// Empty until an operator has captured a previous operand.
    pub fn expression_prefix(&self) -> String {
        match (&self.previous_input, self.operation) {
            (prev, Some(op)) if !prev.is_empty() => format!("{} {}", prev, op.symbol()),
            _ => String::new(),
        }
    }
}
