use crate::models::{Operator, ScientificFunction};
use thiserror::Error;

/// Errors that can occur while evaluating an operation
///
/// Every kind surfaces to the user as the same generic error indicator; the
/// distinct variants exist for logging and tests.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("factorial requires a non-negative integer")]
    InvalidInput,

    #[error("factorial argument exceeds 170")]
    Overflow,

    #[error("result is not a finite number")]
    Domain,
}

/// Apply a binary operator to two parsed operands.
///
/// `Negate` ignores `prev` and flips the sign of `curr`. Division rejects a
/// zero divisor before evaluating, so `Infinity` never leaks into state. Any
/// NaN or non-finite result maps to [`MathError::Domain`].
pub fn apply_operation(op: Operator, prev: f64, curr: f64) -> Result<f64, MathError> {
    let result = match op {
        Operator::Add => prev + curr,
        Operator::Subtract => prev - curr,
        Operator::Multiply => prev * curr,
        Operator::Divide => {
            if curr == 0.0 {
                return Err(MathError::DivisionByZero);
            }
            prev / curr
        }
        Operator::Power => prev.powf(curr),
        Operator::Modulo => prev % curr,
        Operator::Negate => -curr,
    };

    finite_or_domain(result)
}

/// Apply a unary scientific function to a parsed operand.
///
/// The angle functions interpret their input as degrees. Any NaN or
/// non-finite result (negative square root, log of zero, ...) maps to
/// [`MathError::Domain`].
pub fn apply_function(function: ScientificFunction, x: f64) -> Result<f64, MathError> {
    let result = match function {
        ScientificFunction::Sin => x.to_radians().sin(),
        ScientificFunction::Cos => x.to_radians().cos(),
        ScientificFunction::Tan => x.to_radians().tan(),
        ScientificFunction::Log10 => x.log10(),
        ScientificFunction::Ln => x.ln(),
        ScientificFunction::Sqrt => x.sqrt(),
        ScientificFunction::Square => x * x,
        ScientificFunction::Factorial => return factorial(x),
    };

    finite_or_domain(result)
}

/// Exact factorial of a small non-negative integer.
///
/// Rejects negative and fractional input with [`MathError::InvalidInput`]
/// and anything above 170 with [`MathError::Overflow`]. 170! is the largest
/// factorial representable in an f64; the cap is a domain limit, not a tuning
/// knob.
pub fn factorial(x: f64) -> Result<f64, MathError> {
    if x < 0.0 || x.fract() != 0.0 {
        return Err(MathError::InvalidInput);
    }
    if x > 170.0 {
        return Err(MathError::Overflow);
    }

    let n = x as u32;
    let mut result = 1.0_f64;
    for i in 2..=n {
        result *= f64::from(i);
    }
    Ok(result)
}

fn finite_or_domain(result: f64) -> Result<f64, MathError> {
    if result.is_finite() {
        Ok(result)
    } else {
        Err(MathError::Domain)
    }
}
