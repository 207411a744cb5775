//! Tests for the arithmetic engine and the display formatter
//!
//! Table-driven coverage of the operator and function tables, the factorial
//! domain boundaries, and the formatter's grouping/exponential thresholds.

use quickcalc::services::arithmetic::{apply_function, apply_operation, factorial};
use quickcalc::services::format::{format_display, format_value};
use quickcalc::{MathError, Operator, ScientificFunction};

#[test]
fn test_operator_table() {
    let cases = [
        (Operator::Add, 3.0, 4.0, 7.0),
        (Operator::Subtract, 10.0, 4.0, 6.0),
        (Operator::Multiply, 6.0, 7.0, 42.0),
        (Operator::Divide, 9.0, 3.0, 3.0),
        (Operator::Power, 2.0, 8.0, 256.0),
        (Operator::Modulo, 10.0, 3.0, 1.0),
        (Operator::Negate, 123.0, 5.0, -5.0),
    ];

    for (op, prev, curr, expected) in cases {
        assert_eq!(
            apply_operation(op, prev, curr),
            Ok(expected),
            "{:?} {} {}",
            op,
            prev,
            curr
        );
    }
}

#[test]
fn test_division_by_zero_is_rejected_not_infinite() {
    assert_eq!(
        apply_operation(Operator::Divide, 1.0, 0.0),
        Err(MathError::DivisionByZero)
    );
    assert_eq!(
        apply_operation(Operator::Divide, -1.0, 0.0),
        Err(MathError::DivisionByZero)
    );
    assert_eq!(
        apply_operation(Operator::Divide, 0.0, 0.0),
        Err(MathError::DivisionByZero)
    );
}

#[test]
fn test_function_table() {
    let close = |value: Result<f64, MathError>, expected: f64| {
        let value = value.expect("function should succeed");
        assert!(
            (value - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            value
        );
    };

    close(apply_function(ScientificFunction::Sin, 90.0), 1.0);
    close(apply_function(ScientificFunction::Cos, 0.0), 1.0);
    close(apply_function(ScientificFunction::Tan, 45.0), 1.0);
    close(apply_function(ScientificFunction::Log10, 100.0), 2.0);
    close(
        apply_function(ScientificFunction::Ln, std::f64::consts::E.powi(3)),
        3.0,
    );
    close(apply_function(ScientificFunction::Sqrt, 2.25), 1.5);
    close(apply_function(ScientificFunction::Square, 11.0), 121.0);
    close(apply_function(ScientificFunction::Factorial, 6.0), 720.0);
}

#[test]
fn test_domain_errors() {
    assert_eq!(
        apply_function(ScientificFunction::Sqrt, -4.0),
        Err(MathError::Domain)
    );
    assert_eq!(
        apply_function(ScientificFunction::Log10, 0.0),
        Err(MathError::Domain)
    );
    assert_eq!(
        apply_function(ScientificFunction::Ln, 0.0),
        Err(MathError::Domain)
    );
    assert_eq!(
        apply_function(ScientificFunction::Ln, -1.0),
        Err(MathError::Domain)
    );
}

#[test]
fn test_factorial_boundaries() {
    // 170 succeeds with a finite value
    let limit = factorial(170.0).unwrap();
    assert!(limit.is_finite());

    // 171 overflows f64
    assert_eq!(factorial(171.0), Err(MathError::Overflow));

    // Negative and fractional arguments are invalid input
    assert_eq!(factorial(-1.0), Err(MathError::InvalidInput));
    assert_eq!(factorial(2.5), Err(MathError::InvalidInput));

    // Exactness near the bottom of the range
    assert_eq!(factorial(12.0), Ok(479_001_600.0));
}

#[test]
fn test_factorial_through_function_table() {
    assert_eq!(
        apply_function(ScientificFunction::Factorial, 171.0),
        Err(MathError::Overflow)
    );
    assert_eq!(
        apply_function(ScientificFunction::Factorial, -3.0),
        Err(MathError::InvalidInput)
    );
}

#[test]
fn test_format_display_defaults() {
    assert_eq!(format_display(""), "0");
    assert_eq!(format_display("garbage"), "0");
    assert_eq!(format_display("42"), "42");
}

#[test]
fn test_format_grouping() {
    assert_eq!(format_value(1500.0), "1,500");
    assert_eq!(format_value(987_654_321.0), "987,654,321");
    assert_eq!(format_value(-2500.25), "-2,500.25");
    assert_eq!(format_value(999.0), "999");
}

#[test]
fn test_format_exponential_thresholds() {
    assert_eq!(format_value(0.0000001), "1.000000e-7");
    assert_eq!(format_value(2e16), "2.000000e16");

    // Values at the boundaries stay in plain/grouped form
    assert_eq!(format_value(0.000001), "0.000001");
    assert_eq!(format_value(1e15), "1,000,000,000,000,000");
}

#[test]
fn test_format_fraction_trimming() {
    assert_eq!(format_value(1234.10), "1,234.1");
    assert_eq!(format_value(1234.123456789), "1,234.12345679");
}
