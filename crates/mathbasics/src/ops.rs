use crate::error::MathError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Returns `a + b`.
pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

/// Returns `a - b`.
pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

/// Returns `a * b`.
pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

/// Returns `a / b`.
///
/// # Errors
///
/// [`MathError::DivisionByZero`] when `b` is zero (either sign), including `0 / 0`.
pub fn divide(a: f64, b: f64) -> Result<f64, MathError> {
    if b == 0.0 {
        return Err(MathError::DivisionByZero { dividend: a });
    }
    Ok(a / b)
}

/// Parses a textual operand.
///
/// Numbers are accepted in any form `f64` understands, surrounding whitespace
/// is ignored. `NaN` and infinities are rejected along with non-numeric text.
pub fn parse_operand(input: &str) -> Result<f64, MathError> {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(MathError::InvalidOperand {
            input: input.to_string(),
        }),
    }
}

/// One of the four operations, as a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    /// Symbol used when printing an equation.
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "×",
            Operation::Divide => "÷",
        }
    }

    pub fn apply(self, a: f64, b: f64) -> Result<f64, MathError> {
        match self {
            Operation::Add => Ok(add(a, b)),
            Operation::Subtract => Ok(subtract(a, b)),
            Operation::Multiply => Ok(multiply(a, b)),
            Operation::Divide => divide(a, b),
        }
    }

    pub fn evaluate(self, lhs: f64, rhs: f64) -> Result<Evaluation, MathError> {
        let result = self.apply(lhs, rhs)?;
        Ok(Evaluation {
            operation: self,
            lhs,
            rhs,
            result,
        })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" | "+" => Ok(Operation::Add),
            "subtract" | "sub" | "-" => Ok(Operation::Subtract),
            "multiply" | "mul" | "*" | "x" | "×" => Ok(Operation::Multiply),
            "divide" | "div" | "/" | "÷" => Ok(Operation::Divide),
            other => Err(format!(
                "unknown operation '{}', expected one of: add, subtract, multiply, divide",
                other
            )),
        }
    }
}

/// A completed operation with its operands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub operation: Operation,
    pub lhs: f64,
    pub rhs: f64,
    pub result: f64,
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            self.lhs,
            self.operation.symbol(),
            self.rhs,
            self.result
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concrete_scenarios() {
        assert_eq!(add(10.0, 50.0), 60.0);
        assert_eq!(multiply(5.0, 4.0), 20.0);
        assert_eq!(subtract(50.0, 30.0), 20.0);
        assert_eq!(divide(100.0, 5.0), Ok(20.0));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            divide(100.0, 0.0),
            Err(MathError::DivisionByZero { dividend: 100.0 })
        );
    }

    #[test]
    fn test_divide_zero_by_zero() {
        assert!(matches!(
            divide(0.0, 0.0),
            Err(MathError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_divide_by_negative_zero() {
        assert!(divide(1.0, -0.0).is_err());
    }

    #[test]
    fn test_divide_uses_native_precision() {
        assert_eq!(divide(1.0, 3.0), Ok(1.0 / 3.0));
        assert_eq!(divide(-7.5, 2.5), Ok(-3.0));
    }

    #[test]
    fn test_division_by_zero_message() {
        let err = divide(100.0, 0.0).unwrap_err();
        assert_eq!(err.to_string(), "division by zero: cannot divide 100 by 0");
    }

    #[test]
    fn test_parse_operand() {
        assert_eq!(parse_operand("42"), Ok(42.0));
        assert_eq!(parse_operand(" -1.5 "), Ok(-1.5));
        assert_eq!(parse_operand("1e3"), Ok(1000.0));
    }

    #[test]
    fn test_parse_operand_rejects_non_numeric() {
        for input in ["abc", "", "NaN", "inf", "-infinity", "1,5"] {
            assert_eq!(
                parse_operand(input),
                Err(MathError::InvalidOperand {
                    input: input.to_string()
                }),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_operation_from_str() {
        assert_eq!("add".parse::<Operation>(), Ok(Operation::Add));
        assert_eq!("Divide".parse::<Operation>(), Ok(Operation::Divide));
        assert_eq!("*".parse::<Operation>(), Ok(Operation::Multiply));
        assert_eq!("-".parse::<Operation>(), Ok(Operation::Subtract));
        assert!("modulo".parse::<Operation>().is_err());
    }

    #[test]
    fn test_operation_name_round_trips() {
        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>(), Ok(op));
        }
    }

    #[test]
    fn test_apply_dispatches() {
        assert_eq!(Operation::Add.apply(2.0, 3.0), Ok(5.0));
        assert_eq!(Operation::Subtract.apply(2.0, 3.0), Ok(-1.0));
        assert_eq!(Operation::Multiply.apply(2.0, 3.0), Ok(6.0));
        assert_eq!(Operation::Divide.apply(3.0, 2.0), Ok(1.5));
        assert!(Operation::Divide.apply(3.0, 0.0).is_err());
    }

    #[test]
    fn test_evaluation_display() {
        let eval = Operation::Multiply.evaluate(5.0, 4.0).unwrap();
        assert_eq!(eval.to_string(), "5 × 4 = 20");
        let eval = Operation::Divide.evaluate(100.0, 5.0).unwrap();
        assert_eq!(eval.to_string(), "100 ÷ 5 = 20");
    }

    #[test]
    fn test_evaluation_serializes_operation_name() {
        let eval = Operation::Add.evaluate(1.0, 2.0).unwrap();
        let json = serde_json::to_string(&eval).unwrap();
        assert!(json.contains("\"operation\":\"add\""));
    }
}
