use std::fmt;

use crate::exponent::{ExponentOp, MAX_EXPONENT, MIN_EXPONENT};
use crate::format::describe_unit;
use crate::unit::UnitVector;

/// A unit-algebra operation produced an exponent outside the supported domain.
///
/// `result` is the true mathematical result of `lhs op rhs`, which is what
/// left the domain. `dimension` is filled in once the failure is attributed
/// to a specific dimension of a unit vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArithmeticError {
    pub op: ExponentOp,
    pub lhs: i64,
    pub rhs: i64,
    pub result: i64,
    pub dimension: Option<String>,
}

impl ArithmeticError {
    pub fn new(op: ExponentOp, lhs: i64, rhs: i64, result: i64) -> Self {
        Self {
            op,
            lhs,
            rhs,
            result,
            dimension: None,
        }
    }

    /// Attribute the failure to `dimension`
    pub fn in_dimension(mut self, dimension: impl Into<String>) -> Self {
        self.dimension = Some(dimension.into());
        self
    }
}

impl fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Exponent out of range")?;
        if let Some(dimension) = &self.dimension {
            write!(f, " for dimension '{dimension}'")?;
        }
        write!(
            f,
            ": {} {} {} = {} (supported range is {}..={})",
            self.lhs,
            self.op.symbol(),
            self.rhs,
            self.result,
            MIN_EXPONENT,
            MAX_EXPONENT
        )
    }
}

impl std::error::Error for ArithmeticError {}

/// An operation that requires equal units was handed two different ones.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unit mismatch: expected {}, got {}", describe_unit(.expected), describe_unit(.actual))]
pub struct UnitMismatchError {
    pub expected: UnitVector,
    pub actual: UnitVector,
}

/// Two measures bound to different numeric backend instances were combined.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Cannot combine measures backed by different numeric backend instances ({lhs} and {rhs})")]
pub struct MixedNumericBackendError {
    pub lhs: &'static str,
    pub rhs: &'static str,
}

/// Failures a numeric backend may report for values it cannot represent.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NumericError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Numeric overflow in {op}")]
    Overflow { op: &'static str },
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MeasureError {
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
    #[error(transparent)]
    UnitMismatch(#[from] UnitMismatchError),
    #[error(transparent)]
    MixedBackend(#[from] MixedNumericBackendError),
    #[error(transparent)]
    Numeric(#[from] NumericError),
}

/// Errors from parsing a unit string such as `kg * m / s^2`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid unit format: '{input}'")]
    InvalidFormat { input: String },
    #[error("Invalid exponent '{token}'")]
    InvalidExponent { token: String },
    #[error("Invalid unit symbol '{token}'")]
    InvalidSymbol { token: String },
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}
