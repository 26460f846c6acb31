use std::cmp::Ordering;
use std::sync::{Arc, OnceLock};

use rust_decimal::Decimal;

use super::{NumericOps, checked_powi};
use crate::error::NumericError;

/// Fixed-point `rust_decimal::Decimal` values with checked arithmetic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecimalOps;

impl DecimalOps {
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<DecimalOps>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(DecimalOps)).clone()
    }
}

impl NumericOps for DecimalOps {
    type Value = Decimal;

    fn name(&self) -> &'static str {
        "decimal"
    }

    fn one(&self) -> Decimal {
        Decimal::ONE
    }

    fn neg(&self, a: &Decimal) -> Result<Decimal, NumericError> {
        Ok(-*a)
    }

    fn add(&self, a: &Decimal, b: &Decimal) -> Result<Decimal, NumericError> {
        a.checked_add(*b)
            .ok_or(NumericError::Overflow { op: "add" })
    }

    fn sub(&self, a: &Decimal, b: &Decimal) -> Result<Decimal, NumericError> {
        a.checked_sub(*b)
            .ok_or(NumericError::Overflow { op: "sub" })
    }

    fn mult(&self, a: &Decimal, b: &Decimal) -> Result<Decimal, NumericError> {
        a.checked_mul(*b)
            .ok_or(NumericError::Overflow { op: "mult" })
    }

    fn div(&self, a: &Decimal, b: &Decimal) -> Result<Decimal, NumericError> {
        if b.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        a.checked_div(*b)
            .ok_or(NumericError::Overflow { op: "div" })
    }

    fn pow(&self, base: &Decimal, exponent: i32) -> Result<Decimal, NumericError> {
        checked_powi(self, base, exponent)
    }

    fn compare(&self, a: &Decimal, b: &Decimal) -> Ordering {
        a.cmp(b)
    }

    /// Trailing zeros are dropped, so `1.50` prints as `1.5`
    fn format(&self, a: &Decimal) -> String {
        a.normalize().to_string()
    }
}
