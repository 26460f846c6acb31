use std::cmp::Ordering;
use std::sync::{Arc, OnceLock};

use num_rational::Ratio;
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, One, Zero};

use super::{NumericOps, checked_powi};
use crate::error::NumericError;

/// Exact `Ratio<i64>` values. Overflow of the numerator or denominator is
/// reported rather than wrapped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RationalOps;

impl RationalOps {
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<RationalOps>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(RationalOps)).clone()
    }
}

impl NumericOps for RationalOps {
    type Value = Ratio<i64>;

    fn name(&self) -> &'static str {
        "rational"
    }

    fn one(&self) -> Ratio<i64> {
        Ratio::one()
    }

    fn neg(&self, a: &Ratio<i64>) -> Result<Ratio<i64>, NumericError> {
        // Denominators stay positive, so only the numerator can overflow
        a.numer()
            .checked_neg()
            .map(|numer| Ratio::new_raw(numer, *a.denom()))
            .ok_or(NumericError::Overflow { op: "neg" })
    }

    fn add(&self, a: &Ratio<i64>, b: &Ratio<i64>) -> Result<Ratio<i64>, NumericError> {
        CheckedAdd::checked_add(a, b).ok_or(NumericError::Overflow { op: "add" })
    }

    fn sub(&self, a: &Ratio<i64>, b: &Ratio<i64>) -> Result<Ratio<i64>, NumericError> {
        CheckedSub::checked_sub(a, b).ok_or(NumericError::Overflow { op: "sub" })
    }

    fn mult(&self, a: &Ratio<i64>, b: &Ratio<i64>) -> Result<Ratio<i64>, NumericError> {
        CheckedMul::checked_mul(a, b).ok_or(NumericError::Overflow { op: "mult" })
    }

    fn div(&self, a: &Ratio<i64>, b: &Ratio<i64>) -> Result<Ratio<i64>, NumericError> {
        if b.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        CheckedDiv::checked_div(a, b).ok_or(NumericError::Overflow { op: "div" })
    }

    fn pow(&self, base: &Ratio<i64>, exponent: i32) -> Result<Ratio<i64>, NumericError> {
        checked_powi(self, base, exponent)
    }

    fn compare(&self, a: &Ratio<i64>, b: &Ratio<i64>) -> Ordering {
        a.cmp(b)
    }

    fn format(&self, a: &Ratio<i64>) -> String {
        a.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(numer: i64, denom: i64) -> Ratio<i64> {
        Ratio::new(numer, denom)
    }

    #[test]
    fn test_exact_arithmetic() {
        let ops = RationalOps;
        assert_eq!(ops.add(&r(1, 3), &r(1, 6)), Ok(r(1, 2)));
        assert_eq!(ops.sub(&r(1, 3), &r(1, 2)), Ok(r(-1, 6)));
        assert_eq!(ops.mult(&r(2, 3), &r(3, 4)), Ok(r(1, 2)));
        assert_eq!(ops.div(&r(1, 3), &r(2, 1)), Ok(r(1, 6)));
        assert_eq!(ops.pow(&r(2, 3), -2), Ok(r(9, 4)));
        assert_eq!(ops.neg(&r(1, 2)), Ok(r(-1, 2)));
    }

    #[test]
    fn test_failures() {
        let ops = RationalOps;
        assert_eq!(
            ops.div(&r(1, 1), &Ratio::zero()),
            Err(NumericError::DivisionByZero)
        );
        assert_eq!(
            ops.mult(&r(i64::MAX, 1), &r(2, 1)),
            Err(NumericError::Overflow { op: "mult" })
        );
        assert_eq!(ops.pow(&r(10, 1), 30), Err(NumericError::Overflow { op: "mult" }));
        assert_eq!(
            ops.neg(&r(i64::MIN, 1)),
            Err(NumericError::Overflow { op: "neg" })
        );
        assert_eq!(ops.neg(&r(i64::MIN + 1, 3)), Ok(r(i64::MAX, 3)));
    }

    #[test]
    fn test_format() {
        assert_eq!(RationalOps.format(&r(6, 4)), "3/2");
        assert_eq!(RationalOps.format(&r(4, 2)), "2");
    }
}
