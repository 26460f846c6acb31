//! Numeric backends for [`Measure`](crate::measure::Measure).
//!
//! A measure never does arithmetic on its value directly. It asks the
//! [`NumericOps`] instance it was built against, so the same unit machinery
//! works over `f64`, fixed-point decimals and exact rationals alike.

use std::cmp::Ordering;
use std::fmt;

use crate::error::NumericError;

mod decimal;
mod float;
mod rational;

pub use decimal::DecimalOps;
pub use float::F64Ops;
pub use rational::RationalOps;

/// Capabilities a numeric representation supplies to back a measure.
///
/// Implementations hold no mutable state. Backends that cannot complete an
/// operation for every input (overflow, division by zero) report it through
/// [`NumericError`]; IEEE floats never do.
pub trait NumericOps: fmt::Debug + Send + Sync + 'static {
    type Value: Clone + fmt::Debug + Send + Sync;

    /// Short backend name used in error messages
    fn name(&self) -> &'static str;

    fn one(&self) -> Self::Value;

    fn neg(&self, a: &Self::Value) -> Result<Self::Value, NumericError>;

    fn add(&self, a: &Self::Value, b: &Self::Value) -> Result<Self::Value, NumericError>;

    fn sub(&self, a: &Self::Value, b: &Self::Value) -> Result<Self::Value, NumericError>;

    fn mult(&self, a: &Self::Value, b: &Self::Value) -> Result<Self::Value, NumericError>;

    fn div(&self, a: &Self::Value, b: &Self::Value) -> Result<Self::Value, NumericError>;

    fn pow(&self, base: &Self::Value, exponent: i32) -> Result<Self::Value, NumericError>;

    fn compare(&self, a: &Self::Value, b: &Self::Value) -> Ordering;

    fn format(&self, a: &Self::Value) -> String;
}

/// Exponentiation by squaring for backends with checked multiplication.
///
/// Negative exponents take the reciprocal of the positive power through
/// `div`, so division by zero is reported by the backend.
pub(crate) fn checked_powi<T, O>(ops: &O, base: &T, exponent: i32) -> Result<T, NumericError>
where
    T: Clone,
    O: NumericOps<Value = T>,
{
    let mut result = ops.one();
    let mut factor = base.clone();
    let mut n = exponent.unsigned_abs();
    while n > 0 {
        if n & 1 == 1 {
            result = ops.mult(&result, &factor)?;
        }
        n >>= 1;
        if n > 0 {
            factor = ops.mult(&factor, &factor)?;
        }
    }
    if exponent < 0 {
        ops.div(&ops.one(), &result)
    } else {
        Ok(result)
    }
}
