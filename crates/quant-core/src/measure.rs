//! Values paired with a unit vector.
//!
//! A [`Measure`] is immutable: every operation returns a new measure and
//! either succeeds completely or fails without producing anything. Unit
//! arithmetic is checked before any numeric work is done.

use std::cmp::Ordering;
use std::sync::Arc;
use std::{fmt, ops};

use crate::error::{MeasureError, MixedNumericBackendError, UnitMismatchError};
use crate::exponent::{MAX_EXPONENT, MIN_EXPONENT};
use crate::numeric::NumericOps;
use crate::unit::UnitVector;

/// Largest power worth probing in [`Measure::permissible_powers`]; any larger
/// power pushes a non-zero exponent out of the domain.
const MAX_POWER: i32 = (MAX_EXPONENT as i32) - (MIN_EXPONENT as i32);

/// A numeric value tagged with a unit and an optional display symbol.
///
/// The value is interpreted by the backend `O` the measure was constructed
/// against; measures from different backend instances never mix.
pub struct Measure<O: NumericOps> {
    value: O::Value,
    unit: UnitVector,
    symbol: Option<Arc<str>>,
    ops: Arc<O>,
}

impl<O: NumericOps> Measure<O> {
    pub fn new(ops: &Arc<O>, value: O::Value, unit: impl Into<UnitVector>) -> Self {
        Self {
            value,
            unit: unit.into(),
            symbol: None,
            ops: ops.clone(),
        }
    }

    pub fn dimensionless(ops: &Arc<O>, value: O::Value) -> Self {
        Self::new(ops, value, UnitVector::dimensionless())
    }

    pub fn value(&self) -> &O::Value {
        &self.value
    }

    pub fn into_value(self) -> O::Value {
        self.value
    }

    pub fn unit(&self) -> &UnitVector {
        &self.unit
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn ops(&self) -> &Arc<O> {
        &self.ops
    }

    pub fn is_dimensionless(&self) -> bool {
        self.unit.is_dimensionless()
    }

    /// Same value and unit, displayed under `symbol`
    pub fn with_symbol(&self, symbol: impl Into<Arc<str>>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            ..self.clone()
        }
    }

    pub fn check_unit(self, expected: &UnitVector) -> Result<Self, UnitMismatchError> {
        if !self.unit.is_compatible(expected) {
            return Err(UnitMismatchError {
                expected: expected.clone(),
                actual: self.unit,
            });
        }
        Ok(self)
    }

    fn derive(&self, value: O::Value, unit: UnitVector) -> Self {
        Self {
            value,
            unit,
            symbol: None,
            ops: self.ops.clone(),
        }
    }

    fn same_backend(&self, other: &Self) -> Result<(), MixedNumericBackendError> {
        if Arc::ptr_eq(&self.ops, &other.ops) {
            return Ok(());
        }
        log::debug!(
            "rejecting combination of {} and {} backend instances",
            self.ops.name(),
            other.ops.name()
        );
        Err(MixedNumericBackendError {
            lhs: self.ops.name(),
            rhs: other.ops.name(),
        })
    }

    fn same_unit(&self, other: &Self) -> Result<(), MeasureError> {
        self.same_backend(other)?;
        if !self.unit.is_compatible(&other.unit) {
            log::debug!("unit mismatch: {} vs {}", self.unit, other.unit);
            return Err(UnitMismatchError {
                expected: self.unit.clone(),
                actual: other.unit.clone(),
            }
            .into());
        }
        Ok(())
    }

    pub fn plus(&self, other: &Self) -> Result<Self, MeasureError> {
        self.same_unit(other)?;
        let value = self.ops.add(&self.value, &other.value)?;
        Ok(self.derive(value, self.unit.clone()))
    }

    pub fn minus(&self, other: &Self) -> Result<Self, MeasureError> {
        self.same_unit(other)?;
        let value = self.ops.sub(&self.value, &other.value)?;
        Ok(self.derive(value, self.unit.clone()))
    }

    pub fn negate(&self) -> Result<Self, MeasureError> {
        let value = self.ops.neg(&self.value)?;
        Ok(self.derive(value, self.unit.clone()))
    }

    /// Multiply by a dimensionless factor
    pub fn scale(&self, factor: &O::Value) -> Result<Self, MeasureError> {
        let value = self.ops.mult(&self.value, factor)?;
        Ok(self.derive(value, self.unit.clone()))
    }

    pub fn times(&self, other: &Self) -> Result<Self, MeasureError> {
        self.same_backend(other)?;
        let unit = self.unit.multiply(&other.unit)?;
        let value = self.ops.mult(&self.value, &other.value)?;
        Ok(self.derive(value, unit))
    }

    pub fn over(&self, other: &Self) -> Result<Self, MeasureError> {
        self.same_backend(other)?;
        let unit = self.unit.divide(&other.unit)?;
        let value = self.ops.div(&self.value, &other.value)?;
        Ok(self.derive(value, unit))
    }

    /// Alias of [`Measure::over`]
    pub fn per(&self, other: &Self) -> Result<Self, MeasureError> {
        self.over(other)
    }

    /// Alias of [`Measure::over`]
    pub fn div(&self, other: &Self) -> Result<Self, MeasureError> {
        self.over(other)
    }

    pub fn to_the(&self, exponent: i32) -> Result<Self, MeasureError> {
        let unit = self.unit.powi(exponent)?;
        let value = self.ops.pow(&self.value, exponent)?;
        Ok(self.derive(value, unit))
    }

    /// Whether raising this measure to `exponent` keeps every dimension in
    /// the exponent domain
    pub fn can_raise_to(&self, exponent: i32) -> bool {
        self.unit.powi(exponent).is_ok()
    }

    /// Integer powers accepted by [`Measure::to_the`], from the widest
    /// negative to the widest positive power that can ever be in range.
    pub fn permissible_powers(&self) -> Vec<i32> {
        (-MAX_POWER..=MAX_POWER)
            .filter(|&k| self.can_raise_to(k))
            .collect()
    }

    pub fn squared(&self) -> Result<Self, MeasureError> {
        self.to_the(2)
    }

    pub fn cubed(&self) -> Result<Self, MeasureError> {
        self.to_the(3)
    }

    pub fn inverse(&self) -> Result<Self, MeasureError> {
        self.to_the(-1)
    }

    /// Alias of [`Measure::inverse`]
    pub fn reciprocal(&self) -> Result<Self, MeasureError> {
        self.inverse()
    }

    /// Transform the value without any unit check. The unit is kept.
    pub fn map_value_unchecked(&self, value_fn: impl FnOnce(&O::Value) -> O::Value) -> Self {
        self.derive(value_fn(&self.value), self.unit.clone())
    }

    /// Transform value and unit without any compatibility check. Meant for
    /// trusted composition such as unit conversion helpers.
    pub fn map_unchecked(
        &self,
        value_fn: impl FnOnce(&O::Value) -> O::Value,
        unit_fn: impl FnOnce(&UnitVector) -> UnitVector,
    ) -> Self {
        self.derive(value_fn(&self.value), unit_fn(&self.unit))
    }

    pub fn compare(&self, other: &Self) -> Result<Ordering, MeasureError> {
        self.same_unit(other)?;
        Ok(self.ops.compare(&self.value, &other.value))
    }

    pub fn is_lt(&self, other: &Self) -> Result<bool, MeasureError> {
        Ok(self.compare(other)?.is_lt())
    }

    pub fn is_le(&self, other: &Self) -> Result<bool, MeasureError> {
        Ok(self.compare(other)?.is_le())
    }

    pub fn is_eq(&self, other: &Self) -> Result<bool, MeasureError> {
        Ok(self.compare(other)?.is_eq())
    }

    pub fn is_ne(&self, other: &Self) -> Result<bool, MeasureError> {
        Ok(self.compare(other)?.is_ne())
    }

    pub fn is_ge(&self, other: &Self) -> Result<bool, MeasureError> {
        Ok(self.compare(other)?.is_ge())
    }

    pub fn is_gt(&self, other: &Self) -> Result<bool, MeasureError> {
        Ok(self.compare(other)?.is_gt())
    }

    /// Express this measure as a multiple of `unit`, e.g. `3 ft`.
    ///
    /// When `unit` carries no symbol the plain [`Display`](fmt::Display) form
    /// is returned instead.
    pub fn in_unit(&self, unit: &Self) -> Result<String, MeasureError> {
        self.same_unit(unit)?;
        let Some(symbol) = unit.symbol() else {
            return Ok(self.to_string());
        };
        let quotient = self.ops.div(&self.value, &unit.value)?;
        Ok(format!("{} {}", self.ops.format(&quotient), symbol))
    }
}

impl<O: NumericOps> Clone for Measure<O> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            unit: self.unit.clone(),
            symbol: self.symbol.clone(),
            ops: self.ops.clone(),
        }
    }
}

impl<O: NumericOps> fmt::Debug for Measure<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Measure")
            .field("value", &self.value)
            .field("unit", &self.unit)
            .field("symbol", &self.symbol)
            .field("backend", &self.ops.name())
            .finish()
    }
}

impl<O: NumericOps> fmt::Display for Measure<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.ops.format(&self.value);
        if self.unit.is_dimensionless() {
            write!(f, "{value}")
        } else {
            write!(f, "{value} {}", self.unit)
        }
    }
}

/// Equal backend instance, equal units and values that compare equal.
/// Display symbols are ignored.
impl<O: NumericOps> PartialEq for Measure<O> {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.compare(other), Ok(Ordering::Equal))
    }
}

impl<O: NumericOps> ops::Add for &Measure<O> {
    type Output = Result<Measure<O>, MeasureError>;
    fn add(self, rhs: Self) -> Self::Output {
        self.plus(rhs)
    }
}

impl<O: NumericOps> ops::Sub for &Measure<O> {
    type Output = Result<Measure<O>, MeasureError>;
    fn sub(self, rhs: Self) -> Self::Output {
        self.minus(rhs)
    }
}

impl<O: NumericOps> ops::Mul for &Measure<O> {
    type Output = Result<Measure<O>, MeasureError>;
    fn mul(self, rhs: Self) -> Self::Output {
        self.times(rhs)
    }
}

impl<O: NumericOps> ops::Div for &Measure<O> {
    type Output = Result<Measure<O>, MeasureError>;
    fn div(self, rhs: Self) -> Self::Output {
        self.over(rhs)
    }
}

impl<O: NumericOps> ops::Neg for &Measure<O> {
    type Output = Result<Measure<O>, MeasureError>;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl<O: NumericOps> ops::Neg for Measure<O> {
    type Output = Result<Measure<O>, MeasureError>;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}
