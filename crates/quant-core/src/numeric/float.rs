use std::cmp::Ordering;
use std::sync::{Arc, OnceLock};

use super::NumericOps;
use crate::error::NumericError;

/// IEEE `f64` values.
///
/// `precision` fixes the number of decimals when formatting; without it the
/// shortest representation that round-trips is used (`1.0` prints as `1`).
///
/// Comparison is total: values with a partial order compare as usual, and
/// anything involving NaN falls back to [`f64::total_cmp`]. A positive NaN
/// therefore equals itself and sorts above every number, while a negative
/// NaN sorts below every number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct F64Ops {
    precision: Option<usize>,
}

impl F64Ops {
    pub const fn new() -> Self {
        Self { precision: None }
    }

    pub const fn with_precision(precision: usize) -> Self {
        Self {
            precision: Some(precision),
        }
    }

    /// Process-wide default instance
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<F64Ops>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(Self::new())).clone()
    }
}

impl NumericOps for F64Ops {
    type Value = f64;

    fn name(&self) -> &'static str {
        "f64"
    }

    fn one(&self) -> f64 {
        1.0
    }

    fn neg(&self, a: &f64) -> Result<f64, NumericError> {
        Ok(-a)
    }

    fn add(&self, a: &f64, b: &f64) -> Result<f64, NumericError> {
        Ok(a + b)
    }

    fn sub(&self, a: &f64, b: &f64) -> Result<f64, NumericError> {
        Ok(a - b)
    }

    fn mult(&self, a: &f64, b: &f64) -> Result<f64, NumericError> {
        Ok(a * b)
    }

    fn div(&self, a: &f64, b: &f64) -> Result<f64, NumericError> {
        Ok(a / b)
    }

    fn pow(&self, base: &f64, exponent: i32) -> Result<f64, NumericError> {
        Ok(base.powi(exponent))
    }

    fn compare(&self, a: &f64, b: &f64) -> Ordering {
        // NaN has no partial order; fall back to the IEEE total order
        a.partial_cmp(b).unwrap_or_else(|| a.total_cmp(b))
    }

    fn format(&self, a: &f64) -> String {
        match self.precision {
            Some(precision) => format!("{a:.precision$}"),
            None => a.to_string(),
        }
    }
}
