//! Dimensional analysis over a bounded exponent domain.
//!
//! Units are sparse vectors of integer exponents over named dimensions
//! ([`unit::UnitVector`]). Multiplying units adds exponents, dividing
//! subtracts them and raising to a power scales them; any result outside
//! `MIN_EXPONENT..=MAX_EXPONENT` is rejected with an
//! [`error::ArithmeticError`] instead of being clamped.
//!
//! [`measure::Measure`] pairs a value with a unit. It is generic over the
//! numeric representation through [`numeric::NumericOps`], with backends for
//! `f64`, `rust_decimal::Decimal` and `num_rational::Ratio<i64>`.
//!
//! ```
//! use quant_core::measure::Measure;
//! use quant_core::numeric::F64Ops;
//! use quant_core::unit::BaseDimension;
//!
//! let ops = F64Ops::shared();
//! let meters = Measure::new(&ops, 1.0, BaseDimension::Length).with_symbol("m");
//! let seconds = Measure::new(&ops, 1.0, BaseDimension::Time).with_symbol("s");
//!
//! let speed = meters.over(&seconds).unwrap();
//! assert_eq!(speed.to_string(), "1 m / s");
//! assert!(speed.times(&seconds).unwrap().is_eq(&meters).unwrap());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod exponent;
pub mod format;
pub mod measure;
pub mod numeric;
pub mod unit;

pub use error::{
    ArithmeticError, MeasureError, MixedNumericBackendError, NumericError, ParseError,
    UnitMismatchError,
};
pub use exponent::{Exponent, ExponentTable, MAX_EXPONENT, MIN_EXPONENT};
pub use format::format_unit;
pub use measure::Measure;
pub use numeric::{DecimalOps, F64Ops, NumericOps, RationalOps};
pub use unit::{BaseDimension, UnitVector};
