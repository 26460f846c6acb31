//! Bounded exponent arithmetic.
//!
//! Dimension exponents live in the closed domain `MIN_EXPONENT..=MAX_EXPONENT`.
//! Every operation here is total over that domain: it yields either an
//! in-domain [`Exponent`] or an [`ArithmeticError`] carrying both operands and
//! the true result. Nothing clamps or wraps.

use std::fmt;

use serde::Serialize;

use crate::error::ArithmeticError;

pub const MIN_EXPONENT: i8 = -4;
pub const MAX_EXPONENT: i8 = 4;

/// Number of exponents in the domain
pub const DOMAIN_SIZE: usize = (MAX_EXPONENT as i16 - MIN_EXPONENT as i16 + 1) as usize;

/// Whether `value` lies inside the supported exponent domain
pub const fn is_exponent(value: i64) -> bool {
    value >= MIN_EXPONENT as i64 && value <= MAX_EXPONENT as i64
}

/// An integer power of a dimension, guaranteed to be inside the domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Exponent(i8);

impl Exponent {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);
    pub const MIN: Self = Self(MIN_EXPONENT);
    pub const MAX: Self = Self(MAX_EXPONENT);

    pub const fn new(value: i64) -> Option<Self> {
        if is_exponent(value) {
            Some(Self(value as i8))
        } else {
            None
        }
    }

    /// Exponent literal checked at compile time.
    ///
    /// ```
    /// use quant_core::exponent::Exponent;
    /// assert_eq!(Exponent::lit::<-2>().get(), -2);
    /// ```
    ///
    /// ```compile_fail
    /// use quant_core::exponent::Exponent;
    /// let _ = Exponent::lit::<5>();
    /// ```
    pub const fn lit<const N: i8>() -> Self {
        const {
            assert!(
                N >= MIN_EXPONENT && N <= MAX_EXPONENT,
                "exponent literal outside the supported domain"
            )
        };
        Self(N)
    }

    pub const fn get(self) -> i8 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// All exponents of the domain in ascending order
    pub fn domain() -> impl Iterator<Item = Exponent> {
        (MIN_EXPONENT..=MAX_EXPONENT).map(Self)
    }

    const fn index(self) -> usize {
        (self.0 as i16 - MIN_EXPONENT as i16) as usize
    }
}

impl fmt::Display for Exponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Exponent> for i8 {
    fn from(exponent: Exponent) -> i8 {
        exponent.0
    }
}

impl From<Exponent> for i64 {
    fn from(exponent: Exponent) -> i64 {
        exponent.0 as i64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExponentOp {
    Add,
    Sub,
    Scale,
}

impl ExponentOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            ExponentOp::Add => "+",
            ExponentOp::Sub => "-",
            ExponentOp::Scale => "*",
        }
    }
}

fn checked(op: ExponentOp, lhs: i64, rhs: i64, result: i64) -> Result<Exponent, ArithmeticError> {
    Exponent::new(result).ok_or_else(|| {
        log::debug!("exponent {lhs} {} {rhs} = {result} leaves the domain", op.symbol());
        ArithmeticError::new(op, lhs, rhs, result)
    })
}

pub fn add_exponents(a: Exponent, b: Exponent) -> Result<Exponent, ArithmeticError> {
    match (a.0, b.0) {
        (_, 0) => Ok(a),
        (0, _) => Ok(b),
        (x, y) => checked(ExponentOp::Add, x.into(), y.into(), x as i64 + y as i64),
    }
}

pub fn sub_exponents(a: Exponent, b: Exponent) -> Result<Exponent, ArithmeticError> {
    match (a.0, b.0) {
        (_, 0) => Ok(a),
        (x, y) => checked(ExponentOp::Sub, x.into(), y.into(), x as i64 - y as i64),
    }
}

/// Multiply an exponent by an arbitrary integer power
pub fn scale_exponent(a: Exponent, k: i32) -> Result<Exponent, ArithmeticError> {
    match (a.0, k) {
        (0, _) | (_, 0) => Ok(Exponent::ZERO),
        (_, 1) => Ok(a),
        (x, k) => checked(ExponentOp::Scale, x.into(), k.into(), x as i64 * k as i64),
    }
}

/// One row of the precomputed sum/difference table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TableEntry {
    pub op: ExponentOp,
    pub lhs: Exponent,
    pub rhs: Exponent,
    /// `None` when the true result leaves the domain
    pub result: Option<Exponent>,
}

type Grid = [[Option<Exponent>; DOMAIN_SIZE]; DOMAIN_SIZE];

/// Sums and differences for every pair of in-domain exponents.
///
/// Derived from [`add_exponents`] and [`sub_exponents`], so a lookup always
/// agrees with evaluating them directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExponentTable {
    sums: Grid,
    differences: Grid,
}

impl ExponentTable {
    pub fn generate() -> Self {
        let mut sums = [[None; DOMAIN_SIZE]; DOMAIN_SIZE];
        let mut differences = [[None; DOMAIN_SIZE]; DOMAIN_SIZE];
        for a in Exponent::domain() {
            for b in Exponent::domain() {
                sums[a.index()][b.index()] = add_exponents(a, b).ok();
                differences[a.index()][b.index()] = sub_exponents(a, b).ok();
            }
        }
        Self { sums, differences }
    }

    pub fn sum(&self, a: Exponent, b: Exponent) -> Result<Exponent, ArithmeticError> {
        self.sums[a.index()][b.index()].ok_or_else(|| {
            ArithmeticError::new(ExponentOp::Add, a.into(), b.into(), a.0 as i64 + b.0 as i64)
        })
    }

    pub fn difference(&self, a: Exponent, b: Exponent) -> Result<Exponent, ArithmeticError> {
        self.differences[a.index()][b.index()].ok_or_else(|| {
            ArithmeticError::new(ExponentOp::Sub, a.into(), b.into(), a.0 as i64 - b.0 as i64)
        })
    }

    /// Answer `a op b`; scaling is not tabled and is evaluated directly
    pub fn lookup(
        &self,
        op: ExponentOp,
        a: Exponent,
        b: Exponent,
    ) -> Result<Exponent, ArithmeticError> {
        match op {
            ExponentOp::Add => self.sum(a, b),
            ExponentOp::Sub => self.difference(a, b),
            ExponentOp::Scale => scale_exponent(a, b.get().into()),
        }
    }

    /// Every table row: all sums, then all differences, each ordered by
    /// left operand then right operand.
    pub fn entries(&self) -> impl Iterator<Item = TableEntry> + '_ {
        grid_rows(ExponentOp::Add, &self.sums).chain(grid_rows(ExponentOp::Sub, &self.differences))
    }
}

fn grid_rows(op: ExponentOp, grid: &Grid) -> impl Iterator<Item = TableEntry> + '_ {
    Exponent::domain().flat_map(move |lhs| {
        Exponent::domain().map(move |rhs| TableEntry {
            op,
            lhs,
            rhs,
            result: grid[lhs.index()][rhs.index()],
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exp(value: i64) -> Exponent {
        Exponent::new(value).unwrap()
    }

    #[test]
    fn test_domain() {
        let domain: Vec<i8> = Exponent::domain().map(Exponent::get).collect();
        assert_eq!(domain, vec![-4, -3, -2, -1, 0, 1, 2, 3, 4]);
        assert_eq!(DOMAIN_SIZE, 9);
        assert!(is_exponent(-4));
        assert!(is_exponent(0));
        assert!(!is_exponent(5));
        assert!(!is_exponent(-5));
        assert!(!is_exponent(i64::MAX));
        assert_eq!(Exponent::new(7), None);
    }

    #[test]
    fn test_literal() {
        assert_eq!(Exponent::lit::<3>(), exp(3));
        assert_eq!(Exponent::lit::<-4>(), Exponent::MIN);
    }

    #[test]
    fn test_add_and_sub_are_total() {
        for a in Exponent::domain() {
            for b in Exponent::domain() {
                let sum = a.get() as i64 + b.get() as i64;
                match add_exponents(a, b) {
                    Ok(r) => assert_eq!(r.get() as i64, sum),
                    Err(err) => {
                        assert!(!is_exponent(sum));
                        assert_eq!(err.result, sum);
                        assert_eq!(err.op, ExponentOp::Add);
                    }
                }

                let diff = a.get() as i64 - b.get() as i64;
                match sub_exponents(a, b) {
                    Ok(r) => assert_eq!(r.get() as i64, diff),
                    Err(err) => {
                        assert!(!is_exponent(diff));
                        assert_eq!(
                            (err.lhs, err.rhs, err.result),
                            (i64::from(a), i64::from(b), diff)
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(add_exponents(exp(4), exp(0)), Ok(exp(4)));
        assert_eq!(add_exponents(exp(4), exp(-4)), Ok(exp(0)));
        assert!(add_exponents(exp(4), exp(1)).is_err());
        assert!(add_exponents(exp(-4), exp(-1)).is_err());
        assert_eq!(sub_exponents(exp(-4), exp(-4)), Ok(exp(0)));
        assert!(sub_exponents(exp(0), exp(-4)).is_ok());
        assert!(sub_exponents(exp(-1), exp(4)).is_err());
    }

    #[test]
    fn test_scale() {
        assert_eq!(scale_exponent(exp(0), i32::MAX), Ok(Exponent::ZERO));
        assert_eq!(scale_exponent(exp(4), 0), Ok(Exponent::ZERO));
        assert_eq!(scale_exponent(exp(-3), 1), Ok(exp(-3)));
        assert_eq!(scale_exponent(exp(2), 2), Ok(exp(4)));
        assert_eq!(scale_exponent(exp(-2), -2), Ok(exp(4)));
        assert_eq!(scale_exponent(exp(1), -4), Ok(exp(-4)));

        let err = scale_exponent(exp(4), 2).unwrap_err();
        assert_eq!(err, ArithmeticError::new(ExponentOp::Scale, 4, 2, 8));

        let err = scale_exponent(exp(-4), i32::MIN).unwrap_err();
        assert_eq!(err.result, -4 * i32::MIN as i64);
    }

    #[test]
    fn test_table_agrees_with_direct_evaluation() {
        let table = ExponentTable::generate();
        for a in Exponent::domain() {
            for b in Exponent::domain() {
                assert_eq!(table.sum(a, b), add_exponents(a, b));
                assert_eq!(table.difference(a, b), sub_exponents(a, b));
                assert_eq!(table.lookup(ExponentOp::Add, a, b), add_exponents(a, b));
                assert_eq!(table.lookup(ExponentOp::Sub, a, b), sub_exponents(a, b));
            }
        }
    }

    #[test]
    fn test_table_entries() {
        let table = ExponentTable::generate();
        let entries: Vec<TableEntry> = table.entries().collect();
        assert_eq!(entries.len(), 2 * DOMAIN_SIZE * DOMAIN_SIZE);

        assert_eq!(
            entries[0],
            TableEntry {
                op: ExponentOp::Add,
                lhs: Exponent::MIN,
                rhs: Exponent::MIN,
                result: None,
            }
        );
        let last = entries[entries.len() - 1];
        assert_eq!(last.op, ExponentOp::Sub);
        assert_eq!(
            (last.lhs, last.rhs, last.result),
            (Exponent::MAX, Exponent::MAX, Some(Exponent::ZERO))
        );

        // Valid results form a band around the anti-diagonal
        let valid_sums = entries
            .iter()
            .filter(|e| e.op == ExponentOp::Add && e.result.is_some())
            .count();
        assert_eq!(valid_sums, 61);
    }

    #[test]
    fn test_lookup_scale() {
        let table = ExponentTable::generate();
        assert_eq!(table.lookup(ExponentOp::Scale, exp(2), exp(-2)), Ok(exp(-4)));
        assert!(table.lookup(ExponentOp::Scale, exp(3), exp(2)).is_err());
    }
}
