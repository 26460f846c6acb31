//! Unit vectors: sparse maps from dimension name to [`Exponent`].
//!
//! A unit vector is always kept in canonical form: dimensions whose exponent
//! is zero are never stored, so equality is plain map equality over
//! `(dimension, exponent)` pairs. Each dimension also carries a display symbol
//! that only the formatter looks at.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;
use std::{fmt, ops};

use crate::error::{ArithmeticError, ParseError};
use crate::exponent::{Exponent, add_exponents, scale_exponent, sub_exponents};
use crate::format::format_unit;

/// The seven SI base dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaseDimension {
    Length,
    Mass,
    Time,
    Current,
    Temperature,
    Amount,
    Luminosity,
}

impl BaseDimension {
    pub const ALL: [BaseDimension; 7] = [
        BaseDimension::Length,
        BaseDimension::Mass,
        BaseDimension::Time,
        BaseDimension::Current,
        BaseDimension::Temperature,
        BaseDimension::Amount,
        BaseDimension::Luminosity,
    ];

    pub const fn symbol(self) -> &'static str {
        match self {
            BaseDimension::Length => "m",
            BaseDimension::Mass => "kg",
            BaseDimension::Time => "s",
            BaseDimension::Current => "A",
            BaseDimension::Temperature => "K",
            BaseDimension::Amount => "mol",
            BaseDimension::Luminosity => "cd",
        }
    }

    pub const fn quantity(self) -> &'static str {
        match self {
            BaseDimension::Length => "Length",
            BaseDimension::Mass => "Mass",
            BaseDimension::Time => "Time",
            BaseDimension::Current => "Current",
            BaseDimension::Temperature => "Temperature",
            BaseDimension::Amount => "Amount",
            BaseDimension::Luminosity => "Luminosity",
        }
    }
}

impl fmt::Display for BaseDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.quantity())
    }
}

impl From<BaseDimension> for UnitVector {
    fn from(dimension: BaseDimension) -> Self {
        UnitVector::base(dimension.symbol())
    }
}

#[derive(Clone, Debug)]
struct Term {
    exponent: Exponent,
    symbol: Arc<str>,
}

/// A derived unit's shape, e.g. `{kg: 1, m: 1, s: -2}`.
///
/// Cloning is cheap: the dimension map is shared until an operation builds a
/// new one.
#[derive(Clone, Default)]
pub struct UnitVector {
    terms: Arc<BTreeMap<Arc<str>, Term>>,
}

impl UnitVector {
    pub fn dimensionless() -> Self {
        Self::default()
    }

    /// A single user-declared dimension with exponent 1, displayed as its name
    pub fn base(name: impl Into<Arc<str>>) -> Self {
        let name = name.into();
        let term = Term {
            exponent: Exponent::ONE,
            symbol: name.clone(),
        };
        Self {
            terms: Arc::new(BTreeMap::from([(name, term)])),
        }
    }

    /// Build from `(dimension, exponent)` pairs. Repeated dimensions are
    /// combined, so `[("m", 3), ("m", 2)]` fails just like `m^3 * m^2`.
    pub fn new<I, S>(dimensions: I) -> Result<Self, ArithmeticError>
    where
        I: IntoIterator<Item = (S, Exponent)>,
        S: Into<Arc<str>>,
    {
        let mut terms: BTreeMap<Arc<str>, Term> = BTreeMap::new();
        for (name, exponent) in dimensions {
            let name = name.into();
            let exponent = match terms.get(&name) {
                Some(existing) => add_exponents(existing.exponent, exponent)
                    .map_err(|err| err.in_dimension(name.to_string()))?,
                None => exponent,
            };
            terms.insert(
                name.clone(),
                Term {
                    exponent,
                    symbol: name,
                },
            );
        }
        terms.retain(|_, term| !term.exponent.is_zero());
        Ok(Self {
            terms: Arc::new(terms),
        })
    }

    /// Replace the display symbol of `dimension`; a no-op when the dimension
    /// is absent.
    pub fn with_symbol(&self, dimension: &str, symbol: impl Into<Arc<str>>) -> Self {
        if !self.terms.contains_key(dimension) {
            return self.clone();
        }
        let mut terms = (*self.terms).clone();
        if let Some(term) = terms.get_mut(dimension) {
            term.symbol = symbol.into();
        }
        Self {
            terms: Arc::new(terms),
        }
    }

    pub fn exponent(&self, dimension: &str) -> Exponent {
        self.terms
            .get(dimension)
            .map_or(Exponent::ZERO, |term| term.exponent)
    }

    pub fn symbol(&self, dimension: &str) -> Option<&str> {
        self.terms.get(dimension).map(|term| &*term.symbol)
    }

    /// `(dimension, exponent)` pairs in dimension order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Exponent)> {
        self.terms
            .iter()
            .map(|(name, term)| (&**name, term.exponent))
    }

    /// `(symbol, exponent)` pairs, as the formatter sees them
    pub fn symbols(&self) -> impl Iterator<Item = (&str, Exponent)> {
        self.terms
            .values()
            .map(|term| (&*term.symbol, term.exponent))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_dimensionless(&self) -> bool {
        self.terms.is_empty()
    }

    /// Units are compatible when their canonical forms are equal
    pub fn is_compatible(&self, other: &UnitVector) -> bool {
        self == other
    }

    /// Pointwise sum of exponents
    pub fn multiply(&self, other: &UnitVector) -> Result<UnitVector, ArithmeticError> {
        if other.is_dimensionless() {
            return Ok(self.clone());
        }
        self.combine(other, add_exponents)
    }

    /// Pointwise difference of exponents
    pub fn divide(&self, other: &UnitVector) -> Result<UnitVector, ArithmeticError> {
        if other.is_dimensionless() {
            return Ok(self.clone());
        }
        self.combine(other, sub_exponents)
    }

    /// Scale every exponent by `k`; `k = 0` yields the dimensionless unit
    pub fn powi(&self, k: i32) -> Result<UnitVector, ArithmeticError> {
        match k {
            0 => Ok(Self::dimensionless()),
            1 => Ok(self.clone()),
            _ => {
                let mut terms = BTreeMap::new();
                for (name, term) in self.terms.iter() {
                    let exponent = scale_exponent(term.exponent, k)
                        .map_err(|err| err.in_dimension(name.to_string()))?;
                    terms.insert(
                        name.clone(),
                        Term {
                            exponent,
                            symbol: term.symbol.clone(),
                        },
                    );
                }
                Ok(Self {
                    terms: Arc::new(terms),
                })
            }
        }
    }

    fn combine(
        &self,
        other: &UnitVector,
        op: fn(Exponent, Exponent) -> Result<Exponent, ArithmeticError>,
    ) -> Result<UnitVector, ArithmeticError> {
        let mut terms = (*self.terms).clone();
        for (name, rhs) in other.terms.iter() {
            let lhs = self.exponent(name);
            let exponent =
                op(lhs, rhs.exponent).map_err(|err| err.in_dimension(name.to_string()))?;
            if exponent.is_zero() {
                terms.remove(name);
                continue;
            }
            let symbol = self
                .terms
                .get(name)
                .map_or_else(|| rhs.symbol.clone(), |term| term.symbol.clone());
            terms.insert(name.clone(), Term { exponent, symbol });
        }
        let result = Self {
            terms: Arc::new(terms),
        };
        log::trace!("combined units {self} and {other} into {result}");
        Ok(result)
    }
}

/// `u * v`: fails naming the dimension whose exponent leaves the domain
pub fn multiply_units(u: &UnitVector, v: &UnitVector) -> Result<UnitVector, ArithmeticError> {
    u.multiply(v)
}

/// `u / v`
pub fn divide_units(u: &UnitVector, v: &UnitVector) -> Result<UnitVector, ArithmeticError> {
    u.divide(v)
}

/// `u ^ k`
pub fn exponentiate_unit(u: &UnitVector, k: i32) -> Result<UnitVector, ArithmeticError> {
    u.powi(k)
}

pub fn is_compatible(u: &UnitVector, v: &UnitVector) -> bool {
    u.is_compatible(v)
}

impl PartialEq for UnitVector {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.terms, &other.terms) || self.iter().eq(other.iter())
    }
}

impl Eq for UnitVector {}

impl Hash for UnitVector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for (name, exponent) in self.iter() {
            name.hash(state);
            exponent.hash(state);
        }
    }
}

impl fmt::Debug for UnitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl fmt::Display for UnitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_unit(self))
    }
}

impl ops::Mul for &UnitVector {
    type Output = Result<UnitVector, ArithmeticError>;
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(rhs)
    }
}

impl ops::Div for &UnitVector {
    type Output = Result<UnitVector, ArithmeticError>;
    fn div(self, rhs: Self) -> Self::Output {
        self.divide(rhs)
    }
}

impl FromStr for UnitVector {
    type Err = ParseError;

    /// Parses what the formatter emits (`kg * m / s^2`, `m / (kg * s^2)`,
    /// `s^-1`, the empty string) plus `1 / s` and `·` as a product separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "1" {
            return Ok(Self::dimensionless());
        }

        let (num, den) = match s.split_once('/') {
            None => (s, None),
            Some((lhs, rhs)) => (lhs.trim(), Some(rhs.trim())),
        };

        let mut unit = match num {
            "1" => Self::dimensionless(),
            _ => gather_terms(num, s)?,
        };
        if let Some(den) = den {
            if den.contains('/') {
                return Err(ParseError::InvalidFormat {
                    input: s.to_string(),
                });
            }
            let den = den
                .strip_prefix('(')
                .and_then(|d| d.strip_suffix(')'))
                .unwrap_or(den);
            unit = unit.divide(&gather_terms(den, s)?)?;
        }
        Ok(unit)
    }
}

/// Multiply together the terms of a product such as `kg * m^2`
fn gather_terms(list: &str, input: &str) -> Result<UnitVector, ParseError> {
    let invalid_format = || ParseError::InvalidFormat {
        input: input.to_string(),
    };

    let mut acc = UnitVector::dimensionless();
    for token in list.split(['*', '·']).map(str::trim) {
        if token.is_empty() {
            return Err(invalid_format());
        }
        let (symbol, exponent) = match token.split_once('^') {
            Some((symbol, exponent)) => (symbol.trim(), parse_exponent(exponent.trim())?),
            None => (token, Exponent::ONE),
        };
        if !is_symbol(symbol) {
            return Err(ParseError::InvalidSymbol {
                token: symbol.to_string(),
            });
        }
        acc = acc.multiply(&UnitVector::new([(symbol, exponent)])?)?;
    }
    Ok(acc)
}

fn parse_exponent(token: &str) -> Result<Exponent, ParseError> {
    token
        .parse::<i64>()
        .ok()
        .and_then(Exponent::new)
        .ok_or_else(|| ParseError::InvalidExponent {
            token: token.to_string(),
        })
}

fn is_symbol(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
