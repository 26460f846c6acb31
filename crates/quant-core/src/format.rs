//! Human-readable rendering of unit vectors.
//!
//! The output is a stable display contract: positive and negative exponents
//! are grouped, each group is sorted by symbol, and a mixed unit is rendered
//! as `numerator / denominator`, e.g. `kg * m / s^2` or `m / (kg * s^2)`.

use itertools::Itertools;

use crate::unit::UnitVector;

fn render_term(symbol: &str, exponent: i8) -> String {
    if exponent == 1 {
        symbol.to_string()
    } else {
        format!("{symbol}^{exponent}")
    }
}

fn render_group(terms: &[(&str, i8)]) -> String {
    terms
        .iter()
        .map(|&(symbol, exponent)| render_term(symbol, exponent))
        .join(" * ")
}

/// Render `unit`; the dimensionless unit renders as the empty string
pub fn format_unit(unit: &UnitVector) -> String {
    let (mut numerator, mut denominator): (Vec<(&str, i8)>, Vec<(&str, i8)>) = unit
        .symbols()
        .map(|(symbol, exponent)| (symbol, exponent.get()))
        .filter(|&(_, exponent)| exponent != 0)
        .partition(|&(_, exponent)| exponent > 0);
    numerator.sort();
    denominator.sort();

    match (numerator.is_empty(), denominator.is_empty()) {
        (true, true) => String::new(),
        (false, true) => render_group(&numerator),
        // Nothing to divide from: keep the negative exponents as they are
        (true, false) => render_group(&denominator),
        (false, false) => {
            let positive: Vec<(&str, i8)> = denominator
                .iter()
                .map(|&(symbol, exponent)| (symbol, -exponent))
                .collect();
            let rendered = render_group(&positive);
            if positive.len() > 1 {
                format!("{} / ({})", render_group(&numerator), rendered)
            } else {
                format!("{} / {}", render_group(&numerator), rendered)
            }
        }
    }
}

/// Like [`format_unit`], but names the empty unit `dimensionless`
pub fn describe_unit(unit: &UnitVector) -> String {
    if unit.is_dimensionless() {
        "dimensionless".to_string()
    } else {
        format_unit(unit)
    }
}
