use num_rational::Ratio;
use quant_core::exponent::{Exponent, add_exponents, sub_exponents};
use quant_core::unit::{divide_units, exponentiate_unit, is_compatible, multiply_units};
use quant_core::{
    BaseDimension, DecimalOps, F64Ops, Measure, MeasureError, RationalOps, UnitVector,
};
use rust_decimal_macros::dec;

fn unit(dims: &[(&str, i64)]) -> UnitVector {
    UnitVector::new(
        dims.iter()
            .map(|&(name, exp)| (name, Exponent::new(exp).unwrap())),
    )
    .unwrap()
}

/// A spread of units: dimensionless, single dimensions at the domain edges
/// and mixed shapes.
fn samples() -> Vec<UnitVector> {
    vec![
        UnitVector::dimensionless(),
        unit(&[("m", 1)]),
        unit(&[("m", 4)]),
        unit(&[("s", -4)]),
        unit(&[("m", 1), ("s", -1)]),
        unit(&[("kg", 1), ("m", 1), ("s", -2)]),
        unit(&[("kg", 1), ("m", 2), ("s", -3), ("A", -1)]),
        unit(&[("mol", -1), ("K", 2)]),
        unit(&[("cd", 3), ("m", -2)]),
    ]
}

#[test]
fn test_exponent_arithmetic_is_total() {
    for a in Exponent::domain() {
        for b in Exponent::domain() {
            for result in [add_exponents(a, b), sub_exponents(a, b)] {
                match result {
                    Ok(r) => assert!((-4..=4).contains(&r.get())),
                    Err(err) => assert!(!(-4..=4).contains(&err.result)),
                }
            }
        }
    }
}

#[test]
fn test_identity_laws() {
    let one = UnitVector::dimensionless();
    for u in samples() {
        assert_eq!(multiply_units(&u, &one).unwrap(), u);
        assert_eq!(exponentiate_unit(&u, 1).unwrap(), u);
        assert_eq!(exponentiate_unit(&u, 0).unwrap(), one);
    }
}

#[test]
fn test_inverse_laws() {
    for u in samples() {
        assert!(divide_units(&u, &u).unwrap().is_dimensionless());
        let inverse = exponentiate_unit(&u, -1).unwrap();
        assert!(multiply_units(&u, &inverse).unwrap().is_dimensionless());
    }
}

#[test]
fn test_commutativity_and_associativity() {
    let samples = samples();
    for u in &samples {
        for v in &samples {
            match (multiply_units(u, v), multiply_units(v, u)) {
                (Ok(uv), Ok(vu)) => assert_eq!(uv, vu),
                (Err(_), Err(_)) => {}
                (lhs, rhs) => panic!("asymmetric product: {lhs:?} vs {rhs:?}"),
            }
            for w in &samples {
                let left = multiply_units(u, v).and_then(|uv| multiply_units(&uv, w));
                let right = multiply_units(v, w).and_then(|vw| multiply_units(u, &vw));
                if let (Ok(left), Ok(right)) = (left, right) {
                    assert_eq!(left, right);
                }
            }
        }
    }
}

#[test]
fn test_compatibility_is_canonical_equality() {
    let sparse = unit(&[("m", 1)]);
    let dense = unit(&[("m", 1), ("s", 0)]);
    assert!(is_compatible(&sparse, &dense));
    assert!(!is_compatible(&sparse, &unit(&[("s", 1)])));
    assert!(is_compatible(
        &unit(&[("s", -2), ("m", 1)]),
        &unit(&[("m", 1), ("s", -2)])
    ));
}

#[test]
fn test_formatted_units_parse_back() {
    for u in samples() {
        let rendered = u.to_string();
        let parsed: UnitVector = rendered.parse().unwrap();
        assert_eq!(parsed, u, "round trip of '{rendered}'");
        assert_eq!(parsed.to_string(), rendered);
    }
}

#[test]
fn test_measure_round_trips() {
    let ops = F64Ops::shared();
    let m = Measure::new(&ops, 2.0, unit(&[("m", 1), ("s", -1)]));
    assert_eq!(m.negate().unwrap().negate().unwrap(), m);
    assert_eq!(m.inverse().unwrap().inverse().unwrap(), m);

    let ops = RationalOps::shared();
    let m = Measure::new(&ops, Ratio::new(3, 7), unit(&[("kg", 2)]));
    assert_eq!(m.negate().unwrap().negate().unwrap(), m);
    assert_eq!(m.inverse().unwrap().inverse().unwrap(), m);
    assert_eq!(m.inverse().unwrap().to_string(), "7/3 kg^-2");

    let extreme = Measure::new(&ops, Ratio::from_integer(i64::MIN), BaseDimension::Length);
    assert!(matches!(extreme.negate(), Err(MeasureError::Numeric(_))));
}

#[test]
fn test_compatibility_gating() {
    let ops = F64Ops::shared();
    let meters = Measure::new(&ops, 1.0, BaseDimension::Length);
    let seconds = Measure::new(&ops, 1.0, BaseDimension::Time);
    assert!(matches!(
        meters.plus(&seconds),
        Err(MeasureError::UnitMismatch(_))
    ));
    assert!(matches!(
        meters.compare(&seconds),
        Err(MeasureError::UnitMismatch(_))
    ));
}

#[test]
fn test_end_to_end() {
    let ops = F64Ops::shared();
    let meters = Measure::new(&ops, 1.0, UnitVector::base("m")).with_symbol("m");
    let seconds = Measure::new(&ops, 1.0, UnitVector::base("s")).with_symbol("s");

    let speed = meters.over(&seconds).unwrap();
    assert_eq!(speed.to_string(), "1 m / s");
    assert!(speed.times(&seconds).unwrap().is_eq(&meters).unwrap());
}

#[test]
fn test_derived_quantities() {
    let ops = DecimalOps::shared();
    let kilogram = Measure::new(&ops, dec!(1), BaseDimension::Mass);
    let meter = Measure::new(&ops, dec!(1), BaseDimension::Length);
    let second = Measure::new(&ops, dec!(1), BaseDimension::Time);

    let newton = kilogram
        .times(&meter)
        .and_then(|km| km.over(&second.squared()?))
        .unwrap()
        .with_symbol("N");
    assert_eq!(newton.to_string(), "1 kg * m / s^2");

    let force = newton.scale(&dec!(12.5)).unwrap();
    assert_eq!(force.in_unit(&newton).unwrap(), "12.5 N");

    let pressure = newton.over(&meter.squared().unwrap()).unwrap();
    assert_eq!(pressure.to_string(), "1 kg / (m * s^2)");
}

#[test]
fn test_boundary_exponentiation_fails() {
    let ops = F64Ops::shared();
    let at_max = Measure::new(&ops, 2.0, unit(&[("m", 4)]));
    let err = at_max.to_the(2).unwrap_err();
    let MeasureError::Arithmetic(err) = err else {
        panic!("expected an arithmetic error, got {err:?}");
    };
    assert_eq!(err.dimension.as_deref(), Some("m"));
    assert_eq!(err.result, 8);
    assert!(at_max.squared().is_err());
    assert!(at_max.times(&Measure::new(&ops, 1.0, BaseDimension::Length)).is_err());
}
