// tests/decimal.rs
use idle_prestige::mechanics::{format, format_sci, format_whole, Decimal};

fn big(mantissa: f64, exponent: f64) -> Decimal {
    Decimal::from_parts(mantissa, exponent)
}

/* ──────────────────────────────────────────────────────────────────────────
Arithmetic beyond f64
────────────────────────────────────────────────────────────────────────── */

#[test]
fn multiplication_past_f64_range() {
    assert_eq!(big(5.0, 300.0) * big(4.0, 400.0), big(2.0, 701.0));

    let squared = big(1.0, 300.0) * big(1.0, 300.0);
    assert!(squared.is_finite(), "1e600 is not infinity");
    assert_eq!(squared.parts(), (1.0, 600.0));
}

#[test]
fn addition_aligns_exponents() {
    assert_eq!(big(1.0, 400.0) + big(1.0, 400.0), big(2.0, 400.0));
    assert_eq!(big(1.0, 400.0) + Decimal::ONE, big(1.0, 400.0), "1 is lost at 1e400");
    assert_eq!(big(1.0, 400.0) - big(1.0, 400.0), Decimal::ZERO);
}

#[test]
fn ordering_across_representations() {
    assert!(big(1.0, 400.0) > big(9.0, 399.0));
    assert!(big(1.0, 400.0) > Decimal::from(1e300));
    assert!(-big(1.0, 400.0) < Decimal::ONE);
    assert!(-big(1.0, 400.0) < -big(1.0, 399.0));
    assert!(big(1.0, -400.0) > Decimal::ZERO);
    assert!(big(1.0, -400.0) < Decimal::from(1e-300));
    assert!(Decimal::INFINITY > big(1.0, 1e15));
}

#[test]
fn powers_and_roots() {
    let googolplex_ish = Decimal::TEN.pow(Decimal::from(1000));
    assert_eq!(googolplex_ish.parts(), (1.0, 1000.0));
    assert_eq!(big(4.0, 1000.0).sqrt(), big(2.0, 500.0));
    assert_eq!(Decimal::from(-2).pow(Decimal::from(3)), Decimal::from(-8));
    assert!(Decimal::from(-8).powf(1.0 / 3.0).is_nan(), "negative base, fractional power");
    assert_eq!(Decimal::from(3).pow_base(Decimal::TWO), Decimal::from(8));
    assert_eq!(Decimal::from(5).pow(Decimal::ZERO), Decimal::ONE);
}

#[test]
fn rounding_huge_and_tiny() {
    assert_eq!(big(1.5, 400.0).floor(), big(1.5, 400.0));
    assert_eq!(big(1.5, -400.0).floor(), Decimal::ZERO);
    assert_eq!(big(1.5, -400.0).ceil(), Decimal::ONE);
    assert_eq!(Decimal::from(2.7).floor(), Decimal::TWO);
}

#[test]
fn sums_and_products() {
    let values = [1.0, 2.0, 3.0].map(Decimal::from);
    assert_eq!(values.iter().copied().sum::<Decimal>(), Decimal::from(6));
    assert_eq!(values.iter().copied().product::<Decimal>(), Decimal::from(6));
}

/* ──────────────────────────────────────────────────────────────────────────
NaN and infinity never silently become numbers
────────────────────────────────────────────────────────────────────────── */

#[test]
fn undefined_operations_yield_nan() {
    assert!(Decimal::from(-1).log10().is_nan());
    assert!(Decimal::ZERO.log10().is_nan());
    assert!((Decimal::ZERO / Decimal::ZERO).is_nan());
    assert!((Decimal::INFINITY - Decimal::INFINITY).is_nan());
    assert!((Decimal::INFINITY * Decimal::ZERO).is_nan());
    assert_eq!(Decimal::ONE / Decimal::ZERO, Decimal::INFINITY);
}

#[test]
fn nan_propagates_and_compares_false() {
    let nan = Decimal::from(-1).log10();
    for result in [
        nan + Decimal::ONE,
        nan * Decimal::ZERO,
        nan.pow(Decimal::ZERO),
        nan.max(Decimal::ONE),
        Decimal::ONE.min(nan),
        nan.floor(),
        big(1.0, 400.0) * nan,
    ] {
        assert!(result.is_nan(), "got {result}");
    }
    assert!(!(nan < Decimal::ONE));
    assert!(!(nan >= Decimal::ONE));
    assert_ne!(nan, nan);
}

/* ──────────────────────────────────────────────────────────────────────────
Text forms
────────────────────────────────────────────────────────────────────────── */

#[test]
fn exact_string_parses_back() {
    for value in [
        Decimal::from(12.5),
        Decimal::from(0.1),
        Decimal::from(-3),
        big(1.5, 1000.0),
        big(-7.25, -512.0),
        Decimal::ZERO,
        Decimal::INFINITY,
        Decimal::NEG_INFINITY,
    ] {
        let text = value.to_exact_string();
        let parsed: Decimal = text.parse().expect("exact text parses");
        assert_eq!(parsed, value, "{text}");
    }
    let nan: Decimal = "NaN".parse().unwrap();
    assert!(nan.is_nan());
}

#[test]
fn parsing_accepts_plain_and_huge() {
    assert_eq!("  42 ".parse::<Decimal>().unwrap(), Decimal::from(42));
    assert_eq!("1.5e1000".parse::<Decimal>().unwrap(), big(1.5, 1000.0));
    assert_eq!("2E-400".parse::<Decimal>().unwrap(), big(2.0, -400.0));

    let err = "abc".parse::<Decimal>().unwrap_err();
    assert_eq!(err.input(), "abc");
}

#[test]
fn display_formats() {
    assert_eq!(Decimal::from(12.5).to_string(), "12.5");
    assert_eq!(big(1.5, 1000.0).to_string(), "1.5e1000");
    assert_eq!(Decimal::NAN.to_string(), "NaN");
    assert_eq!(Decimal::NEG_INFINITY.to_string(), "-Infinity");
}

#[test]
fn presentation_notation_by_magnitude() {
    assert_eq!(format(Decimal::from(1234.5678), 2), "1234.57");
    assert_eq!(format(Decimal::from(123_456), 2), "123,456");
    assert_eq!(format(Decimal::from(1.5e12), 2), "1.50e12");
    assert_eq!(format(big(1.234, 1500.0), 2), "e1500.09");
    assert_eq!(format(Decimal::from(-5), 2), "-5.00");
    assert_eq!(format(Decimal::NAN, 2), "NaN");
    assert_eq!(format(Decimal::INFINITY, 2), "Infinity");

    assert_eq!(format_sci(Decimal::from(9.999e20), 2), "9.99e20", "mantissa truncates");
    assert_eq!(format_whole(Decimal::from(42)), "42");
    assert_eq!(format_whole(Decimal::from(0.5)), "0.50");
}

#[cfg(feature = "serde")]
#[test]
fn serde_uses_exact_text_and_accepts_numbers() {
    let json = serde_json::to_string(&big(1.5, 1000.0)).unwrap();
    assert_eq!(json, "\"1.5e1000\"");
    let back: Decimal = serde_json::from_str(&json).unwrap();
    assert_eq!(back, big(1.5, 1000.0));

    assert_eq!(serde_json::from_str::<Decimal>("3").unwrap(), Decimal::from(3));
    assert_eq!(serde_json::from_str::<Decimal>("2.5").unwrap(), Decimal::from(2.5));
    assert!(serde_json::from_str::<Decimal>("\"NaN\"").unwrap().is_nan());
    assert!(serde_json::from_str::<Decimal>("\"cheese\"").is_err());
}
