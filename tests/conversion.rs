// tests/conversion.rs
#![cfg(feature = "system-conversion")]

use idle_prestige::lens;
use idle_prestige::mechanics::Decimal;
use idle_prestige::systems::conversion::Conversion;
use idle_prestige::systems::formula::Formula;
use idle_prestige::systems::resource::Resource;

struct Bank {
    cash: Resource,
    rp: Resource,
}

impl Bank {
    fn with_cash(cash: f64) -> Self {
        let mut bank = Self {
            cash: Resource::new("cash", 0.0),
            rp: Resource::new("rp", 0.0),
        };
        bank.cash.set(Decimal::from(cash));
        bank
    }
}

/// `sqrt(cash / 100000)`
fn sqrt_conversion() -> Conversion<Bank> {
    Conversion::new(
        lens!(Bank => cash),
        lens!(Bank => rp),
        Formula::variable().div(100_000.0).sqrt(),
    )
}

#[test]
fn sqrt_gain_and_next_threshold() {
    let conversion = sqrt_conversion();
    let bank = Bank::with_cash(400_000.0);

    assert_eq!(conversion.actual_gain(&bank), Decimal::from(2));
    assert_eq!(conversion.next_at(&bank), Decimal::from(900_000));
}

#[test]
fn next_at_round_trips_through_the_formula() {
    let conversions = [
        sqrt_conversion(),
        Conversion::new(
            lens!(Bank => cash),
            lens!(Bank => rp),
            Formula::variable().div(500_000.0).pow(0.3),
        ),
        Conversion::new(
            lens!(Bank => cash),
            lens!(Bank => rp),
            Formula::variable().div(1e14).log(100.0).pow(2.4),
        ),
    ];
    let cash_levels = [1e6, 3.3e7, 7.5e12, 2e15, 4.2e21];

    for (which, conversion) in conversions.iter().enumerate() {
        for cash in cash_levels {
            let bank = Bank::with_cash(cash);
            let actual = conversion.actual_gain(&bank);
            if !actual.is_finite() {
                continue;
            }
            let next = conversion.next_at(&bank);
            let reached = conversion.gain_at(&bank, next);
            assert!(
                reached >= actual + Decimal::ONE,
                "#{which} at {cash}: gain at next_at {next} is {reached}, want >= {actual} + 1"
            );

            let below = next - next.abs() * 1e-9;
            assert!(
                conversion.gain_at(&bank, below).floor() <= actual,
                "#{which} at {cash}: just below next_at already gains more than {actual}"
            );
        }
    }
}

#[test]
fn convert_grants_gain_without_touching_base() {
    let conversion = sqrt_conversion();
    let mut bank = Bank::with_cash(1_000_000.0);

    let granted = conversion.convert(&mut bank);
    assert_eq!(granted, Decimal::from(3), "floor(sqrt(10))");
    assert_eq!(bank.rp.value(), Decimal::from(3));
    assert_eq!(bank.cash.value(), Decimal::from(1_000_000));
}

#[test]
fn undefined_formula_propagates_nan() {
    // log of a value below 1e14 is negative, and a negative base to 2.4 is undefined.
    let conversion = Conversion::new(
        lens!(Bank => cash),
        lens!(Bank => rp),
        Formula::variable().div(1e14).log(100.0).pow(2.4),
    );
    let mut bank = Bank::with_cash(1e10);

    assert!(conversion.actual_gain(&bank).is_nan());
    assert!(conversion.next_at(&bank).is_nan());
    assert!(conversion.convert(&mut bank).is_nan());
    assert_eq!(bank.rp.value(), Decimal::ZERO, "NaN gain is never granted");
}

#[test]
fn gain_below_one_floors_to_zero() {
    let conversion = sqrt_conversion();
    let bank = Bank::with_cash(50_000.0);
    assert_eq!(conversion.actual_gain(&bank), Decimal::ZERO);
    assert_eq!(conversion.next_at(&bank), Decimal::from(100_000));
}
