//! Arbitrary-magnitude decimal numbers.
//!
//! Incremental games outgrow `f64` quickly, so every resource value in this
//! crate is a [`Decimal`]. Values whose base-10 exponent sits in
//! `[-299, 299]` are stored as a plain `f64` and use IEEE arithmetic
//! directly, which keeps small integer math exact. Anything outside that
//! band is stored as `mantissa * 10^exponent` with `1 <= |mantissa| < 10`
//! and an integral `f64` exponent, giving magnitudes up to `10^(1.79e308)`.
//!
//! NaN is a first-class state: it is produced by undefined operations
//! (`log` of a non-positive value, `0 * inf`, `inf - inf`) and propagates
//! through every later operation. It is never clamped to zero, so display
//! code can show an error indicator instead of a misleading number.

use core::cmp::Ordering;
use core::fmt;
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use core::str::FromStr;

use crate::error::ParseDecimalError;

/// Exponents with absolute value above this are stored in split form.
const FLOAT_EXPONENT_LIMIT: f64 = 299.0;
/// Addends further apart than this many orders of magnitude do not interact.
const MAX_SIGNIFICANT_DIGITS: f64 = 17.0;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Repr {
    /// Zero, NaN, infinities and every finite value with exponent in range.
    Float(f64),
    /// Finite, non-zero value outside the `f64` band.
    Split { mantissa: f64, exponent: f64 },
}

/// A signed number of (almost) unbounded magnitude.
///
/// Each value has exactly one representation, so the derived equality is
/// value equality (NaN is unequal to everything, including itself).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decimal(Repr);

impl Decimal {
    pub const ZERO: Self = Self(Repr::Float(0.0));
    pub const ONE: Self = Self(Repr::Float(1.0));
    pub const TWO: Self = Self(Repr::Float(2.0));
    pub const TEN: Self = Self(Repr::Float(10.0));
    pub const NAN: Self = Self(Repr::Float(f64::NAN));
    pub const INFINITY: Self = Self(Repr::Float(f64::INFINITY));
    pub const NEG_INFINITY: Self = Self(Repr::Float(f64::NEG_INFINITY));

    /// Wraps an `f64`, keeping it bit-exact when it fits the float band.
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() || value == 0.0 {
            return Self(Repr::Float(value));
        }
        let (mantissa, exponent) = split(value);
        if in_float_band(exponent) {
            Self(Repr::Float(value))
        } else {
            Self(Repr::Split { mantissa, exponent })
        }
    }

    /// Builds `mantissa * 10^exponent`, normalizing both parts.
    pub fn from_parts(mantissa: f64, exponent: f64) -> Self {
        if mantissa.is_nan() || exponent.is_nan() {
            return Self::NAN;
        }
        if mantissa == 0.0 || exponent == f64::NEG_INFINITY {
            return Self::ZERO;
        }
        if mantissa.is_infinite() || exponent == f64::INFINITY {
            return Self::signed_infinity(mantissa < 0.0);
        }

        let (mut mantissa, shift) = split(mantissa);
        let mut exponent = exponent + shift;
        let whole = exponent.floor();
        if whole != exponent {
            mantissa *= 10f64.powf(exponent - whole);
            exponent = whole;
            if mantissa.abs() >= 10.0 {
                mantissa /= 10.0;
                exponent += 1.0;
            }
        }
        if exponent.is_infinite() {
            return Self::signed_infinity(mantissa < 0.0);
        }

        if in_float_band(exponent) {
            Self(Repr::Float(scale10(mantissa, exponent)))
        } else {
            Self(Repr::Split { mantissa, exponent })
        }
    }

    /// Builds `±10^log`.
    fn from_log10(log: f64, negative: bool) -> Self {
        if log.is_nan() {
            return Self::NAN;
        }
        if log == f64::NEG_INFINITY {
            return Self::ZERO;
        }
        if log == f64::INFINITY {
            return Self::signed_infinity(negative);
        }
        let sign = if negative { -1.0 } else { 1.0 };
        if log.abs() < FLOAT_EXPONENT_LIMIT {
            return Self::from_f64(sign * 10f64.powf(log));
        }
        let exponent = log.floor();
        Self::from_parts(sign * 10f64.powf(log - exponent), exponent)
    }

    fn signed_infinity(negative: bool) -> Self {
        if negative { Self::NEG_INFINITY } else { Self::INFINITY }
    }

    /// Normalized `(mantissa, exponent)`; `(0, 0)` for zero, NaN for NaN.
    pub fn parts(&self) -> (f64, f64) {
        match self.0 {
            Repr::Float(value) if value == 0.0 => (0.0, 0.0),
            Repr::Float(value) if !value.is_finite() => (value, 0.0),
            Repr::Float(value) => split(value),
            Repr::Split { mantissa, exponent } => (mantissa, exponent),
        }
    }

    pub fn mantissa(&self) -> f64 {
        self.parts().0
    }

    pub fn exponent(&self) -> f64 {
        self.parts().1
    }

    /// Nearest `f64`; saturates to `±inf` or `0` outside the `f64` range.
    pub fn to_f64(&self) -> f64 {
        match self.0 {
            Repr::Float(value) => value,
            Repr::Split { mantissa, exponent } => {
                if exponent > 308.0 {
                    mantissa * f64::INFINITY
                } else if exponent < -324.0 {
                    0.0
                } else {
                    scale10(mantissa, exponent)
                }
            }
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self.0, Repr::Float(value) if value.is_nan())
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self.0, Repr::Float(value) if value.is_infinite())
    }

    pub fn is_finite(&self) -> bool {
        !self.is_nan() && !self.is_infinite()
    }

    pub fn is_zero(&self) -> bool {
        matches!(self.0, Repr::Float(value) if value == 0.0)
    }

    /// `-1`, `0` or `1`; NaN for NaN.
    pub fn signum(&self) -> f64 {
        match self.0 {
            Repr::Float(value) if value.is_nan() => f64::NAN,
            Repr::Float(value) if value == 0.0 => 0.0,
            Repr::Float(value) => value.signum(),
            Repr::Split { mantissa, .. } => mantissa.signum(),
        }
    }

    pub fn is_sign_negative(&self) -> bool {
        self.signum() < 0.0
    }

    pub fn abs(self) -> Self {
        match self.0 {
            Repr::Float(value) => Self(Repr::Float(value.abs())),
            Repr::Split { mantissa, exponent } => Self(Repr::Split {
                mantissa: mantissa.abs(),
                exponent,
            }),
        }
    }

    pub fn recip(self) -> Self {
        Self::ONE / self
    }

    /// `self ^ power`. Negative bases accept only integral powers.
    pub fn pow(self, power: Decimal) -> Self {
        if self.is_nan() || power.is_nan() {
            return Self::NAN;
        }
        if power.is_zero() {
            return Self::ONE;
        }
        let p = power.to_f64();

        if let Repr::Float(base) = self.0 {
            let result = base.powf(p);
            let overflowed = result.is_infinite() && base.is_finite() && p.is_finite();
            let underflowed = result == 0.0 && base != 0.0 && p.is_finite();
            if !overflowed && !underflowed {
                return Self::from_f64(result);
            }
        }

        if self.is_zero() {
            return if p > 0.0 { Self::ZERO } else { Self::INFINITY };
        }
        let negative = if self.is_sign_negative() {
            if p.fract() != 0.0 {
                return Self::NAN;
            }
            (p % 2.0).abs() == 1.0
        } else {
            false
        };
        if self.is_infinite() {
            return if p > 0.0 {
                Self::signed_infinity(negative)
            } else {
                Self::ZERO
            };
        }
        Self::from_log10(self.abs().log10_f64() * p, negative)
    }

    pub fn powf(self, power: f64) -> Self {
        self.pow(Self::from_f64(power))
    }

    /// `base ^ self`.
    pub fn pow_base(self, base: Decimal) -> Self {
        base.pow(self)
    }

    pub fn sqrt(self) -> Self {
        match self.0 {
            Repr::Float(value) => Self::from_f64(value.sqrt()),
            Repr::Split { mantissa, .. } if mantissa < 0.0 => Self::NAN,
            Repr::Split { mantissa, exponent } => {
                if exponent.rem_euclid(2.0) == 0.0 {
                    Self::from_parts(mantissa.sqrt(), exponent / 2.0)
                } else {
                    Self::from_parts((mantissa * 10.0).sqrt(), (exponent - 1.0) / 2.0)
                }
            }
        }
    }

    /// Base-10 logarithm as a plain float; NaN for non-positive input.
    pub fn log10_f64(&self) -> f64 {
        if self.is_nan() || self.signum() <= 0.0 {
            return f64::NAN;
        }
        match self.0 {
            Repr::Float(value) => value.log10(),
            Repr::Split { mantissa, exponent } => exponent + mantissa.log10(),
        }
    }

    pub fn log10(self) -> Self {
        Self::from_f64(self.log10_f64())
    }

    pub fn log(self, base: Decimal) -> Self {
        Self::from_f64(self.log10_f64() / base.log10_f64())
    }

    pub fn ln(self) -> Self {
        Self::from_f64(self.log10_f64() * core::f64::consts::LN_10)
    }

    pub fn floor(self) -> Self {
        self.integral(f64::floor)
    }

    pub fn ceil(self) -> Self {
        self.integral(f64::ceil)
    }

    pub fn round(self) -> Self {
        self.integral(f64::round)
    }

    pub fn trunc(self) -> Self {
        self.integral(f64::trunc)
    }

    fn integral(self, op: fn(f64) -> f64) -> Self {
        match self.0 {
            Repr::Float(value) => Self::from_f64(op(value)),
            // Huge split values have no fractional digits left.
            Repr::Split { exponent, .. } if exponent > 0.0 => self,
            // Tiny split values sit strictly between -1 and 1.
            Repr::Split { mantissa, .. } => Self::from_f64(op(mantissa * 1e-300)),
        }
    }

    /// Larger of the two; NaN if either is NaN.
    pub fn max(self, other: Decimal) -> Self {
        match self.partial_cmp(&other) {
            None => Self::NAN,
            Some(Ordering::Less) => other,
            Some(_) => self,
        }
    }

    /// Smaller of the two; NaN if either is NaN.
    pub fn min(self, other: Decimal) -> Self {
        match self.partial_cmp(&other) {
            None => Self::NAN,
            Some(Ordering::Greater) => other,
            Some(_) => self,
        }
    }

    /// Text form that parses back to the identical value.
    pub fn to_exact_string(&self) -> String {
        match self.0 {
            Repr::Float(value) if value.is_nan() => "NaN".to_owned(),
            Repr::Float(value) if value.is_infinite() => infinity_text(value < 0.0).to_owned(),
            Repr::Float(value) => format!("{value:e}"),
            Repr::Split { mantissa, exponent } => format!("{mantissa}e{exponent}"),
        }
    }

    fn add_impl(self, rhs: Decimal) -> Self {
        if let (Repr::Float(a), Repr::Float(b)) = (self.0, rhs.0) {
            return Self::from_f64(a + b);
        }
        if self.is_nan() || rhs.is_nan() {
            return Self::NAN;
        }
        // Only one side can be a (float) infinity here.
        if self.is_infinite() {
            return self;
        }
        if rhs.is_infinite() {
            return rhs;
        }
        if self.is_zero() {
            return rhs;
        }
        if rhs.is_zero() {
            return self;
        }
        let (big, small) = if self.exponent() >= rhs.exponent() {
            (self.parts(), rhs.parts())
        } else {
            (rhs.parts(), self.parts())
        };
        let gap = big.1 - small.1;
        if gap > MAX_SIGNIFICANT_DIGITS {
            return Self::from_parts(big.0, big.1);
        }
        Self::from_parts(big.0 + scale10(small.0, -gap), big.1)
    }

    fn mul_impl(self, rhs: Decimal) -> Self {
        if let (Repr::Float(a), Repr::Float(b)) = (self.0, rhs.0) {
            let product = a * b;
            let escaped = a.is_finite()
                && b.is_finite()
                && a != 0.0
                && b != 0.0
                && (product == 0.0 || product.is_infinite());
            if !escaped {
                return Self::from_f64(product);
            }
        }
        if self.is_nan() || rhs.is_nan() {
            return Self::NAN;
        }
        let negative = self.is_sign_negative() != rhs.is_sign_negative();
        if self.is_infinite() || rhs.is_infinite() {
            if self.is_zero() || rhs.is_zero() {
                return Self::NAN;
            }
            return Self::signed_infinity(negative);
        }
        if self.is_zero() || rhs.is_zero() {
            return Self::ZERO;
        }
        let (am, ae) = self.parts();
        let (bm, be) = rhs.parts();
        Self::from_parts(am * bm, ae + be)
    }

    fn div_impl(self, rhs: Decimal) -> Self {
        if let (Repr::Float(a), Repr::Float(b)) = (self.0, rhs.0) {
            let quotient = a / b;
            let escaped = a.is_finite()
                && b.is_finite()
                && a != 0.0
                && b != 0.0
                && (quotient == 0.0 || quotient.is_infinite());
            if !escaped {
                return Self::from_f64(quotient);
            }
        }
        if self.is_nan() || rhs.is_nan() {
            return Self::NAN;
        }
        let negative = self.is_sign_negative() != rhs.is_sign_negative();
        if rhs.is_zero() {
            return if self.is_zero() {
                Self::NAN
            } else {
                Self::signed_infinity(self.is_sign_negative())
            };
        }
        if self.is_infinite() {
            return if rhs.is_infinite() {
                Self::NAN
            } else {
                Self::signed_infinity(negative)
            };
        }
        if rhs.is_infinite() || self.is_zero() {
            return Self::ZERO;
        }
        let (am, ae) = self.parts();
        let (bm, be) = rhs.parts();
        Self::from_parts(am / bm, ae - be)
    }
}

fn in_float_band(exponent: f64) -> bool {
    exponent.abs() <= FLOAT_EXPONENT_LIMIT
}

fn infinity_text(negative: bool) -> &'static str {
    if negative { "-Infinity" } else { "Infinity" }
}

/// `value * 10^power` for integral `power`, dividing for negative powers so
/// that exact quotients like `400000 / 10^5` stay exact.
fn scale10(mut value: f64, mut power: f64) -> f64 {
    while power > 300.0 {
        value *= 1e300;
        power -= 300.0;
    }
    while power < -300.0 {
        value /= 1e300;
        power += 300.0;
    }
    if power >= 0.0 {
        value * 10f64.powi(power as i32)
    } else {
        value / 10f64.powi((-power) as i32)
    }
}

/// Splits a finite non-zero float into `(mantissa, exponent)`.
fn split(value: f64) -> (f64, f64) {
    let mut exponent = value.abs().log10().floor();
    let mut mantissa = scale10(value, -exponent);
    if mantissa.abs() >= 10.0 {
        mantissa /= 10.0;
        exponent += 1.0;
    } else if mantissa.abs() < 1.0 {
        mantissa *= 10.0;
        exponent -= 1.0;
    }
    (mantissa, exponent)
}

impl Default for Decimal {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_nan() || other.is_nan() {
            return None;
        }
        let (a_sign, b_sign) = (self.signum(), other.signum());
        if a_sign != b_sign {
            return a_sign.partial_cmp(&b_sign);
        }
        if a_sign == 0.0 {
            return Some(Ordering::Equal);
        }
        let magnitude = compare_magnitude(self, other);
        Some(if a_sign > 0.0 { magnitude } else { magnitude.reverse() })
    }
}

fn compare_magnitude(a: &Decimal, b: &Decimal) -> Ordering {
    if let (Repr::Float(x), Repr::Float(y)) = (a.0, b.0) {
        return x.abs().partial_cmp(&y.abs()).unwrap_or(Ordering::Equal);
    }
    match (a.is_infinite(), b.is_infinite()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }
    let (am, ae) = a.parts();
    let (bm, be) = b.parts();
    ae.partial_cmp(&be)
        .unwrap_or(Ordering::Equal)
        .then(am.abs().partial_cmp(&bm.abs()).unwrap_or(Ordering::Equal))
}

impl PartialEq<f64> for Decimal {
    fn eq(&self, other: &f64) -> bool {
        *self == Decimal::from_f64(*other)
    }
}

impl PartialOrd<f64> for Decimal {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.partial_cmp(&Decimal::from_f64(*other))
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        match self.0 {
            Repr::Float(value) => Self(Repr::Float(-value)),
            Repr::Split { mantissa, exponent } => Self(Repr::Split {
                mantissa: -mantissa,
                exponent,
            }),
        }
    }
}

macro_rules! forward_binop {
    ($op:ident, $method:ident, $assign:ident, $assign_method:ident, $imp:expr) => {
        impl $op for Decimal {
            type Output = Decimal;

            fn $method(self, rhs: Decimal) -> Decimal {
                $imp(self, rhs)
            }
        }

        impl $op<f64> for Decimal {
            type Output = Decimal;

            fn $method(self, rhs: f64) -> Decimal {
                $imp(self, Decimal::from_f64(rhs))
            }
        }

        impl $assign for Decimal {
            fn $assign_method(&mut self, rhs: Decimal) {
                *self = $imp(*self, rhs);
            }
        }

        impl $assign<f64> for Decimal {
            fn $assign_method(&mut self, rhs: f64) {
                *self = $imp(*self, Decimal::from_f64(rhs));
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign, Decimal::add_impl);
forward_binop!(Sub, sub, SubAssign, sub_assign, |a: Decimal, b: Decimal| a
    .add_impl(-b));
forward_binop!(Mul, mul, MulAssign, mul_assign, Decimal::mul_impl);
forward_binop!(Div, div, DivAssign, div_assign, Decimal::div_impl);

impl Sum for Decimal {
    fn sum<I: Iterator<Item = Decimal>>(iter: I) -> Self {
        iter.fold(Decimal::ZERO, |acc, x| acc + x)
    }
}

impl Product for Decimal {
    fn product<I: Iterator<Item = Decimal>>(iter: I) -> Self {
        iter.fold(Decimal::ONE, |acc, x| acc * x)
    }
}

impl From<f64> for Decimal {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Decimal {
            fn from(value: $ty) -> Self {
                Self::from_f64(value as f64)
            }
        }
    )*};
}

from_integer!(f32, i32, i64, u32, u64, usize);

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::Float(value) if value.is_nan() => f.write_str("NaN"),
            Repr::Float(value) if value.is_infinite() => f.write_str(infinity_text(value < 0.0)),
            Repr::Float(value) if value == 0.0 || (1e-7..1e21).contains(&value.abs()) => {
                write!(f, "{value}")
            }
            Repr::Float(value) => write!(f, "{value:e}"),
            Repr::Split { mantissa, exponent } => write!(f, "{mantissa}e{exponent}"),
        }
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        match text {
            "NaN" => return Ok(Self::NAN),
            "Infinity" | "+Infinity" => return Ok(Self::INFINITY),
            "-Infinity" => return Ok(Self::NEG_INFINITY),
            _ => {}
        }
        let whole = text.parse::<f64>();
        if let Ok(value) = whole {
            // Zero may be an underflow of a tiny split value; let the
            // mantissa/exponent path below decide.
            if value != 0.0 && value.is_finite() && in_float_band(split(value).1) {
                return Ok(Self::from_f64(value));
            }
        }
        if let Some((mantissa, exponent)) = text.rsplit_once(['e', 'E']) {
            if let (Ok(mantissa), Ok(exponent)) = (mantissa.parse::<f64>(), exponent.parse::<f64>())
            {
                return Ok(Self::from_parts(mantissa, exponent));
            }
        }
        whole
            .map(Self::from_f64)
            .map_err(|_| ParseDecimalError::new(text))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_exact_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Decimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DecimalVisitor;

        impl serde::de::Visitor<'_> for DecimalVisitor {
            type Value = Decimal;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number or a decimal string such as \"1.5e300\"")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Decimal, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Decimal, E> {
                Ok(Decimal::from_f64(v))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Decimal, E> {
                Ok(Decimal::from(v))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Decimal, E> {
                Ok(Decimal::from(v))
            }
        }

        deserializer.deserialize_any(DecimalVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_normalizes_mantissa_into_unit_decade() {
        for value in [1.0, 9.999, 10.0, 400000.0, 0.00123, -7.5e42] {
            let (m, e) = split(value);
            assert!((1.0..10.0).contains(&m.abs()), "mantissa {m} for {value}");
            assert_eq!(e, value.abs().log10().floor(), "exponent for {value}");
        }
    }

    #[test]
    fn scale10_divides_for_negative_powers() {
        assert_eq!(scale10(400000.0, -5.0), 4.0);
        assert_eq!(scale10(4.0, 5.0), 400000.0);
    }

    #[test]
    fn float_band_boundary_switches_representation() {
        assert!(matches!(Decimal::from_f64(9e299).0, Repr::Float(_)));
        assert!(matches!(Decimal::from_f64(1e300).0, Repr::Split { .. }));
        assert!(matches!(Decimal::from_parts(1.0, 299.0).0, Repr::Float(_)));
    }
}
