//! Human-readable number formatting for presentation layers.
//!
//! Notation switches on magnitude: plain decimals below `1e4`, comma-grouped
//! integers up to `1e9`, scientific `m.mme<exp>` up to `1e1000`, and a bare
//! logarithmic `e<log10>` beyond that.

use super::decimal::Decimal;

/// Digits shown after the decimal point when no precision is given.
pub const DEFAULT_PRECISION: usize = 2;

const COMMA_THRESHOLD: f64 = 1e4;
const SCIENTIFIC_THRESHOLD: f64 = 1e9;
/// `log10` of the value above which only the exponent is shown.
const LOGARITHMIC_LOG10: f64 = 1000.0;

/// Formats `value` with `precision` fractional digits, picking the notation
/// from its magnitude. NaN renders as `"NaN"`.
pub fn format(value: Decimal, precision: usize) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_sign_negative() {
        return format!("-{}", format(-value, precision));
    }
    if value.is_infinite() {
        return "Infinity".to_owned();
    }
    if value.log10_f64() >= LOGARITHMIC_LOG10 {
        return format_log(value, precision);
    }
    if value >= SCIENTIFIC_THRESHOLD {
        return format_sci(value, precision);
    }
    if value >= COMMA_THRESHOLD {
        return comma_format(value, precision.saturating_sub(2));
    }
    regular_format(value, precision)
}

/// Formats a count: no fractional digits unless the value is a small fraction.
pub fn format_whole(value: Decimal) -> String {
    if value.is_sign_negative() {
        return format!("-{}", format_whole(-value));
    }
    if value >= COMMA_THRESHOLD || (value <= 0.98 && !value.is_zero()) {
        return format(value, DEFAULT_PRECISION);
    }
    format(value, 0)
}

/// Scientific notation with a truncated (not rounded) mantissa.
pub fn format_sci(value: Decimal, precision: usize) -> String {
    if !value.is_finite() {
        return format(value, precision);
    }
    if value.is_zero() {
        return format!("{:.*}e0", precision, 0.0);
    }
    let (mantissa, exponent) = value.parts();
    let scale = 10f64.powi(precision as i32);
    let mantissa = (mantissa * scale).trunc() / scale;
    format!(
        "{:.*}e{}",
        precision,
        mantissa,
        format_whole(Decimal::from_f64(exponent))
    )
}

/// Comma-grouped integer part with `precision` fractional digits.
pub fn comma_format(value: Decimal, precision: usize) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.abs() < 0.001 {
        return format!("{:.*}", precision, 0.0);
    }
    let text = format!("{:.*}", precision, value.to_f64());
    let (sign, text) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text, None),
    };
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

fn regular_format(value: Decimal, precision: usize) -> String {
    let x = value.to_f64();
    if x.abs() < 0.0001 {
        return format!("{:.*}", precision, 0.0);
    }
    let precision = if x.abs() < 0.1 && precision != 0 {
        let needed = (-x.abs().log10()).ceil() as usize;
        precision.max(needed)
    } else {
        precision
    };
    format!("{x:.precision$}")
}

fn format_log(value: Decimal, precision: usize) -> String {
    let scale = 10f64.powi(precision as i32);
    let log = (value.log10_f64() * scale).trunc() / scale;
    format!("e{}", format(Decimal::from_f64(log), precision))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(comma_format(Decimal::from(1234567.0), 0), "1,234,567");
        assert_eq!(comma_format(Decimal::from(999.0), 0), "999");
        assert_eq!(comma_format(Decimal::from(12345.678), 1), "12,345.7");
    }

    #[test]
    fn small_fractions_get_extra_digits() {
        assert_eq!(regular_format(Decimal::from(0.005), 2), "0.005");
        assert_eq!(regular_format(Decimal::from(0.00001), 2), "0.00");
    }
}
