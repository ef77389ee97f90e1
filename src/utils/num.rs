//! Numeric utilities: parsing, formatting and conversions for query numbers.
//!
//! Guidelines
//! - Query numbers are carried as `f64`; NaN marks an unparseable number and is never an error here.
//! - Prefer saturating conversions when a number leaves the query layer (e.g., limit/skip to `usize`).
//! - Integral values are emitted as the narrowest BSON integer that holds them.

use bson::Bson;

const I64_BOUND: f64 = 9_223_372_036_854_775_807.0;

/// Returns true when `s` is a finite decimal number literal with no surrounding whitespace.
#[must_use]
pub fn is_decimal_literal(s: &str) -> bool {
    if s.is_empty() || s.trim() != s {
        return false;
    }
    let first = s.as_bytes()[0];
    if !(first.is_ascii_digit() || matches!(first, b'-' | b'+' | b'.')) {
        return false;
    }
    s.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Parses a number the lenient way URL inputs need: surrounding whitespace is ignored,
/// `0x` prefixes are hexadecimal and anything else that does not parse becomes NaN.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn parse_number(s: &str) -> f64 {
    let t = s.trim();
    if t.is_empty() {
        return f64::NAN;
    }
    if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).map_or(f64::NAN, |v| v as f64);
    }
    match t.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        Ok(v) if v.is_infinite() && t.trim_start_matches(['+', '-']) == "Infinity" => v,
        _ => f64::NAN,
    }
}

/// Formats a number without a trailing `.0` for integral values.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_number(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }
    if v.fract() == 0.0 && v.abs() < I64_BOUND {
        return format!("{}", v as i64);
    }
    format!("{v}")
}

/// Converts a query number into the narrowest BSON numeric that represents it exactly.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_bson(v: f64) -> Bson {
    if v.is_finite() && v.fract() == 0.0 {
        if v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX) {
            return Bson::Int32(v as i32);
        }
        if v.abs() < I64_BOUND {
            return Bson::Int64(v as i64);
        }
    }
    Bson::Double(v)
}

/// Reads any BSON numeric as `f64`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn bson_to_f64(v: &Bson) -> Option<f64> {
    match v {
        Bson::Int32(i) => Some(f64::from(*i)),
        Bson::Int64(i) => Some(*i as f64),
        Bson::Double(d) => Some(*d),
        _ => None,
    }
}

#[inline]
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn f64_to_usize_saturating(v: f64) -> usize {
    if !v.is_finite() || v <= 0.0 {
        0
    } else if v >= usize::MAX as f64 {
        usize::MAX
    } else {
        v as usize
    }
}
