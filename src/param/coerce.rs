use crate::types::{Scalar, ValueType};
use crate::utils::num::is_decimal_literal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
const NAIVE_DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%B %d, %Y"];

/// Classifies a value. The order of the checks matters: a numeric string is a
/// number before it can be a boolean-like `1`/`0`.
#[must_use]
pub fn infer_type(value: &Scalar) -> ValueType {
    match value {
        Scalar::Nil => ValueType::String,
        Scalar::Number(_) => ValueType::Number,
        Scalar::String(s) if is_decimal_literal(s) => ValueType::Number,
        Scalar::Boolean(_) => ValueType::Boolean,
        Scalar::String(s) if is_boolean_literal(s) => ValueType::Boolean,
        Scalar::Date(_) => ValueType::Date,
        Scalar::Pattern(_) => ValueType::Pattern,
        Scalar::String(_) => ValueType::String,
    }
}

fn is_boolean_literal(s: &str) -> bool {
    matches!(s, "true" | "false")
}

/// Converts a value to `ty`. Nil is never coerced, and coercion never fails:
/// bad numbers become NaN and bad dates the invalid-date sentinel.
#[must_use]
pub fn coerce(value: Scalar, ty: ValueType) -> Scalar {
    if value.is_nil() {
        return value;
    }
    match ty {
        ValueType::Pattern => to_pattern(value),
        ValueType::Date => Scalar::Date(to_date(&value)),
        ValueType::Boolean => Scalar::Boolean(to_bool(&value)),
        ValueType::Number => Scalar::Number(value.to_number()),
        ValueType::String => match value {
            Scalar::String(s) => Scalar::String(s),
            other => Scalar::String(other.to_text().unwrap_or_default()),
        },
    }
}

fn to_pattern(value: Scalar) -> Scalar {
    match value {
        Scalar::String(s) | Scalar::Pattern(s) => Scalar::Pattern(s),
        other => Scalar::Pattern(other.to_text().unwrap_or_default()),
    }
}

fn to_bool(value: &Scalar) -> bool {
    match value {
        Scalar::Nil => false,
        Scalar::String(s) => !(s.is_empty() || s == "false" || s == "0"),
        Scalar::Number(n) => !(*n == 0.0 || n.is_nan()),
        Scalar::Boolean(b) => *b,
        Scalar::Date(_) | Scalar::Pattern(_) => true,
    }
}

fn to_date(value: &Scalar) -> Option<DateTime<Utc>> {
    match value {
        Scalar::Date(d) => *d,
        Scalar::String(s) if s.len() >= 5 && s.bytes().all(|b| b.is_ascii_digit()) => {
            s.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis)
        }
        Scalar::String(s) => parse_date(s),
        Scalar::Number(_) | Scalar::Boolean(_) => millis_to_date(value.to_number()),
        Scalar::Nil | Scalar::Pattern(_) => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn millis_to_date(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(ms.trunc() as i64)
}

/// Best-effort natural date parsing: RFC 3339, RFC 2822, then common naive layouts read as UTC.
fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(d) = DateTime::parse_from_rfc3339(s) {
        return Some(d.with_timezone(&Utc));
    }
    if let Ok(d) = DateTime::parse_from_rfc2822(s) {
        return Some(d.with_timezone(&Utc));
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(d) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(d.and_utc());
        }
    }
    for fmt in NAIVE_DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    #[test]
    fn inference_order() {
        assert_eq!(infer_type(&Scalar::Nil), ValueType::String);
        assert_eq!(infer_type(&Scalar::from("1")), ValueType::Number);
        assert_eq!(infer_type(&Scalar::from("0")), ValueType::Number);
        assert_eq!(infer_type(&Scalar::from("2.5")), ValueType::Number);
        assert_eq!(infer_type(&Scalar::from("true")), ValueType::Boolean);
        assert_eq!(infer_type(&Scalar::from("false")), ValueType::Boolean);
        assert_eq!(infer_type(&Scalar::Boolean(false)), ValueType::Boolean);
        assert_eq!(infer_type(&Scalar::Date(None)), ValueType::Date);
        assert_eq!(infer_type(&Scalar::Pattern("x".into())), ValueType::Pattern);
        assert_eq!(infer_type(&Scalar::from("12/02/2015")), ValueType::String);
        assert_eq!(infer_type(&Scalar::from("TRUE")), ValueType::String);
    }

    #[test]
    fn boolean_coercion() {
        assert_eq!(coerce(Scalar::from("false"), ValueType::Boolean), Scalar::Boolean(false));
        assert_eq!(coerce(Scalar::from("0"), ValueType::Boolean), Scalar::Boolean(false));
        assert_eq!(coerce(Scalar::from(""), ValueType::Boolean), Scalar::Boolean(false));
        assert_eq!(coerce(Scalar::from("no"), ValueType::Boolean), Scalar::Boolean(true));
        assert_eq!(coerce(Scalar::Number(0.0), ValueType::Boolean), Scalar::Boolean(false));
    }

    #[test]
    fn number_coercion_never_fails() {
        assert_eq!(coerce(Scalar::from("30"), ValueType::Number), Scalar::Number(30.0));
        assert!(coerce(Scalar::from("abc"), ValueType::Number).is_nan());
        assert_eq!(coerce(Scalar::Boolean(true), ValueType::Number), Scalar::Number(1.0));
        assert_eq!(coerce(Scalar::Nil, ValueType::Number), Scalar::Nil);
    }

    #[test]
    fn date_coercion() {
        let epoch = coerce(Scalar::from("86400000"), ValueType::Date);
        assert_eq!(epoch, Scalar::Date(Utc.timestamp_millis_opt(86_400_000).single()));
        let iso = coerce(Scalar::from("2015-12-02T10:00:00Z"), ValueType::Date);
        assert_eq!(iso, Scalar::Date(Utc.with_ymd_and_hms(2015, 12, 2, 10, 0, 0).single()));
        match coerce(Scalar::from("12/02/2015"), ValueType::Date) {
            Scalar::Date(Some(d)) => assert_eq!((d.year(), d.month(), d.day()), (2015, 12, 2)),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(coerce(Scalar::from("not a date"), ValueType::Date), Scalar::Date(None));
    }

    #[test]
    fn string_and_pattern_coercion() {
        assert_eq!(coerce(Scalar::Number(30.0), ValueType::String), Scalar::from("30"));
        assert_eq!(coerce(Scalar::from("ab"), ValueType::Pattern), Scalar::Pattern("ab".into()));
    }
}
