use crate::utils::num::{f64_to_bson, format_number, parse_number};
use bson::{Bson, doc};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Coercion target for a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Number,
    Boolean,
    Date,
    Pattern,
}

impl ValueType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Pattern => "pattern",
        }
    }
}

/// A single resolved query value.
///
/// `Number(NaN)` marks an unparseable number and `Date(None)` an unparseable date;
/// neither is an error until a validator looks at it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Scalar {
    #[default]
    Nil,
    String(String),
    Number(f64),
    Boolean(bool),
    Date(Option<DateTime<Utc>>),
    /// Case-insensitive pattern source.
    Pattern(String),
}

impl Scalar {
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    #[must_use]
    pub fn is_nan(&self) -> bool {
        matches!(self, Self::Number(n) if n.is_nan())
    }

    /// Nil, NaN or the empty string: the values a default replaces and `required` rejects.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Nil => true,
            Self::Number(n) => n.is_nan(),
            Self::String(s) => s.is_empty(),
            _ => false,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Pattern(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric view used by bound checks: booleans count as 0/1, dates as epoch millis.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Boolean(b) => f64::from(u8::from(*b)),
            Self::String(s) => parse_number(s),
            Self::Date(Some(d)) => d.timestamp_millis() as f64,
            Self::Nil | Self::Date(None) | Self::Pattern(_) => f64::NAN,
        }
    }

    /// Textual form of the value, `None` for nil.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Nil => None,
            Self::String(s) | Self::Pattern(s) => Some(s.clone()),
            Self::Number(n) => Some(format_number(*n)),
            Self::Boolean(b) => Some(b.to_string()),
            Self::Date(Some(d)) => Some(d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Self::Date(None) => Some("Invalid Date".to_string()),
        }
    }

    #[must_use]
    pub fn to_bson(&self) -> Bson {
        match self {
            Self::Nil | Self::Date(None) => Bson::Null,
            Self::String(s) => Bson::String(s.clone()),
            Self::Number(n) => f64_to_bson(*n),
            Self::Boolean(b) => Bson::Boolean(*b),
            Self::Date(Some(d)) => Bson::DateTime(bson::DateTime::from_millis(d.timestamp_millis())),
            Self::Pattern(p) => Bson::Document(doc! { "$regex": p.clone(), "$options": "i" }),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Some(s) => f.write_str(&s),
            None => f.write_str("null"),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Nil | Self::Date(None) => serializer.serialize_none(),
            Self::Number(n) => match f64_to_bson(*n) {
                Bson::Int32(i) => serializer.serialize_i32(i),
                Bson::Int64(i) => serializer.serialize_i64(i),
                _ => serializer.serialize_f64(*n),
            },
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::String(s) | Self::Pattern(s) => serializer.serialize_str(s),
            Self::Date(Some(_)) => serializer.serialize_str(&self.to_text().unwrap_or_default()),
        }
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Date(Some(v))
    }
}

impl<T: Into<Self>> From<Option<T>> for Scalar {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Nil, Into::into)
    }
}

/// A parameter value: one scalar, or the ordered list produced by comma-separated input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

impl Default for ParamValue {
    fn default() -> Self {
        Self::Scalar(Scalar::Nil)
    }
}

impl ParamValue {
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Scalar(Scalar::Nil))
    }

    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Scalar]> {
        match self {
            Self::List(items) => Some(items),
            Self::Scalar(_) => None,
        }
    }

    /// Every element, a scalar being a list of one.
    #[must_use]
    pub fn elements(&self) -> &[Scalar] {
        match self {
            Self::Scalar(s) => std::slice::from_ref(s),
            Self::List(items) => items,
        }
    }

    #[must_use]
    pub fn to_bson(&self) -> Bson {
        match self {
            Self::Scalar(s) => s.to_bson(),
            Self::List(items) => Bson::Array(items.iter().map(Scalar::to_bson).collect()),
        }
    }
}

macro_rules! scalar_param_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for ParamValue {
                fn from(v: $t) -> Self {
                    Self::Scalar(Scalar::from(v))
                }
            }
        )*
    };
}

scalar_param_value!(&str, String, f64, i32, bool, DateTime<Utc>, Option<&str>, Option<String>);

impl From<Scalar> for ParamValue {
    fn from(v: Scalar) -> Self {
        Self::Scalar(v)
    }
}

impl From<Vec<Scalar>> for ParamValue {
    fn from(v: Vec<Scalar>) -> Self {
        Self::List(v)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(v: Vec<&str>) -> Self {
        Self::List(v.into_iter().map(Scalar::from).collect())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(v: Vec<String>) -> Self {
        Self::List(v.into_iter().map(Scalar::from).collect())
    }
}

/// Named partition of the output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Cursor,
    Select,
    Filter,
}

impl Bucket {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cursor => "cursor",
            Self::Select => "select",
            Self::Filter => "filter",
        }
    }
}

impl FromStr for Bucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cursor" => Ok(Self::Cursor),
            "select" => Ok(Self::Select),
            "filter" => Ok(Self::Filter),
            other => Err(format!("unknown bucket: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values() {
        assert!(Scalar::Nil.is_blank());
        assert!(Scalar::Number(f64::NAN).is_blank());
        assert!(Scalar::from("").is_blank());
        assert!(!Scalar::from(" ").is_blank());
        assert!(!Scalar::Number(0.0).is_blank());
        assert!(!Scalar::Boolean(false).is_blank());
    }

    #[test]
    fn text_and_bson_forms() {
        assert_eq!(Scalar::Number(1.0).to_text().as_deref(), Some("1"));
        assert_eq!(Scalar::Boolean(true).to_text().as_deref(), Some("true"));
        assert_eq!(Scalar::Nil.to_text(), None);
        assert_eq!(Scalar::Number(1.0).to_bson(), Bson::Int32(1));
        assert_eq!(
            Scalar::Pattern("ab".into()).to_bson(),
            Bson::Document(doc! { "$regex": "ab", "$options": "i" })
        );
        assert_eq!(Scalar::Date(None).to_bson(), Bson::Null);
    }

    #[test]
    fn list_elements_and_serialization() {
        let v = ParamValue::from(vec!["a", "b"]);
        assert_eq!(v.elements().len(), 2);
        assert_eq!(serde_json::to_value(&v).unwrap(), serde_json::json!(["a", "b"]));
        let n = ParamValue::from(30);
        assert_eq!(serde_json::to_value(&n).unwrap(), serde_json::json!(30));
        assert_eq!(ParamValue::default().elements(), &[Scalar::Nil]);
    }

    #[test]
    fn bucket_names_round_trip() {
        for b in [Bucket::Cursor, Bucket::Select, Bucket::Filter] {
            assert_eq!(b.as_str().parse::<Bucket>(), Ok(b));
        }
        assert!("other".parse::<Bucket>().is_err());
    }
}
