use super::core::{Param, ParamLookup};
use crate::types::{Bucket, ParamValue, Scalar, ValueType};
use crate::utils::num::format_number;
use bson::Document;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Descriptor option keys.
///
/// The derived ordering is the ascending key order in which formatters and
/// validators run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionKey {
    BindTo,
    DefaultValue,
    Max,
    Min,
    Opts,
    Parse,
    Required,
    Trim,
    Type,
}

impl OptionKey {
    pub const ALL: [Self; 9] = [
        Self::BindTo,
        Self::DefaultValue,
        Self::Max,
        Self::Min,
        Self::Opts,
        Self::Parse,
        Self::Required,
        Self::Trim,
        Self::Type,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BindTo => "bindTo",
            Self::DefaultValue => "defaultValue",
            Self::Max => "max",
            Self::Min => "min",
            Self::Opts => "opts",
            Self::Parse => "parse",
            Self::Required => "required",
            Self::Trim => "trim",
            Self::Type => "type",
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown option: {s}"))
    }
}

/// Signature of a parse strategy: resolved value, owning parameter, read-only siblings.
pub type ParseFn = dyn Fn(&ParamValue, &Param, &dyn ParamLookup) -> Option<Document> + Send + Sync;

/// Named parse strategy turning a resolved value into an output fragment.
#[derive(Clone)]
pub struct Parser {
    name: String,
    func: Arc<ParseFn>,
}

impl Parser {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&ParamValue, &Param, &dyn ParamLookup) -> Option<Document> + Send + Sync + 'static,
    {
        Self { name: name.into(), func: Arc::new(func) }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(
        &self,
        value: &ParamValue,
        param: &Param,
        siblings: &dyn ParamLookup,
    ) -> Option<Document> {
        (self.func)(value, param, siblings)
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Parser").field(&self.name).finish()
    }
}

#[derive(Debug, Clone)]
pub enum OptionValue {
    Type(ValueType),
    Value(Scalar),
    Flag(bool),
    Bound(f64),
    Bucket(Bucket),
    Operators(Vec<char>),
    Parser(Parser),
}

impl OptionValue {
    #[must_use]
    pub const fn as_type(&self) -> Option<ValueType> {
        match self {
            Self::Type(t) => Some(*t),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Truthiness of a flag option; any other option kind counts as set.
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        match self {
            Self::Flag(b) => *b,
            _ => true,
        }
    }

    #[must_use]
    pub fn as_bound(&self) -> Option<f64> {
        match self {
            Self::Bound(n) => Some(*n),
            Self::Value(v) => Some(v.to_number()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bucket(&self) -> Option<Bucket> {
        match self {
            Self::Bucket(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_operators(&self) -> Option<&[char]> {
        match self {
            Self::Operators(ops) => Some(ops),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_parser(&self) -> Option<&Parser> {
        match self {
            Self::Parser(p) => Some(p),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(t) => f.write_str(t.as_str()),
            Self::Value(v) => write!(f, "{v}"),
            Self::Flag(b) => write!(f, "{b}"),
            Self::Bound(n) => f.write_str(&format_number(*n)),
            Self::Bucket(b) => f.write_str(b.as_str()),
            Self::Operators(ops) => f.write_str(&ops.iter().collect::<String>()),
            Self::Parser(p) => f.write_str(p.name()),
        }
    }
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => v.serialize(serializer),
            Self::Flag(b) => serializer.serialize_bool(*b),
            Self::Bound(n) => Scalar::Number(*n).serialize(serializer),
            Self::Type(t) => t.serialize(serializer),
            Self::Bucket(b) => b.serialize(serializer),
            Self::Operators(ops) => ops.serialize(serializer),
            Self::Parser(p) => serializer.serialize_str(p.name()),
        }
    }
}

/// Parameter descriptor: option key to option value, iterated in ascending key order.
#[derive(Debug, Clone, Default)]
pub struct ParamOptions {
    entries: BTreeMap<OptionKey, OptionValue>,
}

impl ParamOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: OptionKey) -> Option<&OptionValue> {
        self.entries.get(&key)
    }

    pub fn set(&mut self, key: OptionKey, value: OptionValue) -> Option<OptionValue> {
        self.entries.insert(key, value)
    }

    pub fn remove(&mut self, key: OptionKey) -> Option<OptionValue> {
        self.entries.remove(&key)
    }

    #[must_use]
    pub fn contains(&self, key: OptionKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (OptionKey, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    #[must_use]
    pub fn value_type(mut self, ty: ValueType) -> Self {
        self.set(OptionKey::Type, OptionValue::Type(ty));
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<Scalar>) -> Self {
        self.set(OptionKey::DefaultValue, OptionValue::Value(value.into()));
        self
    }

    #[must_use]
    pub fn trim(mut self, on: bool) -> Self {
        self.set(OptionKey::Trim, OptionValue::Flag(on));
        self
    }

    #[must_use]
    pub fn required(mut self, on: bool) -> Self {
        self.set(OptionKey::Required, OptionValue::Flag(on));
        self
    }

    #[must_use]
    pub fn min(mut self, bound: f64) -> Self {
        self.set(OptionKey::Min, OptionValue::Bound(bound));
        self
    }

    #[must_use]
    pub fn max(mut self, bound: f64) -> Self {
        self.set(OptionKey::Max, OptionValue::Bound(bound));
        self
    }

    #[must_use]
    pub fn bind_to(mut self, bucket: Bucket) -> Self {
        self.set(OptionKey::BindTo, OptionValue::Bucket(bucket));
        self
    }

    #[must_use]
    pub fn opts(mut self, ops: impl IntoIterator<Item = char>) -> Self {
        self.set(OptionKey::Opts, OptionValue::Operators(ops.into_iter().collect()));
        self
    }

    #[must_use]
    pub fn parser(mut self, parser: Parser) -> Self {
        self.set(OptionKey::Parse, OptionValue::Parser(parser));
        self
    }

    #[must_use]
    pub fn explicit_type(&self) -> Option<ValueType> {
        self.get(OptionKey::Type).and_then(OptionValue::as_type)
    }

    #[must_use]
    pub fn bucket(&self) -> Option<Bucket> {
        self.get(OptionKey::BindTo).and_then(OptionValue::as_bucket)
    }

    /// Recognized operator prefixes, empty when `opts` is not set.
    #[must_use]
    pub fn operators(&self) -> &[char] {
        self.get(OptionKey::Opts).and_then(OptionValue::as_operators).unwrap_or(&[])
    }

    #[must_use]
    pub fn parse_strategy(&self) -> Option<&Parser> {
        self.get(OptionKey::Parse).and_then(OptionValue::as_parser)
    }
}
