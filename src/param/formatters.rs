//! Value formatters, keyed by the descriptor option that enables them.

use super::core::Param;
use super::options::{OptionKey, OptionValue};
use crate::types::Scalar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    DefaultValue,
    Trim,
}

impl Formatter {
    pub const ALL: [Self; 2] = [Self::DefaultValue, Self::Trim];

    #[must_use]
    pub fn for_key(key: OptionKey) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    #[must_use]
    pub const fn key(self) -> OptionKey {
        match self {
            Self::DefaultValue => OptionKey::DefaultValue,
            Self::Trim => OptionKey::Trim,
        }
    }

    #[must_use]
    pub fn apply(self, option: &OptionValue, value: Scalar, param: &Param) -> Scalar {
        match self {
            Self::DefaultValue => default_value(option, value, param),
            Self::Trim => trim(option, value, param),
        }
    }
}

/// Replaces a nil, NaN or empty value with the configured default.
#[must_use]
pub fn default_value(default: &OptionValue, value: Scalar, _param: &Param) -> Scalar {
    match default.as_scalar() {
        Some(d) if value.is_blank() => d.clone(),
        _ => value,
    }
}

/// Strips surrounding whitespace from strings when enabled.
#[must_use]
pub fn trim(trim: &OptionValue, value: Scalar, _param: &Param) -> Scalar {
    match value {
        Scalar::String(s) if trim.is_truthy() => Scalar::String(s.trim().to_owned()),
        other => other,
    }
}
