//! Value validators, keyed by the descriptor option that enables them.

use super::core::Param;
use super::options::{OptionKey, OptionValue};
use crate::types::Scalar;
use crate::utils::num::format_number;

/// Outcome of one validator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    Max,
    Min,
    Required,
}

impl Validator {
    pub const ALL: [Self; 3] = [Self::Max, Self::Min, Self::Required];

    #[must_use]
    pub fn for_key(key: OptionKey) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.key() == key)
    }

    #[must_use]
    pub const fn key(self) -> OptionKey {
        match self {
            Self::Max => OptionKey::Max,
            Self::Min => OptionKey::Min,
            Self::Required => OptionKey::Required,
        }
    }

    #[must_use]
    pub fn check(self, option: &OptionValue, value: &Scalar, param: &Param) -> Validation {
        match self {
            Self::Max => max(option, value, param),
            Self::Min => min(option, value, param),
            Self::Required => required(option, value, param),
        }
    }
}

#[must_use]
pub fn required(required: &OptionValue, value: &Scalar, param: &Param) -> Validation {
    Validation {
        valid: !required.is_truthy() || !value.is_blank(),
        message: format!("{} is required", param.name()),
    }
}

#[must_use]
pub fn min(min: &OptionValue, value: &Scalar, param: &Param) -> Validation {
    let bound = min.as_bound().unwrap_or(f64::NAN);
    Validation {
        valid: value.is_nil() || value.to_number() >= bound,
        message: format!(
            "{} must be greater than or equal to {}",
            param.name(),
            format_number(bound)
        ),
    }
}

#[must_use]
pub fn max(max: &OptionValue, value: &Scalar, param: &Param) -> Validation {
    let bound = max.as_bound().unwrap_or(f64::NAN);
    Validation {
        valid: value.is_nil() || value.to_number() <= bound,
        message: format!("{} must be lower than or equal to {}", param.name(), format_number(bound)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param::ParamOptions;

    fn owner() -> Param {
        Param::new("limit", Scalar::Nil, ParamOptions::new())
    }

    #[test]
    fn required_rejects_blank_values() {
        let p = owner();
        let on = OptionValue::Flag(true);
        assert!(!required(&on, &Scalar::Nil, &p).valid);
        assert!(!required(&on, &Scalar::from(""), &p).valid);
        assert!(!required(&on, &Scalar::Number(f64::NAN), &p).valid);
        assert!(required(&on, &Scalar::Boolean(false), &p).valid);
        assert!(required(&OptionValue::Flag(false), &Scalar::Nil, &p).valid);
        assert_eq!(required(&on, &Scalar::Nil, &p).message, "limit is required");
    }

    #[test]
    fn bounds_are_vacuous_for_nil() {
        let p = owner();
        assert!(min(&OptionValue::Bound(10.0), &Scalar::Nil, &p).valid);
        assert!(max(&OptionValue::Bound(10.0), &Scalar::Nil, &p).valid);
    }

    #[test]
    fn bounds_compare_numerically() {
        let p = owner();
        let lo = OptionValue::Bound(1.0);
        let hi = OptionValue::Bound(100.0);
        assert!(min(&lo, &Scalar::Number(1.0), &p).valid);
        assert!(!min(&lo, &Scalar::Number(0.0), &p).valid);
        assert!(!min(&lo, &Scalar::Number(f64::NAN), &p).valid);
        assert!(max(&hi, &Scalar::Number(100.0), &p).valid);
        assert!(!max(&hi, &Scalar::Number(101.0), &p).valid);
        assert_eq!(
            max(&hi, &Scalar::Number(101.0), &p).message,
            "limit must be lower than or equal to 100"
        );
        assert_eq!(
            min(&lo, &Scalar::Number(0.0), &p).message,
            "limit must be greater than or equal to 1"
        );
    }
}
