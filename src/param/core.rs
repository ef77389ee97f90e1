use super::coerce::{coerce, infer_type};
use super::formatters::Formatter;
use super::options::{OptionKey, OptionValue, ParamOptions};
use super::validators::Validator;
use crate::errors::ValidationError;
use crate::types::{ParamValue, Scalar, ValueType};
use bson::Document;

/// Splits list input (`a,b,c`).
pub const SEPARATOR: char = ',';

/// Read-only view of the parameters sharing a schema, used by parse strategies
/// that depend on a sibling's resolved value.
pub trait ParamLookup {
    fn param(&self, name: &str) -> Option<&Param>;
}

/// Lookup with no parameters, for parsing a standalone parameter.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSiblings;

impl ParamLookup for NoSiblings {
    fn param(&self, _name: &str) -> Option<&Param> {
        None
    }
}

impl ParamLookup for Vec<Param> {
    fn param(&self, name: &str) -> Option<&Param> {
        self.iter().find(|p| p.name() == name)
    }
}

/// One named query input with its own format/coerce/validate/parse pipeline.
///
/// The value is resolved in the constructor; `validate` and `parse` only read it.
#[derive(Debug, Clone)]
pub struct Param {
    name: String,
    options: ParamOptions,
    value: ParamValue,
}

impl Param {
    pub fn new(name: impl Into<String>, raw: impl Into<ParamValue>, options: ParamOptions) -> Self {
        let mut param = Self { name: name.into(), options, value: ParamValue::default() };
        param.set_value(raw);
        param
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn options(&self) -> &ParamOptions {
        &self.options
    }

    #[must_use]
    pub fn option(&self, key: OptionKey) -> Option<&OptionValue> {
        self.options.get(key)
    }

    /// Replaces one descriptor option, returning the previous value.
    /// The resolved value is left as is; call `set_value` to re-resolve.
    pub fn set_option(&mut self, key: OptionKey, value: OptionValue) -> Option<OptionValue> {
        self.options.set(key, value)
    }

    #[must_use]
    pub const fn value(&self) -> &ParamValue {
        &self.value
    }

    pub fn set_value(&mut self, raw: impl Into<ParamValue>) -> &ParamValue {
        self.value = self.resolve(raw.into());
        &self.value
    }

    /// Resolves a raw value without storing it.
    #[must_use]
    pub fn resolve(&self, raw: ParamValue) -> ParamValue {
        match raw {
            ParamValue::Scalar(Scalar::String(s)) if s.contains(SEPARATOR) => {
                self.resolve_list(vec![Scalar::String(s)])
            }
            ParamValue::Scalar(s) => ParamValue::Scalar(self.resolve_scalar(s)),
            ParamValue::List(items) => self.resolve_list(items),
        }
    }

    /// Resolves every element, splitting any comma-bearing string into further elements.
    #[must_use]
    pub fn resolve_list(&self, items: impl IntoIterator<Item = Scalar>) -> ParamValue {
        let resolved = items
            .into_iter()
            .flat_map(|item| match item {
                Scalar::String(s) if s.contains(SEPARATOR) => {
                    s.split(SEPARATOR).map(|part| Scalar::String(part.to_owned())).collect::<Vec<_>>()
                }
                other => vec![other],
            })
            .map(|item| self.resolve_scalar(item))
            .collect();
        ParamValue::List(resolved)
    }

    /// Default and format the raw scalar, then coerce it to the parameter type.
    #[must_use]
    pub fn resolve_scalar(&self, raw: Scalar) -> Scalar {
        self.assert(self.format(raw))
    }

    /// Infers (or reads) the type of `raw`, coerces it and runs the formatters again.
    #[must_use]
    pub fn assert(&self, raw: Scalar) -> Scalar {
        let ty = self.value_type(&raw);
        self.format(coerce(raw, ty))
    }

    /// Runs every formatter whose option is present, in ascending option order.
    #[must_use]
    pub fn format(&self, value: Scalar) -> Scalar {
        self.options.iter().fold(value, |value, (key, option)| match Formatter::for_key(key) {
            Some(formatter) => formatter.apply(option, value, self),
            None => value,
        })
    }

    /// The configured `type`, or the type inferred from `value`.
    #[must_use]
    pub fn value_type(&self, value: &Scalar) -> ValueType {
        self.options.explicit_type().unwrap_or_else(|| infer_type(value))
    }

    /// # Errors
    /// Returns the first validation failure of the resolved value.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_value(&self.value)
    }

    /// Validates `value` against this parameter's validators; list values stop at the
    /// first failing element.
    ///
    /// # Errors
    /// Returns the first validation failure.
    pub fn validate_value(&self, value: &ParamValue) -> Result<(), ValidationError> {
        value.elements().iter().try_for_each(|item| self.validate_scalar(item))
    }

    fn validate_scalar(&self, value: &Scalar) -> Result<(), ValidationError> {
        for (key, option) in self.options.iter() {
            let Some(validator) = Validator::for_key(key) else { continue };
            let validation = validator.check(option, value, self);
            if !validation.valid {
                return Err(ValidationError {
                    name: key,
                    param: self.name.clone(),
                    value: value.clone(),
                    bound: option.clone(),
                    message: validation.message,
                });
            }
        }
        Ok(())
    }

    /// Runs the `parse` strategy on the resolved value. Parameters without one
    /// contribute nothing.
    #[must_use]
    pub fn parse(&self, siblings: &dyn ParamLookup) -> Option<Document> {
        self.options.parse_strategy()?.call(&self.value, self, siblings)
    }
}
