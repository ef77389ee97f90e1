//! Single query parameter: default/format/coerce pipeline, validators and parse strategy.

mod coerce;
mod core;
pub mod formatters;
mod options;
pub mod validators;

pub use coerce::{coerce, infer_type};
pub use self::core::{NoSiblings, Param, ParamLookup, SEPARATOR};
pub use formatters::Formatter;
pub use options::{OptionKey, OptionValue, ParamOptions, ParseFn, Parser};
pub use validators::{Validation, Validator};
