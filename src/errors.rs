use crate::param::{OptionKey, OptionValue};
use crate::types::Scalar;
use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

/// A parameter value rejected by one of its validators.
///
/// Serializes as `{name, param, value, <name>: bound, valid: false, message}`.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Option key of the validator that failed (`required`, `min`, `max`).
    pub name: OptionKey,
    /// Parameter name.
    pub param: String,
    /// The offending value (the failing element for list values).
    pub value: Scalar,
    /// Configured value of the failing option.
    pub bound: OptionValue,
    pub message: String,
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(6))?;
        map.serialize_entry("name", self.name.as_str())?;
        map.serialize_entry("param", &self.param)?;
        map.serialize_entry("value", &self.value)?;
        map.serialize_entry(self.name.as_str(), &self.bound)?;
        map.serialize_entry("valid", &false)?;
        map.serialize_entry("message", &self.message)?;
        map.end()
    }
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

impl From<std::io::Error> for QueryError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;
