use super::builtins::{BUILTIN_NAMES, Descriptors};
use super::output::QueryDocument;
use super::raw::RawQuery;
use crate::config::SchemaConfig;
use crate::errors::ValidationError;
use crate::param::{Param, ParamLookup, ParamOptions};
use crate::types::ParamValue;

/// Suffix marking an array key (`tag[]`); stripped from the parameter name.
pub const ARRAY_SUFFIX: &str = "[]";

/// The parameters of one request: the built-ins plus one filter parameter per other key.
///
/// Every parameter is constructed, and so resolved, before anything is parsed.
#[derive(Debug, Clone)]
pub struct Schema {
    params: Vec<Param>,
    descriptors: Descriptors,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new(RawQuery::new())
    }
}

impl Schema {
    pub fn new(input: impl Into<RawQuery>) -> Self {
        Self::with_config(input, &SchemaConfig::default())
    }

    pub fn with_config(input: impl Into<RawQuery>, config: &SchemaConfig) -> Self {
        let mut raw = input.into();
        let mut schema = Self { params: Vec::new(), descriptors: Descriptors::from_config(config) };
        for name in BUILTIN_NAMES {
            let value = raw.remove(name).unwrap_or_default();
            schema.add(name, value);
        }
        for (key, value) in raw {
            schema.add(&key, value);
        }
        log::debug!("schema built with {} params: {}", schema.params.len(), schema.names().collect::<Vec<_>>().join(","));
        schema
    }

    /// Builds a schema straight from a URL query string.
    #[must_use]
    pub fn from_query_str(query: &str) -> Self {
        Self::new(RawQuery::parse(query))
    }

    /// Descriptor used for a raw key (before `[]` stripping).
    #[must_use]
    pub fn descriptor(&self, key: &str) -> &ParamOptions {
        self.descriptors.for_key(key)
    }

    /// Instantiates the parameter for `key`. A key naming an existing parameter
    /// (after `[]` stripping) replaces it in place.
    pub fn add(&mut self, key: &str, value: impl Into<ParamValue>) {
        let options = self.descriptor(key).clone();
        let name = key.strip_suffix(ARRAY_SUFFIX).unwrap_or(key);
        let param = Param::new(name, value, options);
        match self.params.iter_mut().find(|p| p.name() == name) {
            Some(slot) => *slot = param,
            None => self.params.push(param),
        }
    }

    #[must_use]
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name() == name)
    }

    pub fn param_mut(&mut self, name: &str) -> Option<&mut Param> {
        self.params.iter_mut().find(|p| p.name() == name)
    }

    pub fn params(&self) -> impl Iterator<Item = &Param> {
        self.params.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(Param::name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Validates every parameter in declaration order, stopping at the first failure.
    ///
    /// # Errors
    /// Returns the first parameter's validation error.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.params.iter().try_for_each(Param::validate).inspect_err(|e| {
            log::warn!("query param {} rejected by {}: {}", e.param, e.name, e.message);
        })
    }

    /// Merges every parameter's non-empty fragment into the bucket it is bound to.
    /// Parsing reads resolved values only, so repeated calls return equal documents.
    #[must_use]
    pub fn parse(&self) -> QueryDocument {
        let mut out = QueryDocument::default();
        for param in &self.params {
            let Some(bucket) = param.options().bucket() else { continue };
            let Some(fragment) = param.parse(self) else { continue };
            if fragment.is_empty() {
                continue;
            }
            log::trace!("{} -> {}: {}", param.name(), bucket.as_str(), fragment);
            out.merge(bucket, fragment);
        }
        out
    }
}

impl ParamLookup for Schema {
    fn param(&self, name: &str) -> Option<&Param> {
        Self::param(self, name)
    }
}
