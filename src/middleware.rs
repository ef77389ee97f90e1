//! Framework-agnostic request adapter.
//!
//! A host framework implements [`RequestContext`] for its request type; the
//! middleware builds a schema from the raw query, validates it and hands the
//! outcome to the context before calling `next`.

use crate::config::SchemaConfig;
use crate::errors::ValidationError;
use crate::schema::{QueryDocument, RawQuery, Schema};

pub const BAD_REQUEST: u16 = 400;

/// What the middleware attaches to a request.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    Parsed(QueryDocument),
    Rejected(ValidationError),
}

impl QueryOutcome {
    #[must_use]
    pub const fn document(&self) -> Option<&QueryDocument> {
        match self {
            Self::Parsed(doc) => Some(doc),
            Self::Rejected(_) => None,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Parsed(_) => None,
            Self::Rejected(e) => Some(e),
        }
    }
}

pub trait RequestContext {
    /// The request's decoded query mapping.
    fn raw_query(&self) -> RawQuery;
    fn set_status(&mut self, status: u16);
    fn attach(&mut self, outcome: QueryOutcome);
}

#[derive(Debug, Clone, Default)]
pub struct QueryMiddleware {
    config: SchemaConfig,
}

impl QueryMiddleware {
    #[must_use]
    pub const fn new(config: SchemaConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Validates then parses `raw` with a fresh schema.
    ///
    /// # Errors
    /// Returns the first validation failure.
    pub fn process(&self, raw: RawQuery) -> Result<QueryDocument, ValidationError> {
        let schema = Schema::with_config(raw, &self.config);
        schema.validate()?;
        Ok(schema.parse())
    }

    /// On failure: status 400, the error attached, `next` called with its message.
    /// On success: the document attached, `next` called with `None`.
    pub fn handle<C, N>(&self, ctx: &mut C, next: N)
    where
        C: RequestContext,
        N: FnOnce(&mut C, Option<String>),
    {
        match self.process(ctx.raw_query()) {
            Ok(doc) => {
                ctx.attach(QueryOutcome::Parsed(doc));
                next(ctx, None);
            }
            Err(err) => {
                let message = err.message.clone();
                ctx.set_status(BAD_REQUEST);
                ctx.attach(QueryOutcome::Rejected(err));
                next(ctx, Some(message));
            }
        }
    }
}
