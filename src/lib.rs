//! Turns URL query strings into typed database queries.
//!
//! A [`Schema`] instantiates one [`Param`] per input key (plus the built-in
//! `limit`, `page`, `sort` and `fields`), validates them and merges their
//! fragments into a [`QueryDocument`] of `cursor`, `select` and `filter` buckets.
//!
//! ```
//! use query_lite::Schema;
//!
//! let schema = Schema::from_query_str("limit=10&page=2&sort=-age&name=^jo");
//! schema.validate().unwrap();
//! let out = schema.parse();
//! assert_eq!(out.cursor().unwrap().get_i32("skip").unwrap(), 10);
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod logger;
pub mod middleware;
pub mod param;
pub mod schema;
pub mod types;
pub mod utils;

pub use config::SchemaConfig;
pub use errors::{QueryError, Result, ValidationError};
pub use middleware::{QueryMiddleware, QueryOutcome, RequestContext};
pub use param::{OptionKey, OptionValue, Param, ParamOptions, Parser};
pub use schema::{FindOptions, Order, QueryDocument, RawQuery, Schema, SortSpec};
pub use types::{Bucket, ParamValue, Scalar, ValueType};

/// Validates and parses a query string with the default configuration.
///
/// # Errors
/// Returns the first parameter that fails validation.
pub fn parse_query_str(query: &str) -> std::result::Result<QueryDocument, ValidationError> {
    QueryMiddleware::default().process(RawQuery::parse(query))
}
