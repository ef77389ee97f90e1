//! Descriptors and parse strategies of the built-in parameters.

use super::cursor::Order;
use super::filter::{OPERATOR_PREFIXES, parse_filter};
use crate::config::SchemaConfig;
use crate::param::{Param, ParamLookup, ParamOptions, Parser};
use crate::types::{Bucket, ParamValue, Scalar, ValueType};
use crate::utils::num::f64_to_bson;
use bson::{Bson, Document, doc};

pub const LIMIT: &str = "limit";
pub const PAGE: &str = "page";
pub const SORT: &str = "sort";
pub const FIELDS: &str = "fields";

/// Built-in parameter names, in declaration order.
pub const BUILTIN_NAMES: [&str; 4] = [LIMIT, PAGE, SORT, FIELDS];

/// The descriptor templates a schema instantiates parameters from.
#[derive(Debug, Clone)]
pub struct Descriptors {
    limit: ParamOptions,
    page: ParamOptions,
    sort: ParamOptions,
    fields: ParamOptions,
    query: ParamOptions,
}

impl Descriptors {
    #[must_use]
    pub fn from_config(cfg: &SchemaConfig) -> Self {
        Self {
            limit: ParamOptions::new()
                .value_type(ValueType::Number)
                .default_value(cfg.default_limit)
                .max(cfg.max_limit)
                .min(cfg.min_limit)
                .bind_to(Bucket::Cursor)
                .parser(Parser::new(LIMIT, parse_limit)),
            page: ParamOptions::new()
                .value_type(ValueType::Number)
                .default_value(cfg.default_page)
                .max(cfg.max_page)
                .min(1.0)
                .bind_to(Bucket::Cursor)
                .parser(Parser::new(PAGE, parse_page)),
            sort: ParamOptions::new()
                .value_type(ValueType::String)
                .default_value(cfg.default_sort.as_str())
                .bind_to(Bucket::Cursor)
                .parser(Parser::new(SORT, parse_sort)),
            fields: ParamOptions::new()
                .bind_to(Bucket::Select)
                .parser(Parser::new(FIELDS, parse_fields)),
            query: ParamOptions::new()
                .bind_to(Bucket::Filter)
                .opts(OPERATOR_PREFIXES)
                .required(true)
                .parser(Parser::new("query", parse_filter)),
        }
    }

    /// Descriptor for a raw input key; anything that is not a built-in name is a filter.
    #[must_use]
    pub fn for_key(&self, key: &str) -> &ParamOptions {
        match key {
            LIMIT => &self.limit,
            PAGE => &self.page,
            SORT => &self.sort,
            FIELDS => &self.fields,
            _ => &self.query,
        }
    }
}

impl Default for Descriptors {
    fn default() -> Self {
        Self::from_config(&SchemaConfig::default())
    }
}

fn parse_limit(value: &ParamValue, _param: &Param, _siblings: &dyn ParamLookup) -> Option<Document> {
    Some(doc! { "limit": value.to_bson() })
}

/// `skip = limit * (page - 1)`, reading the resolved value of the sibling `limit`.
fn parse_page(value: &ParamValue, _param: &Param, siblings: &dyn ParamLookup) -> Option<Document> {
    let limit = siblings.param(LIMIT)?.value().as_scalar().map_or(f64::NAN, Scalar::to_number);
    let page = value.as_scalar().map_or(f64::NAN, Scalar::to_number);
    Some(doc! { "skip": f64_to_bson(limit * (page - 1.0)) })
}

fn parse_sort(value: &ParamValue, _param: &Param, _siblings: &dyn ParamLookup) -> Option<Document> {
    let mut sort = Document::new();
    for token in value.elements().iter().filter_map(Scalar::to_text) {
        let (field, order) = Order::split(&token);
        if field.is_empty() {
            continue;
        }
        sort.insert(field, Bson::Int32(order.sort_value()));
    }
    Some(doc! { "sort": sort })
}

fn parse_fields(value: &ParamValue, _param: &Param, _siblings: &dyn ParamLookup) -> Option<Document> {
    let mut select = Document::new();
    for token in value.elements().iter().filter_map(Scalar::to_text) {
        let (field, order) = Order::split(&token);
        if field.is_empty() {
            continue;
        }
        select.insert(field, Bson::Int32(order.projection_value()));
    }
    Some(select)
}
