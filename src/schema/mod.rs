// Submodules for separation of concerns
mod builtins;
mod core;
mod cursor;
pub mod filter;
mod output;
mod raw;

pub use self::core::{ARRAY_SUFFIX, Schema};
pub use builtins::{BUILTIN_NAMES, Descriptors, FIELDS, LIMIT, PAGE, SORT};
pub use cursor::{FindOptions, Order, SortSpec};
pub use filter::{Clause, FilterOp, OPERATOR_PREFIXES, parse_filter};
pub use output::{QueryDocument, deep_merge};
pub use raw::RawQuery;
