use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    /// Direction of a `-field` / `+field` / `field` token, with the bare field name.
    #[must_use]
    pub fn split(token: &str) -> (&str, Self) {
        if let Some(field) = token.strip_prefix('-') {
            (field, Self::Desc)
        } else if let Some(field) = token.strip_prefix('+') {
            (field, Self::Asc)
        } else {
            (token, Self::Asc)
        }
    }

    #[must_use]
    pub const fn sort_value(self) -> i32 {
        match self {
            Self::Asc => 1,
            Self::Desc => -1,
        }
    }

    #[must_use]
    pub const fn projection_value(self) -> i32 {
        match self {
            Self::Asc => 1,
            Self::Desc => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub order: Order,
}

/// Typed view of the `cursor` and `select` buckets, shaped for a document-store find call.
///
/// Semantics:
/// - `projection` lists fields selected with `1`, `excluded` those selected with `0`.
/// - `sort` keeps the order in which fields were given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindOptions {
    pub projection: Option<Vec<String>>,
    pub excluded: Option<Vec<String>>,
    pub sort: Option<Vec<SortSpec>>,
    pub limit: Option<usize>,
    pub skip: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_reads_direction_prefix() {
        assert_eq!(Order::split("-a"), ("a", Order::Desc));
        assert_eq!(Order::split("+a"), ("a", Order::Asc));
        assert_eq!(Order::split("a"), ("a", Order::Asc));
        assert_eq!(Order::Desc.sort_value(), -1);
        assert_eq!(Order::Desc.projection_value(), 0);
    }
}
