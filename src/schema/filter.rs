//! Filter-operator parsing for the catch-all query parameter.
//!
//! A filter value is an equality (`foo=bar`), a single operator application
//! (`foo=>=5`, `foo=^ab`) or a comma list of alternatives (`foo=a,b,!c`).

use crate::param::{Param, ParamLookup};
use crate::types::{ParamValue, Scalar};
use bson::{Bson, Document, doc};

/// Operator prefixes recognized by the catch-all filter descriptor.
pub const OPERATOR_PREFIXES: [char; 6] = ['!', '~', '^', '$', '>', '<'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// `^v`: starts with.
    Prefix,
    /// `$v`: ends with.
    Suffix,
    /// `~v`: contains.
    Contains,
    Gt,
    Gte,
    Lt,
    Lte,
    Ne,
    Eq,
    In,
    Nin,
}

impl FilterOp {
    /// Maps a prefix character to its operator. `inclusive` is the `=` after the prefix;
    /// `list` selects set membership for the plain and `!` forms.
    #[must_use]
    pub const fn from_prefix(prefix: Option<char>, inclusive: bool, list: bool) -> Self {
        match prefix {
            Some('^') => Self::Prefix,
            Some('$') => Self::Suffix,
            Some('~') => Self::Contains,
            Some('>') if inclusive => Self::Gte,
            Some('>') => Self::Gt,
            Some('<') if inclusive => Self::Lte,
            Some('<') => Self::Lt,
            Some('!') if list => Self::Nin,
            Some('!') => Self::Ne,
            _ if list => Self::In,
            _ => Self::Eq,
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Prefix | Self::Suffix | Self::Contains => "$regex",
            Self::Gt => "$gt",
            Self::Gte => "$gte",
            Self::Lt => "$lt",
            Self::Lte => "$lte",
            Self::Ne => "$ne",
            Self::Eq => "$eq",
            Self::In => "$in",
            Self::Nin => "$nin",
        }
    }

    #[must_use]
    pub const fn is_pattern(self) -> bool {
        matches!(self, Self::Prefix | Self::Suffix | Self::Contains)
    }
}

/// One parsed operator application.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub op: FilterOp,
    pub operand: Bson,
}

impl Clause {
    /// Splits a recognized prefix and an optional `=` off `text`, coerces the rest through
    /// the parameter and maps the prefix to an operator.
    #[must_use]
    pub fn parse(text: &str, param: &Param, list: bool) -> Self {
        let mut chars = text.chars();
        let prefix = chars.next().filter(|c| param.options().operators().contains(c));
        let rest = if prefix.is_some() { chars.as_str() } else { text };
        let (inclusive, rest) = match rest.strip_prefix('=') {
            Some(r) if prefix.is_some() => (true, r),
            _ => (false, rest),
        };
        let op = FilterOp::from_prefix(prefix, inclusive, list);
        let value = param.assert(Scalar::String(rest.to_owned()));
        let operand = if op.is_pattern() {
            let source = value.to_text().unwrap_or_default();
            Bson::String(match op {
                FilterOp::Prefix => format!("^{source}"),
                FilterOp::Suffix => format!("{source}$"),
                _ => source,
            })
        } else {
            value.to_bson()
        };
        Self { op, operand }
    }

    #[must_use]
    pub fn to_document(&self) -> Document {
        let mut out = doc! { self.op.key(): self.operand.clone() };
        if self.op.is_pattern() {
            out.insert("$options", "i");
        }
        out
    }
}

/// Parse strategy of the catch-all descriptor: `{name: equality | operator document}`.
pub fn parse_filter(value: &ParamValue, param: &Param, _siblings: &dyn ParamLookup) -> Option<Document> {
    let clause = match value {
        ParamValue::Scalar(Scalar::Nil) => return None,
        ParamValue::List(items) => Bson::Document(parse_alternatives(items, param)),
        ParamValue::Scalar(s) => {
            let text = s.to_text()?;
            let prefixed = text.chars().next().is_some_and(|c| param.options().operators().contains(&c));
            if prefixed {
                Bson::Document(Clause::parse(&text, param, false).to_document())
            } else {
                param.assert(Scalar::String(text)).to_bson()
            }
        }
    };
    Some(doc! { param.name(): clause })
}

/// Comma alternatives only build `$in` / `$nin`; other operators in a list are dropped.
fn parse_alternatives(items: &[Scalar], param: &Param) -> Document {
    let mut out = Document::new();
    for text in items.iter().filter_map(Scalar::to_text) {
        let clause = Clause::parse(&text, param, true);
        if !matches!(clause.op, FilterOp::In | FilterOp::Nin) {
            log::trace!("dropping {} alternative for {}", clause.op.key(), param.name());
            continue;
        }
        match out.get_mut(clause.op.key()) {
            Some(Bson::Array(values)) => values.push(clause.operand),
            _ => {
                out.insert(clause.op.key(), vec![clause.operand]);
            }
        }
    }
    out
}
