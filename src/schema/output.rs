use super::cursor::{FindOptions, Order, SortSpec};
use crate::types::Bucket;
use crate::utils::num::{bson_to_f64, f64_to_usize_saturating};
use bson::{Bson, Document};
use serde::Serialize;

/// Merged result of a schema parse.
///
/// A bucket is `None` until some parameter contributes a non-empty fragment to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Document>,
}

impl QueryDocument {
    #[must_use]
    pub const fn bucket(&self, bucket: Bucket) -> Option<&Document> {
        match bucket {
            Bucket::Cursor => self.cursor.as_ref(),
            Bucket::Select => self.select.as_ref(),
            Bucket::Filter => self.filter.as_ref(),
        }
    }

    #[must_use]
    pub const fn cursor(&self) -> Option<&Document> {
        self.cursor.as_ref()
    }

    #[must_use]
    pub const fn select(&self) -> Option<&Document> {
        self.select.as_ref()
    }

    #[must_use]
    pub const fn filter(&self) -> Option<&Document> {
        self.filter.as_ref()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cursor.is_none() && self.select.is_none() && self.filter.is_none()
    }

    /// Deep-merges `fragment` into `bucket`, creating the bucket on first use.
    pub fn merge(&mut self, bucket: Bucket, fragment: Document) {
        let slot = match bucket {
            Bucket::Cursor => &mut self.cursor,
            Bucket::Select => &mut self.select,
            Bucket::Filter => &mut self.filter,
        };
        deep_merge(slot.get_or_insert_with(Document::new), fragment);
    }

    /// The whole document with only the present buckets.
    #[must_use]
    pub fn to_document(&self) -> Document {
        let mut out = Document::new();
        for bucket in [Bucket::Cursor, Bucket::Select, Bucket::Filter] {
            if let Some(doc) = self.bucket(bucket) {
                out.insert(bucket.as_str(), doc.clone());
            }
        }
        out
    }

    /// Relaxed extended JSON: plain numbers and strings, dates as `{"$date": ...}`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        Bson::Document(self.to_document()).into_relaxed_extjson()
    }

    #[must_use]
    pub fn find_options(&self) -> FindOptions {
        let mut opts = FindOptions::default();
        if let Some(cursor) = &self.cursor {
            opts.limit = cursor.get("limit").and_then(bson_to_f64).map(f64_to_usize_saturating);
            opts.skip = cursor.get("skip").and_then(bson_to_f64).map(f64_to_usize_saturating);
            if let Some(Bson::Document(sort)) = cursor.get("sort") {
                opts.sort = Some(
                    sort.iter()
                        .map(|(field, dir)| SortSpec {
                            field: field.clone(),
                            order: if bson_to_f64(dir).is_some_and(|d| d < 0.0) {
                                Order::Desc
                            } else {
                                Order::Asc
                            },
                        })
                        .collect(),
                );
            }
        }
        if let Some(select) = &self.select {
            let (excluded, included): (Vec<_>, Vec<_>) =
                select.iter().partition(|(_, v)| bson_to_f64(v) == Some(0.0));
            opts.projection = field_names(&included);
            opts.excluded = field_names(&excluded);
        }
        opts
    }
}

fn field_names(fields: &[(&String, &Bson)]) -> Option<Vec<String>> {
    (!fields.is_empty()).then(|| fields.iter().map(|(k, _)| (*k).clone()).collect())
}

/// Merges `fragment` into `target`: nested documents merge key by key, anything else overwrites.
pub fn deep_merge(target: &mut Document, fragment: Document) {
    for (key, value) in fragment {
        if let Bson::Document(incoming) = value {
            if let Some(Bson::Document(existing)) = target.get_mut(&key) {
                deep_merge(existing, incoming);
                continue;
            }
            target.insert(key, Bson::Document(incoming));
        } else {
            target.insert(key, value);
        }
    }
}
