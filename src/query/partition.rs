//! Concrete per-partition queries.
//!
//! A [`PartitionQuery`] is a [`QueryTemplate`] clone plus resolved key
//! conditions: an equality condition on the hash key column and a
//! `BETWEEN(min, max)` condition on the geohash sort key, scoped to one
//! index. Fields are private and getter-only; once built, a partition query
//! is owned exclusively by the executor task that runs it, so no locking is
//! ever needed around query data.

use serde::{Deserialize, Serialize};

use crate::query::template::{AttributeValue, QueryTemplate};

/// A key condition as the store understands it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum KeyCondition {
    /// Equality on the attribute.
    Eq(AttributeValue),
    /// Inclusive range on the attribute.
    Between(AttributeValue, AttributeValue),
}

/// One immutable, fully resolved partition query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionQuery {
    template: QueryTemplate,
    index_name: String,
    hash_key_column: String,
    hash_key_value: AttributeValue,
    range_key_column: String,
    range_min: i64,
    range_max: i64,
}

impl PartitionQuery {
    pub(crate) fn new(
        template: QueryTemplate,
        index_name: String,
        hash_key_column: String,
        hash_key_value: AttributeValue,
        range_key_column: String,
        range_min: i64,
        range_max: i64,
    ) -> Self {
        Self {
            template,
            index_name,
            hash_key_column,
            hash_key_value,
            range_key_column,
            range_min,
            range_max,
        }
    }

    /// The template fields carried over from the caller's base query.
    pub fn template(&self) -> &QueryTemplate {
        &self.template
    }

    /// The index this query runs against.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Partition hash key column.
    pub fn hash_key_column(&self) -> &str {
        &self.hash_key_column
    }

    /// Resolved hash key value: numeric for plain geohash keys, string for
    /// decorated composite keys.
    pub fn hash_key_value(&self) -> &AttributeValue {
        &self.hash_key_value
    }

    /// Geohash sort key column.
    pub fn range_key_column(&self) -> &str {
        &self.range_key_column
    }

    /// Inclusive sort-key bounds for this partition.
    pub fn range_bounds(&self) -> (i64, i64) {
        (self.range_min, self.range_max)
    }

    /// The hash key condition in store form.
    pub fn hash_key_condition(&self) -> KeyCondition {
        KeyCondition::Eq(self.hash_key_value.clone())
    }

    /// The sort key condition in store form.
    pub fn range_key_condition(&self) -> KeyCondition {
        KeyCondition::Between(
            AttributeValue::number(self.range_min),
            AttributeValue::number(self.range_max),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_query() -> PartitionQuery {
        PartitionQuery::new(
            QueryTemplate::new("places").with_limit(25),
            "geohash-index".to_string(),
            "geoHashKey".to_string(),
            AttributeValue::number(123),
            "geohash".to_string(),
            100,
            149,
        )
    }

    #[test]
    fn test_accessors() {
        let query = sample_query();
        assert_eq!(query.index_name(), "geohash-index");
        assert_eq!(query.hash_key_column(), "geoHashKey");
        assert_eq!(query.range_key_column(), "geohash");
        assert_eq!(query.range_bounds(), (100, 149));
        assert_eq!(query.template().limit(), Some(25));
    }

    #[test]
    fn test_hash_key_condition() {
        let query = sample_query();
        assert_eq!(
            query.hash_key_condition(),
            KeyCondition::Eq(AttributeValue::number(123))
        );
    }

    #[test]
    fn test_serializes_for_request_logging() {
        let query = sample_query();
        let json = serde_json::to_string(&query).unwrap();
        let restored: PartitionQuery = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, query);
    }

    #[test]
    fn test_range_key_condition() {
        let query = sample_query();
        assert_eq!(
            query.range_key_condition(),
            KeyCondition::Between(AttributeValue::number(100), AttributeValue::number(149))
        );
    }
}
