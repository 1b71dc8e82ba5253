//! Partition query construction.
//!
//! Turns a caller template plus a list of fine-grained geohash ranges into
//! one concrete query per range. This stage is pure: it validates, clones
//! and resolves, but performs no I/O.

use tracing::trace;

use crate::config::GeoConfig;
use crate::error::GeoQueryError;
use crate::geohash::{GeohashCoverer, GeohashRange};
use crate::query::partition::PartitionQuery;
use crate::query::template::{AttributeValue, QueryTemplate};

/// Builds concrete partition queries from a template and split ranges.
pub struct PartitionQueryBuilder<'a> {
    config: &'a GeoConfig,
    coverer: &'a dyn GeohashCoverer,
}

impl<'a> PartitionQueryBuilder<'a> {
    /// Create a builder for the given layout and coverer.
    pub fn new(config: &'a GeoConfig, coverer: &'a dyn GeohashCoverer) -> Self {
        Self { config, coverer }
    }

    /// Build one partition query per range, preserving input order.
    ///
    /// Each query gets an equality condition on the hash key column (the
    /// range's minimum truncated to the configured key length, decorated
    /// with the discriminator when a decorator is configured), a
    /// `BETWEEN(min, max)` condition on the range key column, the
    /// configured index name, and a verbatim clone of every other template
    /// field.
    ///
    /// Range validity (`min <= max`) is enforced by [`GeohashRange`]
    /// construction, so malformed ranges cannot reach this stage.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` when a hash key decorator is configured but
    /// no discriminator value is supplied. Composite keys are mandatory
    /// once a decorator is present; silently falling back to the raw
    /// numeric key would route queries to partitions that hold no data.
    pub fn build(
        &self,
        template: &QueryTemplate,
        ranges: &[GeohashRange],
        discriminator: Option<&str>,
    ) -> Result<Vec<PartitionQuery>, GeoQueryError> {
        let decorator = self.config.hash_key_decorator();
        if decorator.is_some() && discriminator.is_none() {
            return Err(GeoQueryError::InvalidConfiguration(
                "hash key decorator configured but no discriminator value supplied".to_string(),
            ));
        }

        let hash_key_length = self.config.hash_key_length();
        let mut queries = Vec::with_capacity(ranges.len());
        for range in ranges {
            let raw_hash_key = self.coverer.hash_key(range.min(), hash_key_length);
            let hash_key_value = match (decorator, discriminator) {
                (Some(decorator), Some(value)) => {
                    AttributeValue::string(decorator.decorate(value, raw_hash_key))
                }
                _ => AttributeValue::number(raw_hash_key),
            };
            trace!(range = %range, hash_key = ?hash_key_value, "resolved partition query");

            queries.push(PartitionQuery::new(
                template.clone(),
                self.config.index_name().to_string(),
                self.config.hash_key_column().to_string(),
                hash_key_value,
                self.config.range_key_column().to_string(),
                range.min(),
                range.max(),
            ));
        }
        Ok(queries)
    }
}
