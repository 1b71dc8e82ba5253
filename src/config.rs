//! Geo attribute layout configuration.
//!
//! A [`GeoConfig`] describes how the geo attributes are laid out in the
//! target table: which column carries the partition hash key, which carries
//! the geohash sort key, which index serves geo lookups, and how long the
//! hash-key prefix is. It is built once at setup, validated, and shared
//! read-only across all queries.

use std::fmt;
use std::sync::Arc;

use crate::error::GeoQueryError;

/// Largest supported hash key length in decimal digits.
///
/// An `i64` geohash renders to at most 19 digits; keeping the prefix at 18
/// or fewer guarantees truncation always has at least one digit to drop.
pub const MAX_HASH_KEY_LENGTH: u32 = 18;

/// Default hash key length when the builder is not told otherwise.
pub const DEFAULT_HASH_KEY_LENGTH: u32 = 6;

/// Composes a partition hash key from a geohash prefix and an
/// application-level discriminator (e.g. a category).
///
/// Implementations must be pure: the same inputs always produce the same
/// key, with no side effects, since decoration runs once per partition
/// query during plan generation.
pub trait HashKeyDecorator: Send + Sync {
    /// Renders the composite hash key for the store.
    fn decorate(&self, discriminator: &str, hash_key: i64) -> String;
}

/// Decorator joining discriminator and hash key with a single delimiter,
/// producing keys like `restaurants:9876`.
#[derive(Debug, Clone)]
pub struct DelimitedDecorator {
    delimiter: char,
}

impl DelimitedDecorator {
    /// Create a decorator with the given delimiter.
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }
}

impl Default for DelimitedDecorator {
    fn default() -> Self {
        Self::new(':')
    }
}

impl HashKeyDecorator for DelimitedDecorator {
    fn decorate(&self, discriminator: &str, hash_key: i64) -> String {
        format!("{}{}{}", discriminator, self.delimiter, hash_key)
    }
}

/// Immutable description of the geo attribute layout.
#[derive(Clone)]
pub struct GeoConfig {
    hash_key_column: String,
    range_key_column: String,
    index_name: String,
    hash_key_length: u32,
    hash_key_decorator: Option<Arc<dyn HashKeyDecorator>>,
}

impl GeoConfig {
    /// Start building a configuration.
    pub fn builder() -> GeoConfigBuilder {
        GeoConfigBuilder::new()
    }

    /// Column holding the partition hash key.
    pub fn hash_key_column(&self) -> &str {
        &self.hash_key_column
    }

    /// Column holding the geohash sort key.
    pub fn range_key_column(&self) -> &str {
        &self.range_key_column
    }

    /// Name of the index serving geo lookups.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Hash key prefix length in decimal digits.
    pub fn hash_key_length(&self) -> u32 {
        self.hash_key_length
    }

    /// Composite-key decorator, when configured.
    ///
    /// A configured decorator makes composite keys mandatory: building
    /// queries without a discriminator value fails rather than silently
    /// falling back to the raw numeric hash key.
    pub fn hash_key_decorator(&self) -> Option<&dyn HashKeyDecorator> {
        self.hash_key_decorator.as_deref()
    }
}

impl fmt::Debug for GeoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoConfig")
            .field("hash_key_column", &self.hash_key_column)
            .field("range_key_column", &self.range_key_column)
            .field("index_name", &self.index_name)
            .field("hash_key_length", &self.hash_key_length)
            .field("hash_key_decorator", &self.hash_key_decorator.is_some())
            .finish()
    }
}

/// Validating builder for [`GeoConfig`].
#[derive(Default)]
pub struct GeoConfigBuilder {
    hash_key_column: Option<String>,
    range_key_column: Option<String>,
    index_name: Option<String>,
    hash_key_length: Option<u32>,
    hash_key_decorator: Option<Arc<dyn HashKeyDecorator>>,
}

impl GeoConfigBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the partition hash key column.
    pub fn with_hash_key_column(mut self, column: impl Into<String>) -> Self {
        self.hash_key_column = Some(column.into());
        self
    }

    /// Set the geohash sort key column.
    pub fn with_range_key_column(mut self, column: impl Into<String>) -> Self {
        self.range_key_column = Some(column.into());
        self
    }

    /// Set the geo index name.
    pub fn with_index_name(mut self, name: impl Into<String>) -> Self {
        self.index_name = Some(name.into());
        self
    }

    /// Set the hash key prefix length in decimal digits.
    pub fn with_hash_key_length(mut self, length: u32) -> Self {
        self.hash_key_length = Some(length);
        self
    }

    /// Configure a composite-key decorator, making discriminator values
    /// mandatory at query build time.
    pub fn with_hash_key_decorator(mut self, decorator: Arc<dyn HashKeyDecorator>) -> Self {
        self.hash_key_decorator = Some(decorator);
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<GeoConfig, GeoQueryError> {
        let hash_key_column = require_non_empty(self.hash_key_column, "hash key column")?;
        let range_key_column = require_non_empty(self.range_key_column, "range key column")?;
        let index_name = require_non_empty(self.index_name, "index name")?;

        if hash_key_column == range_key_column {
            return Err(GeoQueryError::InvalidConfiguration(format!(
                "hash key column and range key column are both '{}'",
                hash_key_column
            )));
        }

        let hash_key_length = self.hash_key_length.unwrap_or(DEFAULT_HASH_KEY_LENGTH);
        if hash_key_length == 0 || hash_key_length > MAX_HASH_KEY_LENGTH {
            return Err(GeoQueryError::InvalidConfiguration(format!(
                "hash key length {} outside 1..={}",
                hash_key_length, MAX_HASH_KEY_LENGTH
            )));
        }

        Ok(GeoConfig {
            hash_key_column,
            range_key_column,
            index_name,
            hash_key_length,
            hash_key_decorator: self.hash_key_decorator,
        })
    }
}

fn require_non_empty(value: Option<String>, what: &str) -> Result<String, GeoQueryError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        Some(_) => Err(GeoQueryError::InvalidConfiguration(format!(
            "{} is empty",
            what
        ))),
        None => Err(GeoQueryError::InvalidConfiguration(format!(
            "{} is not set",
            what
        ))),
    }
}
