//! Store-agnostic query values.
//!
//! The target store's query primitive is "equality on a partition key plus
//! an optional range condition on a sort key, plus an opaque post-filter
//! expression". [`QueryTemplate`] carries everything the caller controls
//! about that primitive: table identity, projection, filter expression and
//! its bound values, page limit, consistency and scan direction. Templates
//! are values: they are cloned into each partition query and never mutated
//! in place, so one caller template can seed many partition queries.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An attribute value in the store's own shape.
///
/// Numbers travel as decimal text, matching the wire format of
/// DynamoDB-style stores; typed accessors parse on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// A string value.
    S(String),
    /// A numeric value, rendered as decimal text.
    N(String),
    /// A boolean value.
    Bool(bool),
}

impl AttributeValue {
    /// A string attribute.
    pub fn string(value: impl Into<String>) -> Self {
        Self::S(value.into())
    }

    /// An integer attribute.
    pub fn number(value: i64) -> Self {
        Self::N(value.to_string())
    }

    /// A floating-point attribute.
    pub fn float(value: f64) -> Self {
        Self::N(value.to_string())
    }

    /// The string payload, if this is a string attribute.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric payload parsed as `i64`, if this is a numeric attribute.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::N(n) => n.parse().ok(),
            _ => None,
        }
    }

    /// The numeric payload parsed as `f64`, if this is a numeric attribute.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::N(n) => n.parse().ok(),
            _ => None,
        }
    }

    /// The boolean payload, if this is a boolean attribute.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// One stored record: an opaque attribute mapping.
///
/// The core never interprets item fields except to extract coordinates
/// inside a geo filter.
pub type Item = HashMap<String, AttributeValue>;

/// Caller-owned base query.
///
/// Built with `with_*` setters; every field except the key conditions is
/// copied verbatim into each generated partition query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryTemplate {
    table_name: String,
    projection: Option<Vec<String>>,
    filter_expression: Option<String>,
    expression_values: HashMap<String, AttributeValue>,
    limit: Option<u32>,
    consistent_read: bool,
    scan_forward: bool,
}

impl QueryTemplate {
    /// Create a template for the given table.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            projection: None,
            filter_expression: None,
            expression_values: HashMap::new(),
            limit: None,
            consistent_read: false,
            scan_forward: true,
        }
    }

    /// Restrict returned attributes to the given columns.
    pub fn with_projection<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projection = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Attach an opaque post-filter expression and its bound values.
    pub fn with_filter_expression(
        mut self,
        expression: impl Into<String>,
        values: HashMap<String, AttributeValue>,
    ) -> Self {
        self.filter_expression = Some(expression.into());
        self.expression_values = values;
        self
    }

    /// Limit the page size of each partition query.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Request strongly consistent reads.
    pub fn with_consistent_read(mut self, consistent: bool) -> Self {
        self.consistent_read = consistent;
        self
    }

    /// Set the sort-key scan direction.
    pub fn with_scan_forward(mut self, forward: bool) -> Self {
        self.scan_forward = forward;
        self
    }

    /// Target table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Projected columns, if restricted.
    pub fn projection(&self) -> Option<&[String]> {
        self.projection.as_deref()
    }

    /// Post-filter expression, if any.
    pub fn filter_expression(&self) -> Option<&str> {
        self.filter_expression.as_deref()
    }

    /// Values bound into the filter expression.
    pub fn expression_values(&self) -> &HashMap<String, AttributeValue> {
        &self.expression_values
    }

    /// Page limit, if any.
    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// Whether reads are strongly consistent.
    pub fn consistent_read(&self) -> bool {
        self.consistent_read
    }

    /// Whether the sort key is scanned in ascending order.
    pub fn scan_forward(&self) -> bool {
        self.scan_forward
    }
}
