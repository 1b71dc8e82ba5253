//! Store client seam.
//!
//! The wire client is an external collaborator: it owns connection
//! management, transport-level retries and the pagination of a single
//! query. The executor only depends on the [`StoreQueryExecutor`] contract:
//! run one partition query to completion and hand back every item, or a
//! single failure type.

use std::future::Future;

use crate::query::{Item, PartitionQuery};

/// Runs one partition query against the store.
pub trait StoreQueryExecutor: Send + Sync + 'static {
    /// Executes the query, paginating internally (repeated calls with a
    /// continuation cursor until none remains), and returns the complete
    /// ordered item sequence for that partition.
    ///
    /// The query is owned by the call: partition queries are never shared
    /// between workers.
    fn run(
        &self,
        query: PartitionQuery,
    ) -> impl Future<Output = Result<Vec<Item>, StoreError>> + Send;
}

/// A transport or store-side failure from one partition query.
#[derive(Debug, Clone)]
pub struct StoreError {
    /// Human-readable error message.
    pub message: String,
    /// Whether this error is transient. The core never retries; the flag
    /// is carried for the caller's retry policy.
    pub is_retryable: bool,
}

impl StoreError {
    /// Creates a retryable error (transient failure like a network timeout).
    pub fn retryable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_retryable: true,
        }
    }

    /// Creates a permanent error (won't succeed on retry).
    pub fn permanent(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_retryable: false,
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StoreError {}
