//! Error types for geo query planning and execution.
//!
//! Planning errors (`InvalidConfiguration`, `InvalidRange`) are raised
//! immediately and locally. Execution errors are aggregated: the executor
//! never returns a partial result, since a missing partition would turn a
//! geo query into silently incomplete data.

use thiserror::Error;

use crate::executor::StoreError;

/// Errors produced while planning or executing a geo query.
#[derive(Debug, Error)]
pub enum GeoQueryError {
    /// The geo configuration is unusable as supplied (e.g. a hash key
    /// decorator is configured but no discriminator value was provided).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A geohash range was constructed with `min > max`.
    #[error("invalid geohash range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },

    /// One partition query failed. Reports which partition (submission
    /// index) failed and how many sibling partitions had already succeeded
    /// when the failure was observed.
    #[error("partition query {partition} failed ({succeeded} sibling(s) succeeded): {source}")]
    PartitionQueryFailed {
        partition: usize,
        succeeded: usize,
        #[source]
        source: StoreError,
    },

    /// The worker pool was closed and could not accept a submission.
    #[error("worker pool rejected query submission")]
    PoolRejected,

    /// The caller was cancelled while waiting on outstanding partition
    /// queries.
    #[error("interrupted while waiting for partition queries")]
    Interrupted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_range_display() {
        let err = GeoQueryError::InvalidRange { min: 500, max: 100 };
        assert_eq!(
            format!("{}", err),
            "invalid geohash range: min 500 is greater than max 100"
        );
    }

    #[test]
    fn test_partition_failed_display() {
        let err = GeoQueryError::PartitionQueryFailed {
            partition: 2,
            succeeded: 3,
            source: StoreError::retryable("connection reset"),
        };
        assert_eq!(
            format!("{}", err),
            "partition query 2 failed (3 sibling(s) succeeded): connection reset"
        );
    }

    #[test]
    fn test_pool_rejected_display() {
        assert_eq!(
            format!("{}", GeoQueryError::PoolRejected),
            "worker pool rejected query submission"
        );
    }
}
