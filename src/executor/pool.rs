//! Worker pool bounding concurrent partition queries.
//!
//! The pool is process-wide shared state owned by the composition root and
//! shared across possibly many concurrent logical queries; executors borrow
//! it per call and create no capacity of their own. It is a simple
//! semaphore-backed limiter: "how many partition queries may be in flight
//! at once", nothing more.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::error::GeoQueryError;

/// Default pool capacity (concurrent partition queries).
pub const DEFAULT_POOL_CAPACITY: usize = 32;

/// A shared, closeable pool of query permits.
///
/// Cloning is cheap and shares the underlying capacity.
#[derive(Debug, Clone)]
pub struct QueryPool {
    inner: Arc<PoolInner>,
}

#[derive(Debug)]
struct PoolInner {
    semaphore: Arc<Semaphore>,
    capacity: usize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl QueryPool {
    /// Creates a pool with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        Self {
            inner: Arc::new(PoolInner {
                semaphore: Arc::new(Semaphore::new(capacity)),
                capacity,
                in_flight: AtomicUsize::new(0),
                peak_in_flight: AtomicUsize::new(0),
            }),
        }
    }

    /// Acquires a permit, waiting while the pool is saturated.
    ///
    /// # Errors
    ///
    /// `PoolRejected` when the pool has been closed.
    pub async fn acquire(&self) -> Result<QueryPermit, GeoQueryError> {
        let permit = self
            .inner
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| GeoQueryError::PoolRejected)?;

        let current = self.inner.in_flight.fetch_add(1, Ordering::Relaxed) + 1;
        self.inner.update_peak(current);

        Ok(QueryPermit {
            _permit: permit,
            inner: Arc::clone(&self.inner),
        })
    }

    /// Closes the pool. Outstanding permits stay valid; further
    /// acquisitions fail with `PoolRejected`.
    pub fn close(&self) {
        self.inner.semaphore.close();
    }

    /// Returns `true` if the pool has been closed.
    pub fn is_closed(&self) -> bool {
        self.inner.semaphore.is_closed()
    }

    /// Total capacity.
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Permits currently held.
    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::Relaxed)
    }

    /// Highest number of permits held at once.
    pub fn peak_in_flight(&self) -> usize {
        self.inner.peak_in_flight.load(Ordering::Relaxed)
    }
}

impl Default for QueryPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}

impl PoolInner {
    fn update_peak(&self, current: usize) {
        let mut peak = self.peak_in_flight.load(Ordering::Relaxed);
        while current > peak {
            match self.peak_in_flight.compare_exchange_weak(
                peak,
                current,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(p) => peak = p,
            }
        }
    }
}

/// A held pool slot. Dropping the permit releases the slot.
#[derive(Debug)]
pub struct QueryPermit {
    _permit: OwnedSemaphorePermit,
    inner: Arc<PoolInner>,
}

impl Drop for QueryPermit {
    fn drop(&mut self) {
        self.inner.in_flight.fetch_sub(1, Ordering::Relaxed);
    }
}
