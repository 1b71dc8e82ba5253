//! Concurrent execution of geo query plans.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  ParallelQueryExecutor                      │
//! │  Spawn one task per partition query, join all,              │
//! │  merge in submission order, filter once                     │
//! ├────────────────────────────┬────────────────────────────────┤
//! │  QueryPool                 │  StoreQueryExecutor            │
//! │  Caller-owned semaphore    │  External store client:        │
//! │  bounding in-flight        │  network I/O + pagination      │
//! │  partition queries         │  of a single query             │
//! └────────────────────────────┴────────────────────────────────┘
//! ```
//!
//! The pool is the only shared mutable resource; partition queries are
//! moved into their task and never shared, so no locking is needed around
//! query data itself.

mod parallel;
mod pool;
mod traits;

pub use parallel::ParallelQueryExecutor;
pub use pool::{QueryPermit, QueryPool, DEFAULT_POOL_CAPACITY};
pub use traits::{StoreError, StoreQueryExecutor};
