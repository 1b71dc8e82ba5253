//! Concurrent plan execution.
//!
//! One logical spatial query fans out into N partition queries. The
//! executor spawns one task per query, gates each on the shared
//! [`QueryPool`](super::QueryPool), and drains outcomes as they complete.
//! Store failures are held until every unit has been inspected, so a
//! success is returned only when every submitted query succeeded; pool
//! rejection and cancellation cut the drain short instead of waiting
//! behind unrelated units. Partition outputs are merged in submission
//! order (the queries themselves finish in any order) and the plan's
//! filter is applied exactly once to the union.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::error::GeoQueryError;
use crate::executor::pool::QueryPool;
use crate::executor::traits::{StoreError, StoreQueryExecutor};
use crate::query::{GeoQueryPlan, Item};

/// Outcome of a single partition unit, before aggregation.
enum UnitError {
    PoolRejected,
    Store(StoreError),
}

/// Executes geo query plans concurrently against a store client.
pub struct ParallelQueryExecutor<S: StoreQueryExecutor> {
    store: Arc<S>,
    pool: QueryPool,
}

impl<S: StoreQueryExecutor> ParallelQueryExecutor<S> {
    /// Create an executor borrowing the given pool.
    pub fn new(store: Arc<S>, pool: QueryPool) -> Self {
        Self { store, pool }
    }

    /// Runs every partition query in the plan, merges the results in
    /// submission order and applies the plan's filter once.
    ///
    /// All-or-nothing: if any partition fails, the call fails and no
    /// partial result is returned. An empty plan returns an empty result
    /// without touching the pool.
    ///
    /// # Errors
    ///
    /// - `PoolRejected` when the pool is closed, before dispatch or while
    ///   units are in flight; the rejection is reported as soon as it is
    ///   observed, without waiting for units that still hold permits.
    /// - `PartitionQueryFailed` when a partition query fails; carries the
    ///   failing partition's submission index and the number of sibling
    ///   partitions that succeeded.
    /// - `Interrupted` when a partition task is cancelled underneath us.
    pub async fn execute(&self, plan: GeoQueryPlan) -> Result<Vec<Item>, GeoQueryError> {
        let (queries, filter) = plan.into_parts();
        if queries.is_empty() {
            return Ok(Vec::new());
        }
        if self.pool.is_closed() {
            return Err(GeoQueryError::PoolRejected);
        }

        let total = queries.len();
        debug!(partitions = total, "executing geo query plan");

        let mut tasks = JoinSet::new();
        for (partition, query) in queries.into_iter().enumerate() {
            let store = Arc::clone(&self.store);
            let pool = self.pool.clone();
            tasks.spawn(async move {
                let outcome = async {
                    let _permit = pool.acquire().await.map_err(|_| UnitError::PoolRejected)?;
                    store.run(query).await.map_err(UnitError::Store)
                }
                .await;
                (partition, outcome)
            });
        }

        // Outcomes arrive in completion order; slots re-impose submission
        // order on the merge. A failed slot stays empty, so the first
        // empty slot after the drain is the first failed partition in
        // submission order.
        let mut slots: Vec<Option<Vec<Item>>> = vec![None; total];
        let mut store_failures: HashMap<usize, StoreError> = HashMap::new();
        let mut panic_message: Option<String> = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((partition, Ok(items))) => slots[partition] = Some(items),
                Ok((partition, Err(UnitError::Store(source)))) => {
                    store_failures.insert(partition, source);
                }
                Ok((_, Err(UnitError::PoolRejected))) => {
                    warn!("pool closed while partition queries were in flight");
                    return Err(GeoQueryError::PoolRejected);
                }
                Err(join_err) if join_err.is_cancelled() => {
                    return Err(GeoQueryError::Interrupted);
                }
                Err(join_err) => {
                    panic_message.get_or_insert_with(|| join_err.to_string());
                }
            }
        }

        let succeeded = slots.iter().filter(|slot| slot.is_some()).count();
        if succeeded < total {
            // A failed slot with no recorded store error was a panicked
            // task; its outcome never came back through the unit channel.
            let partition = slots
                .iter()
                .position(|slot| slot.is_none())
                .unwrap_or_default();
            let source = store_failures.remove(&partition).unwrap_or_else(|| {
                StoreError::permanent(format!(
                    "partition task panicked: {}",
                    panic_message.unwrap_or_else(|| "no panic details".to_string())
                ))
            });
            warn!(partition, succeeded, total, "partition query failed");
            return Err(GeoQueryError::PartitionQueryFailed {
                partition,
                succeeded,
                source,
            });
        }

        let items: Vec<Item> = slots.into_iter().flatten().flatten().collect();
        debug!(partitions = total, items = items.len(), "merged partition results");
        Ok(filter.filter(items))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::filter::GeoFilter;
    use crate::query::{AttributeValue, PartitionQuery, QueryTemplate};

    /// Store stub serving fixed items per partition range minimum.
    struct MapStore {
        items: HashMap<i64, Vec<Item>>,
        fail_on: Option<i64>,
        calls: AtomicUsize,
    }

    impl MapStore {
        fn new(items: HashMap<i64, Vec<Item>>) -> Self {
            Self {
                items,
                fail_on: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing_on(mut self, range_min: i64) -> Self {
            self.fail_on = Some(range_min);
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl StoreQueryExecutor for MapStore {
        async fn run(&self, query: PartitionQuery) -> Result<Vec<Item>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let (min, _) = query.range_bounds();
            if self.fail_on == Some(min) {
                return Err(StoreError::retryable("simulated partition failure"));
            }
            Ok(self.items.get(&min).cloned().unwrap_or_default())
        }
    }

    /// Store stub that panics for one partition range minimum.
    struct PanickyStore {
        panic_on: i64,
    }

    impl StoreQueryExecutor for PanickyStore {
        async fn run(&self, query: PartitionQuery) -> Result<Vec<Item>, StoreError> {
            let (min, _) = query.range_bounds();
            if min == self.panic_on {
                panic!("simulated store crash");
            }
            Ok(Vec::new())
        }
    }

    /// Store stub whose queries never finish on their own.
    struct StuckStore;

    impl StoreQueryExecutor for StuckStore {
        async fn run(&self, _query: PartitionQuery) -> Result<Vec<Item>, StoreError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }
    }

    fn query_for(min: i64, max: i64) -> PartitionQuery {
        PartitionQuery::new(
            QueryTemplate::new("places"),
            "geohash-index".to_string(),
            "geoHashKey".to_string(),
            AttributeValue::number(min / 100),
            "geohash".to_string(),
            min,
            max,
        )
    }

    fn item(id: &str) -> Item {
        let mut item = Item::new();
        item.insert("id".to_string(), AttributeValue::string(id));
        item
    }

    fn accept_all() -> GeoFilter {
        GeoFilter::all(vec![])
    }

    fn reject_all() -> GeoFilter {
        GeoFilter::negate(GeoFilter::all(vec![]))
    }

    #[tokio::test]
    async fn test_empty_plan_short_circuits() {
        let store = Arc::new(MapStore::new(HashMap::new()));
        let pool = QueryPool::new(1);
        pool.close(); // even a closed pool must not matter
        let executor = ParallelQueryExecutor::new(Arc::clone(&store), pool);

        let plan = GeoQueryPlan::new(Vec::new(), accept_all());
        let items = executor.execute(plan).await.unwrap();

        assert!(items.is_empty());
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_union_in_submission_order() {
        let mut data = HashMap::new();
        data.insert(100, vec![item("a"), item("b")]);
        data.insert(300, vec![item("c")]);
        let store = Arc::new(MapStore::new(data));
        let executor = ParallelQueryExecutor::new(Arc::clone(&store), QueryPool::new(4));

        let plan = GeoQueryPlan::new(
            vec![query_for(100, 199), query_for(300, 399)],
            accept_all(),
        );
        let items = executor.execute(plan).await.unwrap();

        assert_eq!(items, vec![item("a"), item("b"), item("c")]);
        assert_eq!(store.calls(), 2);
    }

    #[tokio::test]
    async fn test_reject_all_filter_empties_result() {
        let mut data = HashMap::new();
        data.insert(100, vec![item("a")]);
        let store = Arc::new(MapStore::new(data));
        let executor = ParallelQueryExecutor::new(store, QueryPool::new(4));

        let plan = GeoQueryPlan::new(vec![query_for(100, 199)], reject_all());
        let items = executor.execute(plan).await.unwrap();

        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_single_failure_fails_whole_call() {
        let mut data = HashMap::new();
        data.insert(100, vec![item("a")]);
        data.insert(200, vec![item("b")]);
        data.insert(300, vec![item("c")]);
        let store = Arc::new(MapStore::new(data).failing_on(200));
        let executor = ParallelQueryExecutor::new(store, QueryPool::new(4));

        let plan = GeoQueryPlan::new(
            vec![
                query_for(100, 199),
                query_for(200, 299),
                query_for(300, 399),
            ],
            accept_all(),
        );
        let err = executor.execute(plan).await.unwrap_err();

        match err {
            GeoQueryError::PartitionQueryFailed {
                partition,
                succeeded,
                ..
            } => {
                assert_eq!(partition, 1);
                assert_eq!(succeeded, 2);
            }
            other => panic!("expected PartitionQueryFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_panicking_partition_reported_as_failure() {
        let store = Arc::new(PanickyStore { panic_on: 200 });
        let executor = ParallelQueryExecutor::new(store, QueryPool::new(4));

        let plan = GeoQueryPlan::new(
            vec![
                query_for(100, 199),
                query_for(200, 299),
                query_for(300, 399),
            ],
            accept_all(),
        );
        let err = executor.execute(plan).await.unwrap_err();

        match err {
            GeoQueryError::PartitionQueryFailed {
                partition,
                succeeded,
                source,
            } => {
                assert_eq!(partition, 1);
                assert_eq!(succeeded, 2);
                assert!(!source.is_retryable);
                assert!(source.message.contains("partition task panicked"));
            }
            other => panic!("expected PartitionQueryFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_closed_pool_rejects_before_dispatch() {
        let store = Arc::new(MapStore::new(HashMap::new()));
        let pool = QueryPool::new(2);
        pool.close();
        let executor = ParallelQueryExecutor::new(Arc::clone(&store), pool);

        let plan = GeoQueryPlan::new(vec![query_for(100, 199)], accept_all());
        let err = executor.execute(plan).await.unwrap_err();

        assert!(matches!(err, GeoQueryError::PoolRejected));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_pool_closed_mid_flight_rejects_without_waiting() {
        // One unit holds the only permit and never finishes; the other is
        // still waiting in acquire when the pool closes. The rejection
        // must come back promptly, not after the permit holder.
        let pool = QueryPool::new(1);
        let executor = ParallelQueryExecutor::new(Arc::new(StuckStore), pool.clone());

        let running = tokio::spawn(async move {
            let plan = GeoQueryPlan::new(
                vec![query_for(100, 199), query_for(200, 299)],
                accept_all(),
            );
            executor.execute(plan).await
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        pool.close();

        let err = tokio::time::timeout(Duration::from_secs(2), running)
            .await
            .expect("rejection should not wait on the stuck permit holder")
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, GeoQueryError::PoolRejected));
    }

    #[tokio::test]
    async fn test_pool_smaller_than_plan_still_completes() {
        let mut data = HashMap::new();
        for min in [100, 200, 300, 400] {
            data.insert(min, vec![item(&format!("p{}", min))]);
        }
        let store = Arc::new(MapStore::new(data));
        let pool = QueryPool::new(1);
        let executor = ParallelQueryExecutor::new(store, pool.clone());

        let plan = GeoQueryPlan::new(
            vec![
                query_for(100, 199),
                query_for(200, 299),
                query_for(300, 399),
                query_for(400, 499),
            ],
            accept_all(),
        );
        let items = executor.execute(plan).await.unwrap();

        assert_eq!(items.len(), 4);
        assert_eq!(pool.peak_in_flight(), 1);
    }
}
