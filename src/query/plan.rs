//! Geo query plans.
//!
//! A [`GeoQueryPlan`] couples "what to run" (the partition queries) with
//! "how to discard false positives" (the result filter). The two travel
//! together because the filter is meaningless without knowing which shape
//! the queries were derived from. A plan is created per logical spatial
//! query, consumed once by the executor, then discarded.

use crate::filter::GeoFilter;
use crate::query::partition::PartitionQuery;

/// One logical spatial query, ready for concurrent execution.
#[derive(Debug, Clone)]
pub struct GeoQueryPlan {
    queries: Vec<PartitionQuery>,
    result_filter: GeoFilter,
}

impl GeoQueryPlan {
    /// Couple a set of partition queries with their result filter.
    pub fn new(queries: Vec<PartitionQuery>, result_filter: GeoFilter) -> Self {
        Self {
            queries,
            result_filter,
        }
    }

    /// The partition queries, in submission order.
    pub fn queries(&self) -> &[PartitionQuery] {
        &self.queries
    }

    /// The filter to apply to the merged results.
    pub fn result_filter(&self) -> &GeoFilter {
        &self.result_filter
    }

    /// Number of partition queries in the plan.
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Returns `true` if the plan contains no queries.
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Splits the plan into its queries and filter.
    pub fn into_parts(self) -> (Vec<PartitionQuery>, GeoFilter) {
        (self.queries, self.result_filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_plan() {
        let plan = GeoQueryPlan::new(Vec::new(), GeoFilter::all(vec![]));
        assert!(plan.is_empty());
        assert_eq!(plan.len(), 0);
    }

    #[test]
    fn test_into_parts() {
        let plan = GeoQueryPlan::new(Vec::new(), GeoFilter::any(vec![]));
        let (queries, filter) = plan.into_parts();
        assert!(queries.is_empty());
        assert_eq!(filter, GeoFilter::any(vec![]));
    }
}
