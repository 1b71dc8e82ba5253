//! georange - Geospatial query fan-out for hash-partitioned key-value stores
//!
//! The target store exposes only equality lookups on a partition hash key
//! and range lookups on a sort key within that partition (a DynamoDB-style
//! secondary-index model); it has no native geospatial indexing. This crate
//! turns one logical region query into N physical range queries, one per
//! geohash cell, runs them concurrently against a bounded worker pool, and
//! reconciles the results: coarse hash partitioning can only guarantee a
//! superset of the true matches, so the merged union is post-filtered
//! against the requested shape.
//!
//! # Control flow
//!
//! ```text
//! region ──▶ GeohashCoverer ──▶ coarse ranges ──▶ split ──▶ fine ranges
//!        ──▶ PartitionQueryBuilder ──▶ partition queries
//!        ──▶ ParallelQueryExecutor ──▶ raw items ──▶ GeoFilter ──▶ result
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use georange::config::GeoConfig;
//! use georange::executor::{ParallelQueryExecutor, QueryPool};
//! use georange::filter::CoordColumns;
//! use georange::geom::{LatLng, LatLngRect};
//! use georange::query::{GeoQueryPlanner, QueryTemplate};
//!
//! let config = GeoConfig::builder()
//!     .with_hash_key_column("geoHashKey")
//!     .with_range_key_column("geohash")
//!     .with_index_name("geohash-index")
//!     .build()?;
//!
//! let planner = GeoQueryPlanner::new(config, coverer, CoordColumns::new("lat", "lng"));
//! let plan = planner.rectangle_plan(
//!     &QueryTemplate::new("places"),
//!     LatLngRect::new(LatLng::new(40.0, -75.0), LatLng::new(41.0, -73.0)),
//!     None,
//! )?;
//!
//! let executor = ParallelQueryExecutor::new(Arc::new(store_client), QueryPool::new(32));
//! let items = executor.execute(plan).await?;
//! ```
//!
//! The geohash covering math ([`geohash::GeohashCoverer`]) and the store
//! wire client ([`executor::StoreQueryExecutor`]) are external
//! collaborators supplied by the application.

pub mod config;
pub mod error;
pub mod executor;
pub mod filter;
pub mod geohash;
pub mod geom;
pub mod query;

/// Version of the georange library.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
