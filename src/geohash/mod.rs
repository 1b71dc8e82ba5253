//! Geohash ranges and region covering.
//!
//! A geo query is routed through integer geohash intervals: a coverer turns
//! the requested shape into coarse [`GeohashRange`]s, each coarse range is
//! split at the configured hash-key length, and every fine range becomes one
//! partition query.

mod coverer;
mod range;

pub use coverer::{digit_prefix_hash_key, GeoRegion, GeohashCoverer};
pub use range::GeohashRange;
