//! Region covering seam.
//!
//! Converting a lat/long shape into minimal covering geohash cell ranges is
//! projection math that lives outside this crate (an S2-style cell library).
//! The query core only depends on the [`GeohashCoverer`] contract: cover a
//! region with coarse ranges, split a range at a hash-key-length boundary,
//! and derive the partition hash key for a geohash value.

use crate::geohash::GeohashRange;
use crate::geom::{LatLng, LatLngRect};

/// A geospatial region to be covered by geohash ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeoRegion {
    /// An axis-aligned lat/long rectangle.
    Rectangle(LatLngRect),
    /// A spherical cap: all points within `radius_meters` of `center`.
    Radius {
        center: LatLng,
        radius_meters: f64,
    },
}

/// Produces geohash range coverings for geospatial regions.
///
/// Implementations must uphold two contracts the executor relies on:
///
/// - `cover` returns an ordered sequence of non-overlapping ranges.
/// - `split` exactly partitions its input: the sub-ranges tile the original
///   interval with no gaps and no overlaps, aligned to `hash_key_length`.
pub trait GeohashCoverer: Send + Sync {
    /// Returns coarse geohash ranges covering the region, in order.
    fn cover(&self, region: &GeoRegion) -> Vec<GeohashRange>;

    /// Splits a coarse range into finer ranges aligned to the given
    /// hash key length.
    fn split(&self, range: GeohashRange, hash_key_length: u32) -> Vec<GeohashRange>;

    /// Derives the partition hash key for a geohash value.
    ///
    /// The default keeps the first `hash_key_length` decimal digits of the
    /// geohash, consuming one extra digit for a leading minus sign.
    fn hash_key(&self, geohash: i64, hash_key_length: u32) -> i64 {
        digit_prefix_hash_key(geohash, hash_key_length)
    }
}

/// Truncates a geohash to its first `hash_key_length` decimal digits.
///
/// Negative values keep their sign and give up one digit position to it,
/// so the rendered key never exceeds `hash_key_length` characters plus the
/// sign. Values already at or below the key length pass through unchanged.
pub fn digit_prefix_hash_key(geohash: i64, hash_key_length: u32) -> i64 {
    let target = if geohash < 0 {
        hash_key_length + 1
    } else {
        hash_key_length
    };
    let rendered_len = decimal_len(geohash);
    if rendered_len <= target {
        return geohash;
    }
    geohash / 10i64.pow(rendered_len - target)
}

/// Length of the decimal rendering of `value`, including a leading sign.
fn decimal_len(value: i64) -> u32 {
    let mut n = value.unsigned_abs();
    let mut len = if value < 0 { 1 } else { 0 };
    loop {
        len += 1;
        n /= 10;
        if n == 0 {
            return len;
        }
    }
}
