//! Geometry primitives for client-side shape tests.
//!
//! The query core only needs two geometric facts about an item: whether its
//! coordinates fall inside a lat/long rectangle, and how far they are from a
//! center point. Both use a spherical earth model; the hash-partitioned
//! store itself never sees these shapes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean earth radius in meters, used for great-circle distances.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A latitude/longitude point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lng: f64,
}

impl LatLng {
    /// Create a new point from degrees.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// An axis-aligned lat/long rectangle.
///
/// `min` is the south-west corner and `max` the north-east corner.
/// Boundary points are contained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngRect {
    /// South-west corner.
    pub min: LatLng,
    /// North-east corner.
    pub max: LatLng,
}

impl LatLngRect {
    /// Create a rectangle from its south-west and north-east corners.
    pub fn new(min: LatLng, max: LatLng) -> Self {
        Self { min, max }
    }

    /// Returns `true` if the point lies inside the rectangle (inclusive).
    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.min.lat
            && point.lat <= self.max.lat
            && point.lng >= self.min.lng
            && point.lng <= self.max.lng
    }
}

/// Great-circle distance between two points in meters (haversine).
pub fn haversine_meters(a: LatLng, b: LatLng) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}
