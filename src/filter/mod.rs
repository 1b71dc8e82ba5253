//! Client-side geo filters.
//!
//! Coarse hash partitioning can only guarantee a superset of the true
//! matches: an item can fall inside a covering geohash cell but outside the
//! requested shape. A [`GeoFilter`] discards those false positives after the
//! partition results are merged.
//!
//! Filters are pure and stateless: the same filter value may be applied to
//! many concurrent plans. The variant set is closed (rectangle, radius, and
//! the AND/OR/NOT composites), so new shapes are added here rather than by
//! open-ended trait objects.

use serde::{Deserialize, Serialize};

use crate::geom::{haversine_meters, LatLng, LatLngRect};
use crate::query::Item;

/// Names of the item attributes holding a record's coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordColumns {
    lat: String,
    lng: String,
}

impl CoordColumns {
    /// Create an extractor reading `lat` and `lng` from the given columns.
    pub fn new(lat: impl Into<String>, lng: impl Into<String>) -> Self {
        Self {
            lat: lat.into(),
            lng: lng.into(),
        }
    }

    /// Extract an item's coordinates.
    ///
    /// Returns `None` when either attribute is missing or non-numeric.
    pub fn extract(&self, item: &Item) -> Option<LatLng> {
        let lat = item.get(&self.lat)?.as_f64()?;
        let lng = item.get(&self.lng)?.as_f64()?;
        Some(LatLng::new(lat, lng))
    }
}

/// Rectangle containment test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleFilter {
    coords: CoordColumns,
    bounds: LatLngRect,
}

impl RectangleFilter {
    fn contains(&self, item: &Item) -> bool {
        self.coords
            .extract(item)
            .is_some_and(|point| self.bounds.contains(point))
    }
}

/// Radius (great-circle distance) containment test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadiusFilter {
    coords: CoordColumns,
    center: LatLng,
    radius_meters: f64,
}

impl RadiusFilter {
    fn contains(&self, item: &Item) -> bool {
        self.coords
            .extract(item)
            .is_some_and(|point| haversine_meters(self.center, point) <= self.radius_meters)
    }
}

/// A composable, pure predicate over items.
///
/// Items with missing or non-numeric coordinates never match a shape
/// variant; they are exactly the kind of record the post-filter exists to
/// discard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GeoFilter {
    /// Containment in a lat/long rectangle.
    Rectangle(RectangleFilter),
    /// Containment within a radius of a center point.
    Radius(RadiusFilter),
    /// All sub-filters must match. Empty matches everything.
    All(Vec<GeoFilter>),
    /// At least one sub-filter must match. Empty matches nothing.
    Any(Vec<GeoFilter>),
    /// The sub-filter must not match.
    Not(Box<GeoFilter>),
}

impl GeoFilter {
    /// A rectangle containment filter.
    pub fn rectangle(coords: CoordColumns, bounds: LatLngRect) -> Self {
        Self::Rectangle(RectangleFilter { coords, bounds })
    }

    /// A radius containment filter.
    pub fn radius(coords: CoordColumns, center: LatLng, radius_meters: f64) -> Self {
        Self::Radius(RadiusFilter {
            coords,
            center,
            radius_meters,
        })
    }

    /// Logical AND of the given filters.
    pub fn all(filters: Vec<GeoFilter>) -> Self {
        Self::All(filters)
    }

    /// Logical OR of the given filters.
    pub fn any(filters: Vec<GeoFilter>) -> Self {
        Self::Any(filters)
    }

    /// Logical negation of the given filter.
    pub fn negate(filter: GeoFilter) -> Self {
        Self::Not(Box::new(filter))
    }

    /// Returns `true` if the item satisfies the filter.
    pub fn matches(&self, item: &Item) -> bool {
        match self {
            Self::Rectangle(filter) => filter.contains(item),
            Self::Radius(filter) => filter.contains(item),
            Self::All(filters) => filters.iter().all(|f| f.matches(item)),
            Self::Any(filters) => filters.iter().any(|f| f.matches(item)),
            Self::Not(filter) => !filter.matches(item),
        }
    }

    /// Keeps the items satisfying the filter, preserving input order.
    pub fn filter(&self, items: Vec<Item>) -> Vec<Item> {
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}
