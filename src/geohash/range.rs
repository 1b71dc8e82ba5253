//! Geohash range interval type.
//!
//! A [`GeohashRange`] is a contiguous interval of integer-encoded spatial
//! cell identifiers. Ranges are produced by a region coverer and, once
//! constructed, never change; the `min <= max` invariant is enforced at
//! construction so everything downstream can rely on it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GeoQueryError;

/// A contiguous, inclusive interval of geohash-encoded sort-key values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "UncheckedBounds")]
pub struct GeohashRange {
    min: i64,
    max: i64,
}

/// Raw bounds as they arrive off the wire; deserialization routes through
/// [`GeohashRange::new`] so inverted intervals cannot enter by that door.
#[derive(Deserialize)]
struct UncheckedBounds {
    min: i64,
    max: i64,
}

impl TryFrom<UncheckedBounds> for GeohashRange {
    type Error = GeoQueryError;

    fn try_from(bounds: UncheckedBounds) -> Result<Self, GeoQueryError> {
        Self::new(bounds.min, bounds.max)
    }
}

impl GeohashRange {
    /// Create a range, enforcing `min <= max`.
    pub fn new(min: i64, max: i64) -> Result<Self, GeoQueryError> {
        if min > max {
            return Err(GeoQueryError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound (inclusive).
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Upper bound (inclusive).
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Number of geohash values covered by the range.
    ///
    /// Saturates at `u64::MAX` for the full `i64` domain, which spans one
    /// more value than `u64` can represent.
    pub fn span(&self) -> u64 {
        self.max.abs_diff(self.min).saturating_add(1)
    }

    /// Returns `true` if the value lies within the range (inclusive).
    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for GeohashRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let range = GeohashRange::new(100, 199).unwrap();
        assert_eq!(range.min(), 100);
        assert_eq!(range.max(), 199);
    }

    #[test]
    fn test_new_single_value() {
        let range = GeohashRange::new(42, 42).unwrap();
        assert_eq!(range.span(), 1);
    }

    #[test]
    fn test_new_rejects_inverted_bounds() {
        let err = GeohashRange::new(200, 100).unwrap_err();
        assert!(matches!(
            err,
            GeoQueryError::InvalidRange { min: 200, max: 100 }
        ));
    }

    #[test]
    fn test_span() {
        assert_eq!(GeohashRange::new(100, 149).unwrap().span(), 50);
        assert_eq!(GeohashRange::new(-10, 10).unwrap().span(), 21);
    }

    #[test]
    fn test_span_saturates_on_full_domain() {
        let range = GeohashRange::new(i64::MIN, i64::MAX).unwrap();
        assert_eq!(range.span(), u64::MAX);
    }

    #[test]
    fn test_deserialize_rejects_inverted_bounds() {
        let err = serde_json::from_str::<GeohashRange>(r#"{"min":500,"max":100}"#).unwrap_err();
        assert!(err.to_string().contains("invalid geohash range"));
    }

    #[test]
    fn test_deserialize_round_trip() {
        let range = GeohashRange::new(100, 199).unwrap();
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(serde_json::from_str::<GeohashRange>(&json).unwrap(), range);
    }

    #[test]
    fn test_contains() {
        let range = GeohashRange::new(100, 199).unwrap();
        assert!(range.contains(100));
        assert!(range.contains(150));
        assert!(range.contains(199));
        assert!(!range.contains(99));
        assert!(!range.contains(200));
    }

    #[test]
    fn test_display() {
        let range = GeohashRange::new(300, 399).unwrap();
        assert_eq!(format!("{}", range), "[300, 399]");
    }
}
