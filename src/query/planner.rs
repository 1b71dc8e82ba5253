//! Plan generation: region to executable plan.
//!
//! The planner walks the full fan-out path for one logical spatial query:
//!
//! ```text
//! region ──cover──▶ coarse ranges ──split──▶ fine ranges
//!        ──build──▶ partition queries ──couple──▶ GeoQueryPlan
//! ```
//!
//! The resulting plan pairs the partition queries with the filter derived
//! from the same shape, so the executor can discard false positives without
//! knowing anything about geometry.

use tracing::debug;

use crate::config::GeoConfig;
use crate::error::GeoQueryError;
use crate::filter::{CoordColumns, GeoFilter};
use crate::geohash::{GeoRegion, GeohashCoverer};
use crate::geom::{LatLng, LatLngRect};
use crate::query::builder::PartitionQueryBuilder;
use crate::query::plan::GeoQueryPlan;
use crate::query::template::QueryTemplate;

/// Turns geospatial regions into executable [`GeoQueryPlan`]s.
pub struct GeoQueryPlanner<C: GeohashCoverer> {
    config: GeoConfig,
    coverer: C,
    coords: CoordColumns,
}

impl<C: GeohashCoverer> GeoQueryPlanner<C> {
    /// Create a planner.
    ///
    /// `coords` names the item attributes the result filter reads
    /// coordinates from.
    pub fn new(config: GeoConfig, coverer: C, coords: CoordColumns) -> Self {
        Self {
            config,
            coverer,
            coords,
        }
    }

    /// The layout this planner generates queries for.
    pub fn config(&self) -> &GeoConfig {
        &self.config
    }

    /// Plan a bounding-rectangle query.
    pub fn rectangle_plan(
        &self,
        template: &QueryTemplate,
        bounds: LatLngRect,
        discriminator: Option<&str>,
    ) -> Result<GeoQueryPlan, GeoQueryError> {
        let filter = GeoFilter::rectangle(self.coords.clone(), bounds);
        self.plan(template, &GeoRegion::Rectangle(bounds), filter, discriminator)
    }

    /// Plan a radius query.
    pub fn radius_plan(
        &self,
        template: &QueryTemplate,
        center: LatLng,
        radius_meters: f64,
        discriminator: Option<&str>,
    ) -> Result<GeoQueryPlan, GeoQueryError> {
        let filter = GeoFilter::radius(self.coords.clone(), center, radius_meters);
        self.plan(
            template,
            &GeoRegion::Radius {
                center,
                radius_meters,
            },
            filter,
            discriminator,
        )
    }

    fn plan(
        &self,
        template: &QueryTemplate,
        region: &GeoRegion,
        filter: GeoFilter,
        discriminator: Option<&str>,
    ) -> Result<GeoQueryPlan, GeoQueryError> {
        let coarse = self.coverer.cover(region);
        let builder = PartitionQueryBuilder::new(&self.config, &self.coverer);

        let mut queries = Vec::with_capacity(coarse.len());
        for outer in &coarse {
            let fine = self.coverer.split(*outer, self.config.hash_key_length());
            queries.extend(builder.build(template, &fine, discriminator)?);
        }

        debug!(
            coarse_ranges = coarse.len(),
            partition_queries = queries.len(),
            "generated geo query plan"
        );
        Ok(GeoQueryPlan::new(queries, filter))
    }
}
