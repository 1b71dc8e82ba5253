//! Query data model, builder and planner.
//!
//! The flow through this module mirrors the fan-out path: a caller-owned
//! [`QueryTemplate`] plus split geohash ranges become immutable
//! [`PartitionQuery`] values via [`PartitionQueryBuilder`];
//! [`GeoQueryPlanner`] composes the whole region-to-plan walk and couples
//! the queries with their result filter in a [`GeoQueryPlan`].

mod builder;
mod partition;
mod plan;
mod planner;
mod template;

pub use builder::PartitionQueryBuilder;
pub use partition::{KeyCondition, PartitionQuery};
pub use plan::GeoQueryPlan;
pub use planner::GeoQueryPlanner;
pub use template::{AttributeValue, Item, QueryTemplate};
