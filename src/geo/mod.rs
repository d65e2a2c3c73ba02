//! Geometry and statistics utilities.
//!
//! Shared leaves used by the analyzer, the strategy executors, and the
//! local search refiner: great-circle distance, bearings, centroids,
//! bounding boxes, and axis projection.

mod bearing;
mod distance;
mod extent;

pub use bearing::{
    axis_projection, bearing_change_deg, initial_bearing_deg, primary_direction, PrimaryDirection,
};
pub use distance::{backtrack_count, haversine_km, route_distance_km};
pub use extent::{centroid, BoundingBox};
