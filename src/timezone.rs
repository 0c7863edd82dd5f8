use geo::{Coord, MultiPolygon, Point};

use crate::error::{Error, Result};
use crate::geometry;

/// One indexed entry: a zone id and one contiguous region of that zone.
///
/// The same id can appear on several entries: island chains are stored as
/// separate regions, and the build-time clip window can split one region
/// into several pieces.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeZone {
    zone_id: String,
    region: MultiPolygon<f64>,
}

impl TimeZone {
    pub(crate) fn new(zone_id: String, region: MultiPolygon<f64>) -> Self {
        Self { zone_id, region }
    }

    /// IANA identifier, e.g. `Europe/Lisbon`.
    #[inline]
    pub fn zone_id(&self) -> &str {
        &self.zone_id
    }

    /// Boundary geometry, clipped to the indexed region at build time.
    #[inline]
    pub fn region(&self) -> &MultiPolygon<f64> {
        &self.region
    }

    /// Boundary-inclusive containment in lon/lat coordinates.
    pub(crate) fn contains(&self, point: Coord<f64>) -> bool {
        geometry::contains_inclusive(&self.region, point)
    }

    /// Meters on the WGS84 ellipsoid from the point to the nearest spot on
    /// this region's boundary, hole and island rings included. Exactly `0`
    /// for a point on the boundary itself. Fails with
    /// [`Error::PointNotInRegion`] when the region does not inclusively
    /// contain the point.
    pub fn distance_from_boundary(&self, latitude: f64, longitude: f64) -> Result<f64> {
        let point = Point::new(longitude, latitude);
        if !self.contains(point.0) {
            return Err(Error::PointNotInRegion {
                latitude,
                longitude,
                zone_id: self.zone_id.clone(),
            });
        }
        let nearest = geometry::nearest_boundary_point(&self.region, point);
        Ok(geometry::geodesic_distance(point, nearest))
    }
}
