/// A latitude/longitude pair in degrees (WGS84), at wire precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub latitude: f32,
    pub longitude: f32,
}

impl LatLon {
    #[inline]
    pub fn new(latitude: f32, longitude: f32) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Axis-aligned bounding rectangle between two corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub lower_left: LatLon,
    pub upper_right: LatLon,
}

impl Envelope {
    #[inline]
    pub fn new(min_lat: f32, min_lon: f32, max_lat: f32, max_lon: f32) -> Self {
        Self {
            lower_left: LatLon::new(min_lat, min_lon),
            upper_right: LatLon::new(max_lat, max_lon),
        }
    }

    #[inline]
    pub fn min_lat(&self) -> f32 {
        self.lower_left.latitude
    }

    #[inline]
    pub fn min_lon(&self) -> f32 {
        self.lower_left.longitude
    }

    #[inline]
    pub fn max_lat(&self) -> f32 {
        self.upper_right.latitude
    }

    #[inline]
    pub fn max_lon(&self) -> f32 {
        self.upper_right.longitude
    }
}

/// Closed boundary line. Point order is meaningful and the final point is
/// not repeated; winding distinguishes outer rings from holes.
pub type Ring = Vec<LatLon>;

/// One contiguous area: outer ring first, then hole and island rings.
pub type Region = Vec<Ring>;

/// One zone's boundary payload as stored in a map archive entry body.
///
/// A zone may own several disjoint regions (island chains), and the same
/// `zone_id` may recur across records in an archive.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeZoneRecord {
    pub zone_id: String,
    pub regions: Vec<Region>,
}
