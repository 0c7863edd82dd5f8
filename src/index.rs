//! Index construction and point queries.

use std::collections::HashSet;
use std::io::Read;
use std::time::Instant;

use geo::{Coord, MultiPolygon, Rect};
use log::debug;
use tzmap_format::{decode_record, parse_envelope};

use crate::archive;
use crate::data;
use crate::error::{Error, Result};
use crate::geometry;
use crate::timezone::TimeZone;

/// Compiled-in library version; archive version markers must carry it as
/// their prefix.
const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// An immutable spatial index from geographic points to IANA time zones.
///
/// Built once (expect a second or two for a worldwide archive), then
/// queried any number of times. All queries take `&self`; a map can be
/// shared across threads freely.
#[derive(Debug, Clone)]
pub struct TimeZoneMap {
    map_version: String,
    initialized_region: Rect<f64>,
    time_zones: Vec<TimeZone>,
}

impl TimeZoneMap {
    /// Build a worldwide map from the bundled archive. Equivalent to
    /// `for_region(-90, -180, 90, 180)`.
    pub fn for_everywhere() -> Result<Self> {
        Self::for_region(-90.0, -180.0, 90.0, 180.0)
    }

    /// Build a map from the bundled archive, restricted to the given
    /// region. Bounds are degrees; each minimum must lie strictly below
    /// its maximum. Boundaries are clipped to the region, and memory stays
    /// proportional to it.
    pub fn for_region(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Result<Self> {
        Self::from_archive(data::bundled_archive(), min_lat, min_lon, max_lat, max_lon)
    }

    /// Build a map from a caller-supplied archive: an uncompressed tar
    /// stream in the map archive layout. This is the seam for tests and
    /// alternative data sources.
    pub fn from_archive<R: Read>(
        reader: R,
        min_lat: f64,
        min_lon: f64,
        max_lat: f64,
        max_lon: f64,
    ) -> Result<Self> {
        if !(min_lat < max_lat) {
            return Err(Error::InvalidRegion(format!(
                "minimum latitude {min_lat} must be less than maximum latitude {max_lat}"
            )));
        }
        if !(min_lon < max_lon) {
            return Err(Error::InvalidRegion(format!(
                "minimum longitude {min_lon} must be less than maximum longitude {max_lon}"
            )));
        }
        build(
            reader,
            geometry::rect_from_bounds(min_lat, min_lon, max_lat, max_lon),
        )
    }

    /// Every zone whose region contains the point, smallest real-world
    /// area first; boundary-inclusive, so a point on a shared border
    /// reports every adjacent zone. Fails with
    /// [`Error::OutOfIndexedArea`] when the point lies outside the region
    /// the map was built for (that boundary itself is inside).
    pub fn overlapping_time_zones(&self, latitude: f64, longitude: f64) -> Result<Vec<&TimeZone>> {
        Ok(self.matches(latitude, longitude)?.collect())
    }

    /// The most specific zone at the point: the first element of
    /// [`overlapping_time_zones`](Self::overlapping_time_zones), if any.
    pub fn overlapping_time_zone(&self, latitude: f64, longitude: f64) -> Result<Option<&TimeZone>> {
        Ok(self.matches(latitude, longitude)?.next())
    }

    /// Distinct zone ids, in first-occurrence (area-ascending) order.
    pub fn known_zone_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.time_zones
            .iter()
            .map(TimeZone::zone_id)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// All entries, in stored (area-ascending) order.
    pub fn time_zones(&self) -> &[TimeZone] {
        &self.time_zones
    }

    /// Full version string of the archive this map was built from,
    /// `"<libraryVersion>:<dataVersion>"`.
    pub fn map_version(&self) -> &str {
        &self.map_version
    }

    /// The region supplied at build time. Queries outside it fail.
    pub fn initialized_region(&self) -> Rect<f64> {
        self.initialized_region
    }

    fn matches(&self, latitude: f64, longitude: f64) -> Result<impl Iterator<Item = &TimeZone>> {
        let point = Coord {
            x: longitude,
            y: latitude,
        };
        if !geometry::envelope_contains(&self.initialized_region, point) {
            return Err(Error::OutOfIndexedArea {
                latitude,
                longitude,
            });
        }
        Ok(self
            .time_zones
            .iter()
            .filter(move |zone| zone.contains(point)))
    }
}

/// One record region that survived the filters, pre-clip.
struct Candidate {
    zone_id: String,
    geometry: MultiPolygon<f64>,
    bounds: Rect<f64>,
    area: f64,
}

fn build<R: Read>(reader: R, region: Rect<f64>) -> Result<TimeZoneMap> {
    let start = Instant::now();
    let mut archive = tar::Archive::new(reader);
    let mut entries = archive.entries()?;

    let marker = entries.next().ok_or_else(|| {
        Error::corrupt("<version marker>", "archive has no entries")
    })??;
    let map_version = check_version(archive::entry_name(&marker)?)?;

    let mut scanned = 0usize;
    let mut candidates: Vec<Candidate> = Vec::new();
    for entry in entries {
        let mut entry = entry?;
        if entry.size() == 0 {
            continue;
        }
        scanned += 1;
        let name = archive::entry_name(&entry)?;
        // Zone ids contain slashes, envelope text never does: the envelope
        // is everything after the last one. Checking it first skips the
        // body decode for entries that cannot intersect the region.
        let text = name.rsplit_once('/').map_or(name.as_str(), |(_, t)| t);
        let envelope = parse_envelope(text).map_err(|err| Error::corrupt(&name, err))?;
        if !geometry::envelopes_intersect(&geometry::envelope_to_rect(&envelope), &region) {
            continue;
        }
        let bytes = archive::read_entry(&mut entry, &name)?;
        let record = decode_record(&bytes).map_err(|err| Error::corrupt(&name, err))?;
        for rings in &record.regions {
            let geometry = geometry::region_to_geometry(rings);
            let Some(bounds) = geometry::bounds(&geometry) else {
                continue;
            };
            // Exact check; the name envelope above is only a loose bound.
            if !geometry::envelopes_intersect(&bounds, &region) {
                continue;
            }
            let area = geometry::planar_area(&geometry);
            candidates.push(Candidate {
                zone_id: record.zone_id.clone(),
                geometry,
                bounds,
                area,
            });
        }
    }
    debug!(
        "scanned {scanned} archive entries, {} regions intersect",
        candidates.len()
    );

    // Smallest real-world region first; ties keep archive order. The key
    // is the area before clipping, so a zone's rank does not change when
    // the requested region truncates it.
    candidates.sort_by(|a, b| a.area.total_cmp(&b.area));

    let window = MultiPolygon::new(vec![region.to_polygon()]);
    let mut time_zones = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if geometry::envelope_covers(&region, &candidate.bounds) {
            time_zones.push(TimeZone::new(candidate.zone_id, candidate.geometry));
            continue;
        }
        // A clip can split one region into several pieces, or erase it.
        for piece in geometry::clip(&candidate.geometry, &window) {
            time_zones.push(TimeZone::new(
                candidate.zone_id.clone(),
                MultiPolygon::new(vec![piece]),
            ));
        }
    }
    debug!("indexed {} entries in {:?}", time_zones.len(), start.elapsed());

    Ok(TimeZoneMap {
        map_version,
        initialized_region: region,
        time_zones,
    })
}

/// Validate the reserved first entry's name,
/// `"<libraryVersion>:<dataVersion>"`. Only the prefix before the colon is
/// checked; the data release may be anything.
fn check_version(marker: String) -> Result<String> {
    let library = marker.split(':').next().unwrap_or_default();
    if library != LIBRARY_VERSION {
        return Err(Error::IncompatibleArchiveVersion {
            detected: marker,
            required: LIBRARY_VERSION.to_owned(),
        });
    }
    Ok(marker)
}
