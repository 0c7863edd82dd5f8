//! Geometry over the `geo` engine.
//!
//! Everything the index builder and query engine need from the geometry
//! library goes through here: wire rings to `MultiPolygon` conversion,
//! inclusive containment, clipping, areas, boundary distances, and the
//! envelope arithmetic. Envelope checks are written as explicit inclusive
//! comparisons so the indexed-region boundary convention lives in one
//! place.

use geo::{
    Area, BooleanOps, BoundingRect, Closest, ClosestPoint, Coord, Distance, Euclidean, Geodesic,
    Intersects, LineString, MultiPolygon, Point, Polygon, Rect,
};
use tzmap_format::{Envelope, Ring};

/// Build a region's runtime geometry from its serialized rings.
///
/// The first ring is always an outer boundary and fixes the outer winding.
/// Later rings wound the same way start a new polygon (re-entrant land);
/// rings wound the other way are holes in the most recent outer ring.
pub(crate) fn region_to_geometry(rings: &[Ring]) -> MultiPolygon<f64> {
    /// Ensure first and last are the same for geo::LineString coords.
    fn ensure_closed(coords: &mut Vec<Coord<f64>>) {
        if !coords.is_empty() && coords[0] != coords[coords.len() - 1] {
            coords.push(coords[0]);
        }
    }

    /// Signed area of a closed coord list (sign encodes winding).
    fn signed_area(pts: &[Coord<f64>]) -> f64 {
        let mut a = 0.0;
        for w in pts.windows(2) {
            a += w[0].x * w[1].y - w[1].x * w[0].y;
        }
        a / 2.0
    }

    let mut polygons: Vec<Polygon<f64>> = Vec::new();
    let mut exterior: Option<LineString<f64>> = None;
    let mut holes: Vec<LineString<f64>> = Vec::new();
    let mut outer_winding: Option<bool> = None;

    for ring in rings {
        let mut coords: Vec<Coord<f64>> = ring
            .iter()
            .map(|point| Coord {
                x: f64::from(point.longitude),
                y: f64::from(point.latitude),
            })
            .collect();
        ensure_closed(&mut coords);
        let ls = LineString(coords);
        let winding = signed_area(&ls.0) >= 0.0;
        let is_outer = *outer_winding.get_or_insert(winding) == winding;
        if is_outer {
            if let Some(ext) = exterior.take() {
                polygons.push(Polygon::new(ext, std::mem::take(&mut holes)));
            }
            exterior = Some(ls);
        } else {
            holes.push(ls);
        }
    }
    if let Some(ext) = exterior {
        polygons.push(Polygon::new(ext, holes));
    }
    MultiPolygon(polygons)
}

/// Exact bounding box of a geometry; `None` when it has no coordinates.
pub(crate) fn bounds(geometry: &MultiPolygon<f64>) -> Option<Rect<f64>> {
    geometry.bounding_rect()
}

/// Planar (degrees-squared) area, holes subtracted. Only used for ordering,
/// so the unit never surfaces.
pub(crate) fn planar_area(geometry: &MultiPolygon<f64>) -> f64 {
    geometry.unsigned_area()
}

/// Boundary-inclusive containment: points on an edge or vertex count.
pub(crate) fn contains_inclusive(geometry: &MultiPolygon<f64>, point: Coord<f64>) -> bool {
    geometry.intersects(&point)
}

/// Intersect a geometry with the clip window, dropping degenerate results.
/// A region split by the window comes back as several polygons.
pub(crate) fn clip(geometry: &MultiPolygon<f64>, window: &MultiPolygon<f64>) -> Vec<Polygon<f64>> {
    geometry
        .intersection(window)
        .into_iter()
        .filter(|polygon| !polygon.exterior().0.is_empty())
        .collect()
}

/// Nearest point on any boundary ring (exterior, hole, or island) to
/// `point`, by planar distance. Returns `point` itself when the geometry
/// has no usable ring.
pub(crate) fn nearest_boundary_point(
    geometry: &MultiPolygon<f64>,
    point: Point<f64>,
) -> Point<f64> {
    let mut best: Option<(f64, Point<f64>)> = None;
    let rings = geometry
        .iter()
        .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors().iter()));
    for ring in rings {
        let candidate = match ring.closest_point(&point) {
            Closest::Intersection(p) => return p,
            Closest::SinglePoint(p) => p,
            Closest::Indeterminate => continue,
        };
        let distance = Euclidean.distance(point, candidate);
        if best.is_none_or(|(d, _)| distance < d) {
            best = Some((distance, candidate));
        }
    }
    best.map_or(point, |(_, p)| p)
}

/// Distance in meters between two points on the WGS84 ellipsoid.
#[inline]
pub(crate) fn geodesic_distance(a: Point<f64>, b: Point<f64>) -> f64 {
    Geodesic.distance(a, b)
}

/// Widen a wire envelope to the f64 rect used for filtering.
pub(crate) fn envelope_to_rect(envelope: &Envelope) -> Rect<f64> {
    rect_from_bounds(
        f64::from(envelope.min_lat()),
        f64::from(envelope.min_lon()),
        f64::from(envelope.max_lat()),
        f64::from(envelope.max_lon()),
    )
}

/// Rect in lon/lat axis order (x = longitude, y = latitude).
pub(crate) fn rect_from_bounds(
    min_lat: f64,
    min_lon: f64,
    max_lat: f64,
    max_lon: f64,
) -> Rect<f64> {
    Rect::new(
        Coord {
            x: min_lon,
            y: min_lat,
        },
        Coord {
            x: max_lon,
            y: max_lat,
        },
    )
}

/// Inclusive rect overlap: shared edges and corners count as intersecting.
pub(crate) fn envelopes_intersect(a: &Rect<f64>, b: &Rect<f64>) -> bool {
    a.min().x <= b.max().x
        && a.max().x >= b.min().x
        && a.min().y <= b.max().y
        && a.max().y >= b.min().y
}

/// Inclusive cover: `inner` may share edges with `outer`.
pub(crate) fn envelope_covers(outer: &Rect<f64>, inner: &Rect<f64>) -> bool {
    inner.min().x >= outer.min().x
        && inner.max().x <= outer.max().x
        && inner.min().y >= outer.min().y
        && inner.max().y <= outer.max().y
}

/// Inclusive point-in-rect: the rect boundary belongs to the rect.
pub(crate) fn envelope_contains(envelope: &Rect<f64>, point: Coord<f64>) -> bool {
    point.x >= envelope.min().x
        && point.x <= envelope.max().x
        && point.y >= envelope.min().y
        && point.y <= envelope.max().y
}
