// Integration tests for point queries: containment, overlap ordering,
// boundary inclusivity, and boundary distance.

mod common;

use tzmap::{Error, TimeZoneMap};

use common::{archive_with_marker, rect_ring, rect_zone, zone_entry};

fn world(entries: Vec<(String, Vec<u8>)>) -> TimeZoneMap {
    let bytes = archive_with_marker(entries);
    TimeZoneMap::from_archive(&bytes[..], -90.0, -180.0, 90.0, 180.0).unwrap()
}

#[test]
fn finds_zone_for_interior_point() {
    let map = world(vec![
        rect_zone("Europe/Lisbon", 36.8, -9.6, 42.2, -6.1),
        rect_zone("Europe/Madrid", 36.0, -7.4, 43.9, 3.4),
    ]);
    let hit = map.overlapping_time_zone(39.666304, -7.558607).unwrap();
    assert_eq!(hit.unwrap().zone_id(), "Europe/Lisbon");

    let all = map.overlapping_time_zones(39.666304, -7.558607).unwrap();
    assert_eq!(all.len(), 1);
}

#[test]
fn reports_overlaps_smallest_first() {
    // Shanghai covers Urumqi's area entirely; archive order is the larger
    // zone first, so the query order must come from sorting.
    let map = world(vec![
        rect_zone("Asia/Shanghai", 18.0, 73.0, 54.0, 135.0),
        rect_zone("Asia/Urumqi", 35.0, 73.0, 50.0, 97.0),
    ]);
    let ids: Vec<&str> = map
        .overlapping_time_zones(42.53498, 87.61503)
        .unwrap()
        .iter()
        .map(|tz| tz.zone_id())
        .collect();
    assert_eq!(ids, vec!["Asia/Urumqi", "Asia/Shanghai"]);

    let first = map.overlapping_time_zone(42.53498, 87.61503).unwrap();
    assert_eq!(first.unwrap().zone_id(), "Asia/Urumqi");
}

#[test]
fn open_water_has_no_zone() {
    let map = world(vec![rect_zone("Europe/Lisbon", 36.8, -9.6, 42.2, -6.1)]);
    assert!(map.overlapping_time_zone(0.0, -30.0).unwrap().is_none());
    assert!(map.overlapping_time_zones(0.0, -30.0).unwrap().is_empty());
}

#[test]
fn boundary_points_count_as_inside() {
    let map = world(vec![rect_zone("Test/Square", 0.0, 0.0, 10.0, 10.0)]);
    // Vertex, edge midpoints, opposite vertex.
    for (lat, lon) in [(0.0, 0.0), (0.0, 5.0), (5.0, 10.0), (10.0, 10.0)] {
        let hit = map.overlapping_time_zone(lat, lon).unwrap();
        assert_eq!(hit.map(|tz| tz.zone_id()), Some("Test/Square"), "({lat}, {lon})");
    }
}

#[test]
fn shared_border_reports_both_zones() {
    let map = world(vec![
        rect_zone("Test/West", 0.0, 0.0, 8.0, 10.0),
        rect_zone("Test/East", 0.0, 10.0, 10.0, 20.0),
    ]);
    let ids: Vec<&str> = map
        .overlapping_time_zones(4.0, 10.0)
        .unwrap()
        .iter()
        .map(|tz| tz.zone_id())
        .collect();
    assert_eq!(ids, vec!["Test/West", "Test/East"]);
}

#[test]
fn region_corner_is_queryable_after_region_build() {
    // Region bounds replicate the first zone's rectangle at wire (f32)
    // precision, so that zone is indexed unclipped and the region's NW
    // corner is exactly one of its vertices.
    let (min_lat, min_lon) = (f64::from(3.97131f32), f64::from(22.78090f32));
    let (max_lat, max_lon) = (f64::from(10.29621f32), f64::from(28.10539f32));
    let bytes = archive_with_marker(vec![
        rect_zone("Africa/Bangui", 3.97131, 22.78090, 10.29621, 28.10539),
        rect_zone("Africa/Lubumbashi", -13.5, 21.7, 5.4, 31.3),
    ]);
    let map =
        TimeZoneMap::from_archive(&bytes[..], min_lat, min_lon, max_lat, max_lon).unwrap();

    let corner = map.overlapping_time_zone(max_lat, min_lon).unwrap();
    assert_eq!(corner.unwrap().zone_id(), "Africa/Bangui");

    // One step past the region boundary the query must refuse, not return
    // an empty answer.
    let err = map
        .overlapping_time_zone(max_lat.next_up(), min_lon)
        .unwrap_err();
    match err {
        Error::OutOfIndexedArea {
            latitude,
            longitude,
        } => {
            assert_eq!(latitude, max_lat.next_up());
            assert_eq!(longitude, min_lon);
        }
        other => panic!("unexpected error: {other}"),
    }

    // Interior point inside both zones, smaller first; the larger zone was
    // clipped to the region but its rank comes from its full area.
    let ids: Vec<&str> = map
        .overlapping_time_zones(4.5, 27.0)
        .unwrap()
        .iter()
        .map(|tz| tz.zone_id())
        .collect();
    assert_eq!(ids, vec!["Africa/Bangui", "Africa/Lubumbashi"]);
}

/// Outer ring, a hole cut into it, and an island filling part of the hole.
fn holed_zone() -> (String, Vec<u8>) {
    let outer = rect_ring(10.0, -80.0, 20.0, -70.0);
    // Opposite winding to the outer ring makes it a hole.
    let mut hole = rect_ring(14.0, -76.0, 16.0, -74.0);
    hole.reverse();
    let island = rect_ring(14.5, -75.5, 15.5, -74.5);
    zone_entry("America/Havana", vec![vec![outer, hole, island]])
}

#[test]
fn holes_exclude_and_islands_restore_containment() {
    let map = world(vec![holed_zone()]);

    // Inside the outer ring but not in the hole.
    assert!(map.overlapping_time_zone(12.0, -75.0).unwrap().is_some());
    // In the hole, off the island.
    assert!(map.overlapping_time_zone(14.2, -75.0).unwrap().is_none());
    // On the island inside the hole.
    assert!(map.overlapping_time_zone(15.0, -75.0).unwrap().is_some());
}

#[test]
fn distance_from_boundary_measures_to_nearest_ring() {
    let map = world(vec![rect_zone("Test/Square", 10.0, -80.0, 20.0, -70.0)]);
    let zone = map.overlapping_time_zone(13.0, -75.0).unwrap().unwrap();

    // Nearest boundary is the southern edge, three degrees of latitude
    // away; one degree of latitude is about 110.6 km here.
    let distance = zone.distance_from_boundary(13.0, -75.0).unwrap();
    assert!(
        (320_000.0..340_000.0).contains(&distance),
        "distance {distance}"
    );

    // A point on the boundary is at distance zero exactly.
    let on_edge = map.overlapping_time_zone(10.0, -75.0).unwrap().unwrap();
    assert_eq!(on_edge.distance_from_boundary(10.0, -75.0).unwrap(), 0.0);
}

#[test]
fn distance_from_boundary_uses_nearest_of_all_rings() {
    let map = world(vec![holed_zone()]);
    let zone = map.overlapping_time_zone(13.5, -75.0).unwrap().unwrap();

    // The hole's southern edge at latitude 14 is half a degree away; the
    // outer ring is at best three degrees away.
    let distance = zone.distance_from_boundary(13.5, -75.0).unwrap();
    assert!(
        (54_000.0..57_000.0).contains(&distance),
        "distance {distance}"
    );
}

#[test]
fn distance_from_boundary_requires_containment() {
    let map = world(vec![rect_zone("Test/Square", 0.0, 0.0, 10.0, 10.0)]);
    let zone = map.overlapping_time_zone(5.0, 5.0).unwrap().unwrap();

    let err = zone.distance_from_boundary(20.0, 20.0).unwrap_err();
    match err {
        Error::PointNotInRegion {
            latitude,
            longitude,
            zone_id,
        } => {
            assert_eq!(latitude, 20.0);
            assert_eq!(longitude, 20.0);
            assert_eq!(zone_id, "Test/Square");
        }
        other => panic!("unexpected error: {other}"),
    }
}
