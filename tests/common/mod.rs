//! In-memory archive fabrication shared by the integration tests.
#![allow(dead_code)]

use tzmap_format::{encode_record, serialize_envelope, Envelope, LatLon, Region, Ring, TimeZoneRecord};

/// The version marker every well-formed fabricated archive opens with.
pub fn version_marker() -> (String, Vec<u8>) {
    (format!("{}:test", env!("CARGO_PKG_VERSION")), Vec::new())
}

/// Counter-clockwise rectangular ring, implicitly closed.
pub fn rect_ring(min_lat: f32, min_lon: f32, max_lat: f32, max_lon: f32) -> Ring {
    vec![
        LatLon::new(min_lat, min_lon),
        LatLon::new(min_lat, max_lon),
        LatLon::new(max_lat, max_lon),
        LatLon::new(max_lat, min_lon),
    ]
}

/// One entry for one record, named `"<zoneId>/<envelope>"` with the
/// envelope computed from the record's own points.
pub fn zone_entry(zone_id: &str, regions: Vec<Region>) -> (String, Vec<u8>) {
    let record = TimeZoneRecord {
        zone_id: zone_id.to_owned(),
        regions,
    };
    let name = format!("{zone_id}/{}", serialize_envelope(&record_envelope(&record)));
    (name, encode_record(&record).unwrap())
}

/// Entry for a single rectangular region.
pub fn rect_zone(
    zone_id: &str,
    min_lat: f32,
    min_lon: f32,
    max_lat: f32,
    max_lon: f32,
) -> (String, Vec<u8>) {
    zone_entry(
        zone_id,
        vec![vec![rect_ring(min_lat, min_lon, max_lat, max_lon)]],
    )
}

fn record_envelope(record: &TimeZoneRecord) -> Envelope {
    let mut envelope = Envelope::new(f32::MAX, f32::MAX, f32::MIN, f32::MIN);
    for point in record.regions.iter().flatten().flatten() {
        envelope.lower_left.latitude = envelope.lower_left.latitude.min(point.latitude);
        envelope.lower_left.longitude = envelope.lower_left.longitude.min(point.longitude);
        envelope.upper_right.latitude = envelope.upper_right.latitude.max(point.latitude);
        envelope.upper_right.longitude = envelope.upper_right.longitude.max(point.longitude);
    }
    envelope
}

/// Serialize named entries into an uncompressed tar stream.
pub fn archive(entries: Vec<(String, Vec<u8>)>) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, body) in &entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(body.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, body.as_slice()).unwrap();
    }
    builder.into_inner().unwrap()
}

/// A version marker followed by the given entries.
pub fn archive_with_marker(mut entries: Vec<(String, Vec<u8>)>) -> Vec<u8> {
    entries.insert(0, version_marker());
    archive(entries)
}
