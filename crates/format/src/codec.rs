//! Binary record codec plus the envelope text form used in entry names.
//!
//! Layout, all little-endian: magic, format version byte, u16-prefixed
//! zone id, then u32-prefixed region / ring / point nesting with `f32`
//! latitude and longitude per point.

use crate::error::FormatError;
use crate::types::{Envelope, LatLon, Region, Ring, TimeZoneRecord};

/// Magic bytes opening every encoded record: "TZMR" (time zone map record).
const MAGIC: &[u8; 4] = b"TZMR";
/// Wire format version.
const VERSION: u8 = 1;

/// Encode one record into a self-contained byte buffer.
///
/// Region, ring, and point order are written exactly as given, so decoding
/// the output reproduces the record field for field.
pub fn encode_record(record: &TimeZoneRecord) -> Result<Vec<u8>, FormatError> {
    let id = record.zone_id.as_bytes();
    if id.len() > usize::from(u16::MAX) {
        return Err(FormatError::ZoneIdTooLong(id.len()));
    }
    let mut out = Vec::new();
    out.extend_from_slice(MAGIC);
    out.push(VERSION);
    out.extend_from_slice(&(id.len() as u16).to_le_bytes());
    out.extend_from_slice(id);
    out.extend_from_slice(&(record.regions.len() as u32).to_le_bytes());
    for region in &record.regions {
        out.extend_from_slice(&(region.len() as u32).to_le_bytes());
        for ring in region {
            out.extend_from_slice(&(ring.len() as u32).to_le_bytes());
            for point in ring {
                out.extend_from_slice(&point.latitude.to_le_bytes());
                out.extend_from_slice(&point.longitude.to_le_bytes());
            }
        }
    }
    Ok(out)
}

/// Decode a buffer produced by [`encode_record`].
///
/// Every length prefix is checked against the remaining buffer before any
/// allocation is sized from it, and trailing bytes are rejected.
pub fn decode_record(bytes: &[u8]) -> Result<TimeZoneRecord, FormatError> {
    let mut r = Reader::new(bytes);
    let magic = r.take::<4>()?;
    if magic != *MAGIC {
        return Err(FormatError::BadMagic(magic));
    }
    let version = r.u8()?;
    if version != VERSION {
        return Err(FormatError::UnsupportedVersion(version));
    }
    let id_len = usize::from(r.u16()?);
    let zone_id = std::str::from_utf8(r.bytes(id_len)?)?.to_owned();
    let region_count = r.u32()? as usize;
    let mut regions = Vec::with_capacity(r.guarded(region_count, 4)?);
    for _ in 0..region_count {
        let ring_count = r.u32()? as usize;
        let mut region: Region = Vec::with_capacity(r.guarded(ring_count, 4)?);
        for _ in 0..ring_count {
            let point_count = r.u32()? as usize;
            let mut ring: Ring = Vec::with_capacity(r.guarded(point_count, 8)?);
            for _ in 0..point_count {
                let latitude = r.f32()?;
                let longitude = r.f32()?;
                ring.push(LatLon::new(latitude, longitude));
            }
            region.push(ring);
        }
        regions.push(region);
    }
    if r.remaining() > 0 {
        return Err(FormatError::TrailingBytes(r.remaining()));
    }
    Ok(TimeZoneRecord { zone_id, regions })
}

/// Render an envelope as the fixed `minLat,minLon,maxLat,maxLon` text used
/// in archive entry names, six decimal places per field.
pub fn serialize_envelope(envelope: &Envelope) -> String {
    format!(
        "{:.6},{:.6},{:.6},{:.6}",
        envelope.min_lat(),
        envelope.min_lon(),
        envelope.max_lat(),
        envelope.max_lon()
    )
}

/// Parse the envelope text form; the inverse of [`serialize_envelope`].
pub fn parse_envelope(text: &str) -> Result<Envelope, FormatError> {
    let malformed = || FormatError::MalformedEnvelope(text.to_owned());
    let mut fields = [0f32; 4];
    let mut parts = text.split(',');
    for field in &mut fields {
        *field = parts
            .next()
            .and_then(|part| part.trim().parse().ok())
            .ok_or_else(malformed)?;
    }
    if parts.next().is_some() {
        return Err(malformed());
    }
    Ok(Envelope::new(fields[0], fields[1], fields[2], fields[3]))
}

/// Bounds-checked little-endian reads over a byte slice.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn bytes(&mut self, len: usize) -> Result<&'a [u8], FormatError> {
        if len > self.remaining() {
            return Err(FormatError::Truncated {
                offset: self.pos,
                needed: len,
                available: self.remaining(),
            });
        }
        let out = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.bytes(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, FormatError> {
        Ok(self.take::<1>()?[0])
    }

    fn u16(&mut self) -> Result<u16, FormatError> {
        Ok(u16::from_le_bytes(self.take()?))
    }

    fn u32(&mut self) -> Result<u32, FormatError> {
        Ok(u32::from_le_bytes(self.take()?))
    }

    fn f32(&mut self) -> Result<f32, FormatError> {
        Ok(f32::from_le_bytes(self.take()?))
    }

    /// Reject a count prefix whose elements, at `min_size` bytes each,
    /// cannot possibly fit in the rest of the buffer. Keeps a corrupt
    /// prefix from sizing a giant allocation.
    fn guarded(&self, count: usize, min_size: usize) -> Result<usize, FormatError> {
        let needed = count.saturating_mul(min_size);
        if needed > self.remaining() {
            return Err(FormatError::Truncated {
                offset: self.pos,
                needed,
                available: self.remaining(),
            });
        }
        Ok(count)
    }
}
