//! Wire types and codecs for tzmap map archives: the binary record format
//! stored in entry bodies and the envelope text embedded in entry names.

pub mod codec;
pub mod error;
pub mod types;

pub use codec::{decode_record, encode_record, parse_envelope, serialize_envelope};
pub use error::FormatError;
pub use types::{Envelope, LatLon, Region, Ring, TimeZoneRecord};
