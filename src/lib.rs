//! Offline latitude/longitude to IANA time-zone lookup.
//!
//! A [`TimeZoneMap`] is an immutable spatial index built once from a map
//! archive (the bundled one, or a caller-supplied stream) and then
//! queried any number of times, from any number of threads:
//!
//! ```
//! use tzmap::TimeZoneMap;
//!
//! # fn main() -> tzmap::Result<()> {
//! let map = TimeZoneMap::for_everywhere()?;
//! if let Some(zone) = map.overlapping_time_zone(0.0, -30.0)? {
//!     println!("mid-Atlantic clocks follow {}", zone.zone_id());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Lookups are boundary-inclusive and results come back smallest region
//! first, so overlapping or disputed areas surface every claimant in
//! specificity order through [`TimeZoneMap::overlapping_time_zones`].
//! Building with [`TimeZoneMap::for_region`] clips every boundary to the
//! requested window and keeps memory proportional to the area of
//! interest; queries are then valid inside that window only.
//!
//! Archive wire formats live in [`format`] (the `tzmap-format` crate), so
//! data pipelines can produce archives without depending on the lookup
//! engine.

mod archive;
mod data;
mod error;
mod geometry;
mod index;
mod timezone;

pub use error::{Error, Result};
pub use index::TimeZoneMap;
pub use timezone::TimeZone;

pub use geo::{MultiPolygon, Rect};
pub use tzmap_format as format;
