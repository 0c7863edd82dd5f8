//! Locator for the bundled map archive.
//!
//! `build.rs` places a gzip-compressed tar archive in `OUT_DIR`: the
//! builder-produced worldwide data when `data/tzmap.tar.gz` is present in
//! the package root, a coarse nautical `Etc/GMT±N` fallback otherwise.

use flate2::read::GzDecoder;

static ARCHIVE: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/tzmap.tar.gz"));

/// The bundled archive, decompressed to the tar stream the builder expects.
pub(crate) fn bundled_archive() -> GzDecoder<&'static [u8]> {
    GzDecoder::new(ARCHIVE)
}
