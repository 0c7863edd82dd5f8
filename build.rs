//! Build script that embeds the bundled map archive.
//!
//! Copies `data/tzmap.tar.gz` (a builder-produced worldwide archive) into
//! `OUT_DIR` when present. Otherwise synthesizes a coarse nautical
//! fallback: the 25 `Etc/GMT±N` offset zones as 15°-wide longitude bands
//! (half-width at the antimeridian), version-marked
//! `"<version>:fallback"` so it always matches the library it is compiled
//! into. `src/data.rs` embeds the result with `include_bytes!`.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::{env, fs};

use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use tzmap_format::{encode_record, serialize_envelope, Envelope, LatLon, TimeZoneRecord};

const BUNDLED: &str = "data/tzmap.tar.gz";

fn main() -> Result<()> {
    println!("cargo::rerun-if-changed=build.rs");
    let out = PathBuf::from(env::var("OUT_DIR")?).join("tzmap.tar.gz");
    if Path::new(BUNDLED).exists() {
        println!("cargo::rerun-if-changed={BUNDLED}");
        fs::copy(BUNDLED, &out).with_context(|| format!("copy {BUNDLED}"))?;
        return Ok(());
    }
    write_fallback_archive(&out).context("write fallback archive")
}

/// The nautical bands under IANA's sign-inverted naming: `Etc/GMT-7` is
/// UTC+7, centered on 105°E.
fn nautical_bands() -> Vec<(String, f32, f32)> {
    (-12i32..=12)
        .map(|offset| {
            let zone_id = match offset {
                0 => "Etc/GMT".to_owned(),
                o if o > 0 => format!("Etc/GMT-{o}"),
                o => format!("Etc/GMT+{}", -o),
            };
            let center = offset as f32 * 15.0;
            (
                zone_id,
                (center - 7.5).max(-180.0),
                (center + 7.5).min(180.0),
            )
        })
        .collect()
}

fn write_fallback_archive(path: &Path) -> Result<()> {
    let file = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));

    let marker = format!("{}:fallback", env!("CARGO_PKG_VERSION"));
    append(&mut builder, &marker, &[])?;

    for (zone_id, min_lon, max_lon) in nautical_bands() {
        let ring = vec![
            LatLon::new(-90.0, min_lon),
            LatLon::new(-90.0, max_lon),
            LatLon::new(90.0, max_lon),
            LatLon::new(90.0, min_lon),
        ];
        let record = TimeZoneRecord {
            zone_id: zone_id.clone(),
            regions: vec![vec![ring]],
        };
        let envelope = Envelope::new(-90.0, min_lon, 90.0, max_lon);
        let name = format!("{zone_id}/{}", serialize_envelope(&envelope));
        let body = encode_record(&record)?;
        append(&mut builder, &name, &body)?;
    }
    builder.into_inner()?.finish()?;
    Ok(())
}

fn append<W: Write>(builder: &mut tar::Builder<W>, name: &str, bytes: &[u8]) -> Result<()> {
    let mut header = tar::Header::new_gnu();
    header.set_size(bytes.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder
        .append_data(&mut header, name, bytes)
        .with_context(|| format!("append entry {name}"))?;
    Ok(())
}
