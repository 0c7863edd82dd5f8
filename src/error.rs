use thiserror::Error;

/// Convenience alias for fallible map operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure modes of building and querying a time zone map.
#[derive(Debug, Error)]
pub enum Error {
    /// `for_region` bounds where a minimum does not lie strictly below its
    /// maximum.
    #[error("invalid region: {0}")]
    InvalidRegion(String),
    /// The archive's version marker names a library version other than the
    /// running one. `detected` is the marker entry's full name.
    #[error("incompatible map archive: detected version '{detected}', required version '{required}:*'")]
    IncompatibleArchiveVersion { detected: String, required: String },
    /// An entry could not be read or decoded mid-stream.
    #[error("corrupt archive entry '{entry}': {source}")]
    CorruptArchiveEntry {
        entry: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Query point outside the region the map was built for.
    #[error("point ({latitude}, {longitude}) is outside the indexed region")]
    OutOfIndexedArea { latitude: f64, longitude: f64 },
    /// Boundary-distance query for a point the zone's region does not
    /// contain.
    #[error("point ({latitude}, {longitude}) is not inside time zone '{zone_id}'")]
    PointNotInRegion {
        latitude: f64,
        longitude: f64,
        zone_id: String,
    },
    /// Archive-level I/O failure.
    #[error("failed to read map archive")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn corrupt(
        entry: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::CorruptArchiveEntry {
            entry: entry.into(),
            source: source.into(),
        }
    }
}
