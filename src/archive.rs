//! Entry access over tar map archives.
//!
//! The container contract: sequential named entries, first entry reserved
//! as the version marker, every later entry a `"<zoneId>/<envelope>"` name
//! with a binary record body. Bodies are read on demand only; the entry
//! iterator skips unread bodies, which keeps name-level rejection cheap.

use std::io::Read;

use crate::error::{Error, Result};

/// An entry's name. The archive contract requires UTF-8 (zone ids are
/// ASCII), so anything else is a corrupt entry.
pub(crate) fn entry_name<R: Read>(entry: &tar::Entry<'_, R>) -> Result<String> {
    let bytes = entry.path_bytes();
    match std::str::from_utf8(&bytes) {
        Ok(name) => Ok(name.to_owned()),
        Err(err) => Err(Error::corrupt(String::from_utf8_lossy(&bytes), err)),
    }
}

/// One entry's full body, sized from its header.
pub(crate) fn read_entry<R: Read>(entry: &mut tar::Entry<'_, R>, name: &str) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(entry.size() as usize);
    entry
        .read_to_end(&mut bytes)
        .map_err(|err| Error::corrupt(name, err))?;
    Ok(bytes)
}
