//! Output routing.

use std::fs::{self, Permissions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::config::OutputTarget;
use crate::error_handling::StoreError;

/// Runs `write` against the requested destination.
///
/// Files are written to a temporary file in the same directory and renamed
/// over the destination once `write` succeeds, so an error never leaves a
/// truncated file behind. The replaced file keeps the permissions of the
/// file it replaces; a new file gets `0644` on unix.
pub fn write_output<T, F>(target: &OutputTarget, write: F) -> Result<T, StoreError>
where
    F: FnOnce(&mut dyn Write) -> Result<T, StoreError>,
{
    match target {
        OutputTarget::Stdout => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            let value = write(&mut lock)?;
            lock.flush()?;
            Ok(value)
        }
        OutputTarget::File(path) => {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let tmp = NamedTempFile::new_in(dir)?;
            let mut buffered = BufWriter::new(tmp);
            let value = write(&mut buffered)?;
            let tmp = buffered.into_inner().map_err(|e| e.into_error())?;
            tmp.as_file().set_permissions(destination_permissions(path, &tmp)?)?;
            tmp.persist(path).map_err(|e| e.error)?;
            Ok(value)
        }
    }
}

/// Permissions the persisted file should carry.
fn destination_permissions(path: &Path, tmp: &NamedTempFile) -> io::Result<Permissions> {
    match fs::metadata(path) {
        Ok(existing) => Ok(existing.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => new_file_permissions(tmp),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn new_file_permissions(_tmp: &NamedTempFile) -> io::Result<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Ok(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions(tmp: &NamedTempFile) -> io::Result<Permissions> {
    Ok(tmp.as_file().metadata()?.permissions())
}
