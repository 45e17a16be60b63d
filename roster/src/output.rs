use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(thiserror::Error, Debug)]
pub enum OutputError {
    #[error("could not serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not move output into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Writes `value` as JSON to `path`.
///
/// The document goes to a temporary file next to `path` first and is
/// renamed over it once complete, so a failed write never leaves a
/// truncated file behind.
pub fn write_json<T>(path: &Path, value: &T, pretty: bool) -> Result<(), OutputError>
where
    T: Serialize + ?Sized,
{
    let body = if pretty {
        serde_json::to_vec_pretty(value)?
    } else {
        serde_json::to_vec(value)?
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&body)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;

    Ok(())
}
