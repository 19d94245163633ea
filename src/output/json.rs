//! JSON dataset persistence
//!
//! The dataset is a pretty-printed UTF-8 array of player objects. Writes go
//! to a sibling temporary file first and are renamed into place, so a crash
//! never leaves a truncated dataset behind.

use crate::output::{PersistError, PersistResult};
use crate::record::PlayerRecord;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Serializes records as a 4-space indented JSON array
pub fn to_json(records: &[PlayerRecord]) -> PersistResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records
        .serialize(&mut serializer)
        .map_err(PersistError::Serialize)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Writes the dataset to `path`, replacing any previous file atomically
///
/// # Arguments
///
/// * `path` - Destination file; missing parent directories are created
/// * `records` - Records in final dataset order
///
/// # Returns
///
/// * `Ok(())` - The file at `path` holds the complete dataset
/// * `Err(PersistError)` - Nothing was replaced
pub fn write_dataset(path: &Path, records: &[PlayerRecord]) -> PersistResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| PersistError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let contents = to_json(records)?;
    let tmp_path = temporary_path(path);

    fs::write(&tmp_path, contents).map_err(|source| PersistError::Io {
        path: tmp_path.clone(),
        source,
    })?;

    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(PersistError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

/// Reads a dataset previously written by `write_dataset`
pub fn read_dataset(path: &Path) -> PersistResult<Vec<PlayerRecord>> {
    let contents = fs::read(path).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&contents).map_err(|source| PersistError::Deserialize {
        path: path.to_path_buf(),
        source,
    })
}

/// `players.json` -> `players.json.tmp`, in the same directory
fn temporary_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
