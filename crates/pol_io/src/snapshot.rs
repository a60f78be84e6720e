//! Save-file operations over a campaign directory.

use std::fs;
use std::path::{Path, PathBuf};

use pol_engine::CampaignState;

use crate::IoError;

const SNAPSHOT_EXT: &str = "json";

/// Save ids become file names; anything outside this charset is rejected
/// before it can escape the campaign directory.
fn valid_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 64
        && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

fn snapshot_path(dir: &Path, id: &str) -> Result<PathBuf, IoError> {
    if !valid_id(id) {
        return Err(IoError::InvalidId(id.to_string()));
    }
    Ok(dir.join(format!("{id}.{SNAPSHOT_EXT}")))
}

fn io_err(path: &Path, source: std::io::Error) -> IoError {
    IoError::Io { path: path.to_path_buf(), source }
}

/// Write the whole campaign under `id`, replacing any previous snapshot.
/// Temp-file-then-rename keeps the old snapshot intact on failure.
pub fn save_campaign(dir: &Path, id: &str, state: &CampaignState) -> Result<(), IoError> {
    let path = snapshot_path(dir, id)?;
    fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

    let bytes = serde_json::to_vec_pretty(state)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, &bytes).map_err(|e| io_err(&tmp, e))?;
    fs::rename(&tmp, &path).map_err(|e| io_err(&path, e))?;
    Ok(())
}

pub fn load_campaign(dir: &Path, id: &str) -> Result<CampaignState, IoError> {
    let path = snapshot_path(dir, id)?;
    let bytes = match fs::read(&path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(IoError::NotFound(id.to_string()));
        }
        Err(e) => return Err(io_err(&path, e)),
    };
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn delete_campaign(dir: &Path, id: &str) -> Result<(), IoError> {
    let path = snapshot_path(dir, id)?;
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(IoError::NotFound(id.to_string()))
        }
        Err(e) => Err(io_err(&path, e)),
    }
}

/// Ids of every snapshot in the directory, sorted. A missing directory is
/// an empty library, not an error.
pub fn list_campaigns(dir: &Path) -> Result<Vec<String>, IoError> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_err(dir, e)),
    };

    let mut ids = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(SNAPSHOT_EXT) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            if valid_id(stem) {
                ids.push(stem.to_string());
            }
        }
    }
    ids.sort();
    Ok(ids)
}
