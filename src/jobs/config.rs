use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::de::DeserializeOwned;

use crate::foundation::error::{ConfartError, ConfartResult};

/// Read a JSON job config.
///
/// Returns the config together with its directory, against which relative paths inside the
/// config are resolved.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> ConfartResult<(T, PathBuf)> {
    if !path.is_file() {
        return Err(ConfartError::missing_input(path));
    }
    let f = File::open(path).map_err(|e| ConfartError::load(path, e))?;
    let config: T = serde_json::from_reader(BufReader::new(f))
        .map_err(|e| ConfartError::serde(format!("{}: {e}", path.display())))?;
    let base_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    tracing::debug!(path = %path.display(), base_dir = %base_dir.display(), "loaded job config");
    Ok((config, base_dir))
}

/// `path` itself when absolute, otherwise joined onto `base_dir`.
pub fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/jobs/config.rs"]
mod tests;
