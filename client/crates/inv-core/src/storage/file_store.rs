use crate::{CoreError, KeyValueStore, Result as CoreResult};

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::debug;

/// Persistent storage keeping one file per key inside a directory.
///
/// Writes go through a temp file that is synced and then renamed over the
/// final path, so a crash mid-write never leaves a truncated value behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a storage directory.
    pub fn open(dir: impl Into<PathBuf>) -> CoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| CoreError::storage_io("*", dir.clone(), e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> CoreResult<PathBuf> {
        if key.is_empty() {
            return Err(CoreError::invalid_key(key, "key cannot be empty"));
        }
        if key.starts_with('.') {
            return Err(CoreError::invalid_key(key, "key cannot start with '.'"));
        }
        if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(CoreError::invalid_key(
                key,
                "key may only contain ASCII letters, digits, '-', '_' and '.'",
            ));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CoreError::storage_io(key, path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let final_path = self.path_for(key)?;
        let temp_path = self
            .dir
            .join(format!(".{key}.tmp.{}", std::process::id()));

        {
            let mut file = fs::File::create(&temp_path)
                .map_err(|e| CoreError::storage_io(key, temp_path.clone(), e))?;

            file.write_all(value.as_bytes())
                .map_err(|e| CoreError::storage_io(key, temp_path.clone(), e))?;

            file.sync_all()
                .map_err(|e| CoreError::storage_io(key, temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, &final_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            CoreError::storage_io(key, final_path.clone(), e)
        })?;

        debug!("Stored key '{key}' in {}", self.dir.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        let path = self.path_for(key)?;

        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed key '{key}' from {}", self.dir.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::storage_io(key, path, e)),
        }
    }
}
