use std::{
    cell::RefCell,
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use fractic_server_error::ServerError;

use crate::errors::{StorageReadError, StorageWriteError};

/// String-keyed durable storage, one raw string value per key.
pub trait KeyValueDatasource {
    /// `Ok(None)` when nothing was ever stored under the key.
    fn get(&self, key: &str) -> Result<Option<String>, ServerError>;

    fn set(&self, key: &str, value: &str) -> Result<(), ServerError>;
}

/// Stores each key as a file inside a directory.
pub struct FileKeyValueDatasourceImpl {
    dir: PathBuf,
}

impl FileKeyValueDatasourceImpl {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueDatasource for FileKeyValueDatasourceImpl {
    fn get(&self, key: &str) -> Result<Option<String>, ServerError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageReadError::with_debug(key, &e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ServerError> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageWriteError::with_debug(key, &e))?;
        // Write to a sibling file first so a failed write never truncates the
        // previous value.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| StorageWriteError::with_debug(key, &e))?;
        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            StorageWriteError::with_debug(key, &e)
        })
    }
}

/// Volatile storage, for tests and for sessions that should not touch disk.
#[derive(Default)]
pub struct MemoryKeyValueDatasourceImpl {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryKeyValueDatasourceImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values<K: Into<String>, V: Into<String>>(
        values: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        Self {
            values: RefCell::new(
                values
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl KeyValueDatasource for MemoryKeyValueDatasourceImpl {
    fn get(&self, key: &str) -> Result<Option<String>, ServerError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ServerError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
