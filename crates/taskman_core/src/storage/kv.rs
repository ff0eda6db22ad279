use crate::error::AppError;
use std::fs;
use std::path::{Path, PathBuf};

const DATA_DIR_ENV: &str = "TASKMAN_DATA_DIR";
const DATA_DIR_NAME: &str = "taskman";

/// The local key-value persistence surface consumed by the task store and
/// the preference store.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
}

/// Directory-backed store: one file per key under a per-user data
/// directory. Writes go through a temp file and a rename so a reader never
/// observes a torn value.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    root: PathBuf,
}

impl FileKvStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn from_env() -> Result<Self, AppError> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV)
            && !dir.trim().is_empty()
        {
            return Ok(Self::new(dir));
        }

        if cfg!(windows) {
            let appdata = std::env::var("APPDATA")
                .map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
            Ok(Self::new(PathBuf::from(appdata).join(DATA_DIR_NAME)))
        } else {
            let home =
                std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
            Ok(Self::new(
                PathBuf::from(home).join(".config").join(DATA_DIR_NAME),
            ))
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|err| AppError::io(err.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        fs::create_dir_all(&self.root).map_err(|err| AppError::io(err.to_string()))?;

        let path = self.key_path(key);
        let staged = path.with_extension("tmp");
        fs::write(&staged, value).map_err(|err| AppError::io(err.to_string()))?;
        fs::rename(&staged, &path).map_err(|err| AppError::io(err.to_string()))?;

        Ok(())
    }
}
