//! Category file store
//!
//! The `Store` owns a base directory holding one YAML file per category.
//! Each file is a sequence of records of that category's type.
//!
//! ## Appending
//!
//! A record is written as a one-element sequence at the end of the file.
//! Concatenated block sequences are still one sequence, so the file stays
//! parseable after every append without ever being rewritten.
//!
//! ## Usage
//!
//! ```ignore
//! let store = Store::new(config.data_dir.clone());
//!
//! store.append(&Link::new("Foo", "http://x"))?;
//!
//! let links: Vec<Link> = store.load_all()?;
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::category::Category;
use crate::config::Config;
use crate::models::Record;
use crate::storage::{StorageError, StorageResult};

/// Handle on the category files under one base directory
#[derive(Debug, Clone)]
pub struct Store {
    base_dir: PathBuf,
}

impl Store {
    /// Create a store rooted at `base_dir`
    ///
    /// Nothing is touched on disk until the first append.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Create a store rooted at the configured data directory
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.data_dir.clone())
    }

    /// The base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the backing file for a category
    pub fn path_for(&self, category: Category) -> PathBuf {
        self.base_dir.join(category.file_name())
    }

    /// Whether a category has a backing file yet
    pub fn exists(&self, category: Category) -> bool {
        self.path_for(category).is_file()
    }

    /// Append one record to the end of its category file
    ///
    /// The base directory and the file are created if missing. The record
    /// is not validated here; callers that enforce required fields do so
    /// before calling this.
    pub fn append<R: Record>(&self, record: &R) -> StorageResult<()> {
        let path = self.path_for(R::CATEGORY);

        let encoded = serde_yaml::to_string(std::slice::from_ref(record)).map_err(|e| {
            StorageError::Serialize {
                path: path.clone(),
                details: e.to_string(),
            }
        })?;
        // A document marker would start a second document in the file
        let encoded = encoded.strip_prefix("---\n").unwrap_or(encoded.as_str());

        self.ensure_base_dir()?;

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|e| StorageError::from_io(e, path.clone()))?;

        let mut block = String::with_capacity(encoded.len() + 1);
        if missing_trailing_newline(&mut file).map_err(|e| StorageError::from_io(e, path.clone()))? {
            block.push('\n');
        }
        block.push_str(encoded);

        file.write_all(block.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| StorageError::from_io(e, path.clone()))?;

        info!("Appended {} '{}' to {:?}", R::CATEGORY.singular(), record.label(), path);
        Ok(())
    }

    /// Load every record of a category, in insertion order
    ///
    /// An empty file is an empty sequence. A missing file is an error.
    pub fn load_all<R: Record>(&self) -> StorageResult<Vec<R>> {
        let path = self.path_for(R::CATEGORY);
        let records: Vec<R> = load_sequence(&path)?;
        debug!("Loaded {} {} from {:?}", records.len(), R::CATEGORY, path);
        Ok(records)
    }

    /// Number of records in a category file, without knowing the record type
    pub fn count(&self, category: Category) -> StorageResult<usize> {
        let path = self.path_for(category);
        let records: Vec<serde_yaml::Value> = load_sequence(&path)?;
        Ok(records.len())
    }

    fn ensure_base_dir(&self) -> StorageResult<()> {
        if !self.base_dir.exists() {
            fs::create_dir_all(&self.base_dir).map_err(|source| {
                StorageError::CreateDirectory {
                    path: self.base_dir.clone(),
                    source,
                }
            })?;
            debug!("Created data directory {:?}", self.base_dir);
        }
        Ok(())
    }
}

/// Read and parse a whole sequence file
fn load_sequence<T: serde::de::DeserializeOwned>(path: &Path) -> StorageResult<Vec<T>> {
    let content =
        fs::read_to_string(path).map_err(|e| StorageError::from_read_io(e, path.to_path_buf()))?;

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_yaml::from_str(&content).map_err(|e| StorageError::InvalidFormat {
        path: path.to_path_buf(),
        details: e.to_string(),
    })
}

/// Whether a non-empty file ends without a newline
fn missing_trailing_newline(file: &mut File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}
