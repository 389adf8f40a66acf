use super::{create_file, decode_error, encode_error, finish, read_file, Format, Serializer};
use crate::error::{Result, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// JSON document on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Serializer for JsonFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load<T: DeserializeOwned>(&self) -> Result<T> {
        load_from_json_file(&self.path)
    }

    fn store<T: Serialize + ?Sized>(&self, record: &T) -> Result<()> {
        store_to_json_file(&self.path, record)
    }
}

pub fn load_from_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = read_file(path)?;
    serde_json::from_slice(&bytes).map_err(|e| decode_error(Format::Json, path, e))
}

/// Writes the record as compact JSON followed by a newline.
pub fn store_to_json_file<T: Serialize + ?Sized>(path: &Path, record: &T) -> Result<()> {
    let mut writer = create_file(path)?;

    serde_json::to_writer(&mut writer, record).map_err(|e| {
        if e.is_io() {
            StoreError::write(path, io::Error::from(e))
        } else {
            encode_error(Format::Json, path, e)
        }
    })?;
    writer
        .write_all(b"\n")
        .map_err(|e| StoreError::write(path, e))?;

    finish(path, writer)
}
