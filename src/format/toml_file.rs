use super::{create_file, decode_error, encode_error, finish, read_file, Format, Serializer};
use crate::error::{Result, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// TOML document on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TomlFile {
    path: PathBuf,
}

impl TomlFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Serializer for TomlFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load<T: DeserializeOwned>(&self) -> Result<T> {
        load_from_toml_file(&self.path)
    }

    fn store<T: Serialize + ?Sized>(&self, record: &T) -> Result<()> {
        store_to_toml_file(&self.path, record)
    }
}

pub fn load_from_toml_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = read_file(path)?;
    let content = std::str::from_utf8(&bytes).map_err(|e| decode_error(Format::Toml, path, e))?;
    toml::from_str(content).map_err(|e| decode_error(Format::Toml, path, e))
}

/// TOML has no streaming encoder, so the document is rendered in memory
/// after the file has been truncated.
pub fn store_to_toml_file<T: Serialize + ?Sized>(path: &Path, record: &T) -> Result<()> {
    let mut writer = create_file(path)?;

    let content = toml::to_string(record).map_err(|e| encode_error(Format::Toml, path, e))?;
    writer
        .write_all(content.as_bytes())
        .map_err(|e| StoreError::write(path, e))?;

    finish(path, writer)
}
