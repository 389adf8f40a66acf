use super::{create_file, decode_error, encode_error, finish, read_file, Format, Serializer};
use crate::error::{Result, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// YAML document on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YamlFile {
    path: PathBuf,
}

impl YamlFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Serializer for YamlFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load<T: DeserializeOwned>(&self) -> Result<T> {
        load_from_yaml_file(&self.path)
    }

    fn store<T: Serialize + ?Sized>(&self, record: &T) -> Result<()> {
        store_to_yaml_file(&self.path, record)
    }
}

pub fn load_from_yaml_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = read_file(path)?;
    serde_yaml::from_slice(&bytes).map_err(|e| decode_error(Format::Yaml, path, e))
}

pub fn store_to_yaml_file<T: Serialize + ?Sized>(path: &Path, record: &T) -> Result<()> {
    let mut writer = create_file(path)?;

    let content = serde_yaml::to_string(record).map_err(|e| encode_error(Format::Yaml, path, e))?;
    writer
        .write_all(content.as_bytes())
        .map_err(|e| StoreError::write(path, e))?;

    finish(path, writer)
}
