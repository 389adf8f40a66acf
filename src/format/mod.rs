//! Format Serializers
//!
//! Encodes records to files and decodes them back. Every format implements
//! [`Serializer`]; [`FormatFile`] picks one by [`Format`] tag.
//!
//! Writes are not staged: the target file is truncated before encoding, so a
//! failed `store` can leave an empty or partial file behind.

mod json_file;
mod toml_file;
mod yaml_file;

pub use json_file::{load_from_json_file, store_to_json_file, JsonFile};
pub use toml_file::{load_from_toml_file, store_to_toml_file, TomlFile};
pub use yaml_file::{load_from_yaml_file, store_to_yaml_file, YamlFile};

use crate::error::{Result, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Serialization format of a store file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Format {
    Toml = 1,
    Json = 2,
    Yaml = 3,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Toml, Format::Json, Format::Yaml];

    /// Numeric tag of the format
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Lowercase name, also the conventional file extension
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Toml => "toml",
            Format::Json => "json",
            Format::Yaml => "yaml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for Format {
    type Error = StoreError;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            1 => Ok(Format::Toml),
            2 => Ok(Format::Json),
            3 => Ok(Format::Yaml),
            _ => Err(StoreError::InvalidFormat {
                tag: tag.to_string(),
            }),
        }
    }
}

impl FromStr for Format {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "toml" => Ok(Format::Toml),
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            _ => Err(StoreError::InvalidFormat { tag: s.to_string() }),
        }
    }
}

/// Anything a caller may name a format with.
///
/// Conversion happens when a store is created, so an unknown tag is reported
/// there and never later.
pub trait IntoFormat {
    fn into_format(self) -> Result<Format>;
}

impl IntoFormat for Format {
    fn into_format(self) -> Result<Format> {
        Ok(self)
    }
}

impl IntoFormat for u8 {
    fn into_format(self) -> Result<Format> {
        Format::try_from(self)
    }
}

impl IntoFormat for &str {
    fn into_format(self) -> Result<Format> {
        self.parse()
    }
}

/// Encodes records to and decodes records from one file.
pub trait Serializer {
    /// Path of the backing file
    fn path(&self) -> &Path;

    /// Read and decode the backing file
    fn load<T: DeserializeOwned>(&self) -> Result<T>;

    /// Encode `record` into the backing file, replacing its content
    fn store<T: Serialize + ?Sized>(&self, record: &T) -> Result<()>;

    /// Delete the backing file
    fn remove(&self) -> Result<()> {
        remove_file(self.path())
    }
}

/// A serializer chosen by format tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatFile {
    Toml(TomlFile),
    Json(JsonFile),
    Yaml(YamlFile),
}

impl FormatFile {
    pub fn new(format: impl IntoFormat, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        Ok(match format.into_format()? {
            Format::Toml => FormatFile::Toml(TomlFile::new(path)),
            Format::Json => FormatFile::Json(JsonFile::new(path)),
            Format::Yaml => FormatFile::Yaml(YamlFile::new(path)),
        })
    }

    pub fn format(&self) -> Format {
        match self {
            FormatFile::Toml(_) => Format::Toml,
            FormatFile::Json(_) => Format::Json,
            FormatFile::Yaml(_) => Format::Yaml,
        }
    }
}

impl Serializer for FormatFile {
    fn path(&self) -> &Path {
        match self {
            FormatFile::Toml(file) => file.path(),
            FormatFile::Json(file) => file.path(),
            FormatFile::Yaml(file) => file.path(),
        }
    }

    fn load<T: DeserializeOwned>(&self) -> Result<T> {
        match self {
            FormatFile::Toml(file) => file.load(),
            FormatFile::Json(file) => file.load(),
            FormatFile::Yaml(file) => file.load(),
        }
    }

    fn store<T: Serialize + ?Sized>(&self, record: &T) -> Result<()> {
        match self {
            FormatFile::Toml(file) => file.store(record),
            FormatFile::Json(file) => file.store(record),
            FormatFile::Yaml(file) => file.store(record),
        }
    }
}

fn create_file(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| StoreError::write(path, e))
}

/// Flush explicitly; `BufWriter` swallows errors on drop.
fn finish(path: &Path, mut writer: BufWriter<File>) -> Result<()> {
    writer.flush().map_err(|e| StoreError::write(path, e))
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| StoreError::io(path, e))
}

fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| StoreError::io(path, e))
}

fn encode_error(format: Format, path: &Path, cause: impl fmt::Display) -> StoreError {
    StoreError::Encode {
        format,
        path: path.to_path_buf(),
        cause: cause.to_string(),
    }
}

fn decode_error(format: Format, path: &Path, cause: impl fmt::Display) -> StoreError {
    StoreError::Decode {
        format,
        path: path.to_path_buf(),
        cause: cause.to_string(),
    }
}
