//! cstore Library
//!
//! Persists structured records to files in TOML, JSON or YAML and keeps
//! track of named stores inside a base directory.

pub mod config;
pub mod error;
pub mod format;
pub mod registry;
pub mod validate;

pub use config::Config;
pub use error::{Result, StoreError};
pub use format::{Format, FormatFile, IntoFormat, JsonFile, Serializer, TomlFile, YamlFile};
pub use registry::{RecordStore, StoreRegistry};
pub use validate::{Validate, ValidationError};
