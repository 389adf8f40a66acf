//! Record Store
//!
//! One named record bound to one file and one format serializer.

use crate::error::Result;
use crate::format::{Format, FormatFile, IntoFormat, Serializer};
use crate::validate::Validate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Validate `record`, then store it. Storage is untouched when validation fails.
pub fn save<T, S>(record: &T, serializer: &S) -> Result<()>
where
    T: Serialize + Validate + ?Sized,
    S: Serializer,
{
    record.validate()?;
    save_without_validate(record, serializer)
}

pub fn save_without_validate<T, S>(record: &T, serializer: &S) -> Result<()>
where
    T: Serialize + ?Sized,
    S: Serializer,
{
    serializer.store(record)
}

/// Load into `out`, then validate it.
///
/// `out` holds the loaded record even when validation fails.
pub fn get<T, S>(out: &mut T, serializer: &S) -> Result<()>
where
    T: DeserializeOwned + Validate,
    S: Serializer,
{
    get_without_validate(out, serializer)?;
    out.validate()?;
    Ok(())
}

pub fn get_without_validate<T, S>(out: &mut T, serializer: &S) -> Result<()>
where
    T: DeserializeOwned,
    S: Serializer,
{
    *out = serializer.load()?;
    Ok(())
}

/// A named record persisted in a single file.
///
/// The handle carries no state besides its identity, so clones refer to the
/// same file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStore {
    name: String,
    file: FormatFile,
}

impl RecordStore {
    pub fn new(name: &str, path: impl Into<PathBuf>, format: impl IntoFormat) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            file: FormatFile::new(format, path)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn format(&self) -> Format {
        self.file.format()
    }

    /// Validate and write `record`
    pub fn save<T: Serialize + Validate + ?Sized>(&self, record: &T) -> Result<()> {
        save(record, &self.file)?;
        debug!("Saved {} record to {}", self.format(), self.path().display());
        Ok(())
    }

    /// Write `record` without validating it, e.g. to seed a template
    pub fn save_without_validate<T: Serialize + ?Sized>(&self, record: &T) -> Result<()> {
        save_without_validate(record, &self.file)?;
        debug!("Saved {} record to {}", self.format(), self.path().display());
        Ok(())
    }

    /// Read the record into `out` and validate it
    pub fn get<T: DeserializeOwned + Validate>(&self, out: &mut T) -> Result<()> {
        debug!("Loading {} record from {}", self.format(), self.path().display());
        get(out, &self.file)
    }

    /// Read the record into `out` without validating it
    pub fn get_without_validate<T: DeserializeOwned>(&self, out: &mut T) -> Result<()> {
        debug!("Loading {} record from {}", self.format(), self.path().display());
        get_without_validate(out, &self.file)
    }

    /// Read the record as an owned value, without validation
    pub fn load<T: DeserializeOwned>(&self) -> Result<T> {
        self.file.load()
    }

    /// Write `record` as is, without validation
    pub fn store<T: Serialize + ?Sized>(&self, record: &T) -> Result<()> {
        self.file.store(record)
    }

    /// Delete the backing file
    pub fn remove(&self) -> Result<()> {
        self.file.remove()?;
        info!("Removed store '{}' at {}", self.name, self.path().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::format::JsonFile;
    use crate::validate::ValidationError;
    use serde::Deserialize;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    struct Sample {
        name: String,
    }

    impl Validate for Sample {
        fn validate(&self) -> std::result::Result<(), ValidationError> {
            if self.name.is_empty() {
                return Err(ValidationError::new("name should not be empty"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_accessors() {
        let store = RecordStore::new("sample.yaml", "/tmp/base/sample.yaml", Format::Yaml).unwrap();
        assert_eq!(store.name(), "sample.yaml");
        assert_eq!(store.path(), Path::new("/tmp/base/sample.yaml"));
        assert_eq!(store.format(), Format::Yaml);
    }

    #[test]
    fn test_invalid_format_rejected_at_construction() {
        let err = RecordStore::new("sample.bin", "/tmp/sample.bin", 0u8).unwrap_err();
        assert!(matches!(err, StoreError::InvalidFormat { .. }));

        let err = RecordStore::new("sample.ini", "/tmp/sample.ini", "ini").unwrap_err();
        assert!(matches!(err, StoreError::InvalidFormat { .. }));
    }

    #[test]
    fn test_save_invalid_record_leaves_no_file() {
        let temp_dir = TempDir::new().unwrap();

        for format in Format::ALL {
            let path = temp_dir.path().join(format!("sample.{}", format));
            let store = RecordStore::new("sample", &path, format).unwrap();

            let err = store.save(&Sample::default()).unwrap_err();
            assert_eq!(
                err.validation_error(),
                Some(&ValidationError::new("name should not be empty"))
            );
            assert!(!path.exists(), "{} file was created", format);
        }
    }

    #[test]
    fn test_save_invalid_record_keeps_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sample.json");
        let store = RecordStore::new("sample.json", &path, Format::Json).unwrap();

        store.save(&Sample { name: "kept".to_string() }).unwrap();
        let before = fs::read(&path).unwrap();

        assert!(store.save(&Sample::default()).is_err());
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_save_without_validate_writes_invalid_record() {
        let temp_dir = TempDir::new().unwrap();

        for format in Format::ALL {
            let path = temp_dir.path().join(format!("seed.{}", format));
            let store = RecordStore::new("seed", &path, format).unwrap();

            store.save_without_validate(&Sample::default()).unwrap();
            assert!(path.exists());

            let mut loaded = Sample { name: "placeholder".to_string() };
            store.get_without_validate(&mut loaded).unwrap();
            assert_eq!(loaded, Sample::default());
        }
    }

    #[test]
    fn test_get_validates_after_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sample.toml");
        let store = RecordStore::new("sample.toml", &path, Format::Toml).unwrap();
        store.save_without_validate(&Sample::default()).unwrap();

        let mut out = Sample { name: "before".to_string() };
        let err = store.get(&mut out).unwrap_err();

        assert_eq!(err.code(), "validation_error");
        assert_eq!(out, Sample::default());
    }

    #[test]
    fn test_get_missing_file_skips_validation() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.yaml");
        let store = RecordStore::new("absent.yaml", path, Format::Yaml).unwrap();

        let mut out = Sample { name: "untouched".to_string() };
        let err = store.get(&mut out).unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(out.name, "untouched");
    }

    #[test]
    fn test_load_returns_owned_record() {
        let temp_dir = TempDir::new().unwrap();
        let store =
            RecordStore::new("owned.json", temp_dir.path().join("owned.json"), "json").unwrap();

        store.save(&Sample { name: "owned".to_string() }).unwrap();

        let loaded: Sample = store.load().unwrap();
        assert_eq!(loaded.name, "owned");
    }

    #[test]
    fn test_store_and_load_skip_validation() {
        let temp_dir = TempDir::new().unwrap();

        for format in Format::ALL {
            let path = temp_dir.path().join(format!("raw.{}", format));
            let store = RecordStore::new("raw", &path, format).unwrap();

            store.store(&Sample::default()).unwrap();
            assert!(path.exists());

            let loaded: Sample = store.load().unwrap();
            assert_eq!(loaded, Sample::default());
        }
    }

    #[test]
    fn test_remove_twice_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let store =
            RecordStore::new("gone.toml", temp_dir.path().join("gone.toml"), Format::Toml).unwrap();

        store.save(&Sample { name: "x".to_string() }).unwrap();
        store.remove().unwrap();

        assert!(store.remove().unwrap_err().is_not_found());
    }

    #[test]
    fn test_wrappers_work_with_bare_serializer() {
        let temp_dir = TempDir::new().unwrap();
        let file = JsonFile::new(temp_dir.path().join("bare.json"));

        assert!(save(&Sample::default(), &file).is_err());
        assert!(!file.path().exists());

        save(&Sample { name: "bare".to_string() }, &file).unwrap();

        let mut out = Sample::default();
        get(&mut out, &file).unwrap();
        assert_eq!(out.name, "bare");
    }
}
