//! Store Registry
//!
//! Binds named records to files and tracks them per base directory.
//!
//! Directory structure:
//! ```text
//! {base_dir}/
//!   ├── settings.toml       # one file per store, named after the store
//!   ├── sample.json
//!   └── profile.yaml
//! ```

mod manager;
mod store;

pub use manager::StoreRegistry;
pub use store::{get, get_without_validate, save, save_without_validate, RecordStore};
