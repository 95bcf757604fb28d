//! Canonical version reading and manifest synchronization
//!
//! The canonical semantic version lives in one shared properties file and is
//! read-only here. Manifests either get stamped with it (write mode) or are
//! verified against it (check mode).

pub mod reader;
pub mod sync;

pub use reader::{read_canonical_version, read_version_file};
pub use sync::{check_manifest, check_manifest_version, set_manifest_version, sync_manifest};
