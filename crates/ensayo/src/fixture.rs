//! Fixture data loading.
//!
//! Fixtures are read-only key-value records loaded once per test from
//! JSON files in the configured fixture directory. Records are addressed
//! by logical name; the `.json` extension is appended here so call sites
//! read like the scenarios that consume them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::result::{EnsayoError, EnsayoResult};

/// Inputs for the disabled-input scenario.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DisabledInputFixture {
    /// Text typed into the input once it is enabled
    pub test_text: String,
    /// Exact status text expected after the update triggers
    pub expected_message: String,
}

/// Inputs for the file-upload scenario.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadFixture {
    /// Upload payload, relative to the fixture directory
    pub file_path: PathBuf,
    /// Substring expected in the success banner
    pub expected_message: String,
}

/// Loader bound to one fixture directory.
#[derive(Debug, Clone)]
pub struct FixtureStore {
    dir: PathBuf,
}

impl FixtureStore {
    /// Create a store rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The fixture directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load and deserialize a fixture record by logical name.
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> EnsayoResult<T> {
        let path = self.dir.join(format!("{name}.json"));
        let raw = std::fs::read_to_string(&path).map_err(|e| EnsayoError::FixtureError {
            message: format!("cannot read fixture {}: {e}", path.display()),
        })?;
        serde_json::from_str(&raw).map_err(|e| EnsayoError::FixtureError {
            message: format!("cannot parse fixture {}: {e}", path.display()),
        })
    }

    /// Whether a fixture record exists under this store.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.dir.join(format!("{name}.json")).is_file()
    }

    /// Resolve a fixture-relative file path (upload payloads and the like).
    #[must_use]
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.dir.join(relative)
    }
}
