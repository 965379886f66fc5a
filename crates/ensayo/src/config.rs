//! Suite configuration.
//!
//! Mirrors the knobs a CI invocation of the suite recognizes: base URL,
//! viewport, timeout set, artifact capture flags, and the test/fixture
//! layout. Loadable from a JSON file, overridable through the builder.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::result::{EnsayoError, EnsayoResult};

/// Timeout set used across the suite.
///
/// Two conflicting sets existed historically (a 10s/20s/5s constants table
/// and a 5s/10s command-timeout config). The constants table is canonical;
/// the short timeout doubles as the implicit per-command lookup timeout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Timeouts {
    /// Default wait for visibility assertions (ms)
    pub default_ms: u64,
    /// Extended wait for slow, network-bound content (ms)
    pub extended_ms: u64,
    /// Short wait, also the implicit element lookup timeout (ms)
    pub short_ms: u64,
    /// Outgoing request timeout (ms)
    pub request_ms: u64,
    /// Response timeout (ms)
    pub response_ms: u64,
    /// Full page load timeout (ms)
    pub page_load_ms: u64,
}

impl Timeouts {
    /// Canonical short timeout, shared with locator defaults.
    pub const CANONICAL_SHORT_MS: u64 = 5_000;

    /// Default wait as a [`Duration`]
    #[must_use]
    pub const fn default_wait(&self) -> Duration {
        Duration::from_millis(self.default_ms)
    }

    /// Extended wait as a [`Duration`]
    #[must_use]
    pub const fn extended(&self) -> Duration {
        Duration::from_millis(self.extended_ms)
    }

    /// Short wait as a [`Duration`]
    #[must_use]
    pub const fn short(&self) -> Duration {
        Duration::from_millis(self.short_ms)
    }

    /// Page load wait as a [`Duration`]
    #[must_use]
    pub const fn page_load(&self) -> Duration {
        Duration::from_millis(self.page_load_ms)
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            default_ms: 10_000,
            extended_ms: 20_000,
            short_ms: Self::CANONICAL_SHORT_MS,
            request_ms: 10_000,
            response_ms: 10_000,
            page_load_ms: 30_000,
        }
    }
}

/// Configuration for a suite run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Base URL all page paths resolve against
    pub base_url: String,
    /// Viewport width in pixels
    pub viewport_width: u32,
    /// Viewport height in pixels
    pub viewport_height: u32,
    /// Timeout set
    pub timeouts: Timeouts,
    /// Capture video of the run
    pub video: bool,
    /// Capture a screenshot artifact when a scenario fails
    pub screenshot_on_failure: bool,
    /// Glob pattern selecting scenario sources
    pub spec_pattern: String,
    /// Directory holding fixture data files
    pub fixture_dir: PathBuf,
    /// Directory receiving failure artifacts
    pub artifact_dir: PathBuf,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://uitestingplayground.com".to_string(),
            viewport_width: 1280,
            viewport_height: 720,
            timeouts: Timeouts::default(),
            video: false,
            screenshot_on_failure: true,
            spec_pattern: "tests/**/*.rs".to_string(),
            fixture_dir: PathBuf::from("fixtures"),
            artifact_dir: PathBuf::from("artifacts"),
        }
    }
}

impl SuiteConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> EnsayoResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| EnsayoError::ConfigError {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        serde_json::from_str(&raw).map_err(|e| EnsayoError::ConfigError {
            message: format!("cannot parse {}: {e}", path.display()),
        })
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set the timeout set
    #[must_use]
    pub const fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Enable or disable failure screenshots
    #[must_use]
    pub const fn with_screenshot_on_failure(mut self, enabled: bool) -> Self {
        self.screenshot_on_failure = enabled;
        self
    }

    /// Set the fixture directory
    #[must_use]
    pub fn with_fixture_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fixture_dir = dir.into();
        self
    }

    /// Set the artifact directory
    #[must_use]
    pub fn with_artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifact_dir = dir.into();
        self
    }

    /// Resolve a site path against the base URL.
    #[must_use]
    pub fn join_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod timeouts_tests {
        use super::*;

        #[test]
        fn test_canonical_set() {
            let t = Timeouts::default();
            assert_eq!(t.default_ms, 10_000);
            assert_eq!(t.extended_ms, 20_000);
            assert_eq!(t.short_ms, 5_000);
            assert_eq!(t.page_load_ms, 30_000);
        }

        #[test]
        fn test_duration_accessors() {
            let t = Timeouts::default();
            assert_eq!(t.extended(), Duration::from_secs(20));
            assert_eq!(t.short(), Duration::from_secs(5));
        }
    }

    mod suite_config_tests {
        use super::*;

        #[test]
        fn test_defaults_match_target_site() {
            let config = SuiteConfig::default();
            assert_eq!(config.base_url, "http://uitestingplayground.com");
            assert_eq!(config.viewport_width, 1280);
            assert_eq!(config.viewport_height, 720);
            assert!(!config.video);
            assert!(config.screenshot_on_failure);
        }

        #[test]
        fn test_join_url() {
            let config = SuiteConfig::default().with_base_url("http://localhost:8080/");
            assert_eq!(config.join_url("/ajax"), "http://localhost:8080/ajax");
            assert_eq!(config.join_url("upload"), "http://localhost:8080/upload");
        }

        #[test]
        fn test_builder() {
            let config = SuiteConfig::new()
                .with_viewport(1920, 1080)
                .with_screenshot_on_failure(false)
                .with_fixture_dir("data");
            assert_eq!(config.viewport_width, 1920);
            assert!(!config.screenshot_on_failure);
            assert_eq!(config.fixture_dir, PathBuf::from("data"));
        }

        #[test]
        fn test_from_file_round_trip() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("suite.json");
            let config = SuiteConfig::default().with_base_url("http://localhost:9999");
            std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

            let loaded = SuiteConfig::from_file(&path).unwrap();
            assert_eq!(loaded.base_url, "http://localhost:9999");
            assert_eq!(loaded.timeouts, Timeouts::default());
        }

        #[test]
        fn test_from_file_missing() {
            let err = SuiteConfig::from_file("/nonexistent/suite.json").unwrap_err();
            assert!(matches!(err, EnsayoError::ConfigError { .. }));
        }

        #[test]
        fn test_partial_file_uses_defaults() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("suite.json");
            std::fs::write(&path, r#"{"base_url": "http://localhost:1234"}"#).unwrap();

            let loaded = SuiteConfig::from_file(&path).unwrap();
            assert_eq!(loaded.base_url, "http://localhost:1234");
            assert_eq!(loaded.viewport_width, 1280);
        }
    }
}
