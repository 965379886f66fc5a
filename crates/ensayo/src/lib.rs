//! Ensayo: Page-Object E2E Suite for the UI Testing Playground
//!
//! Ensayo (Spanish: "rehearsal") drives http://uitestingplayground.com
//! through page objects built on a small, reusable action vocabulary.
//! Pages own their selectors privately; scenarios compose semantic page
//! operations and never touch raw selectors.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                     ENSAYO Architecture                        │
//! ├────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐           │
//! │   │ Scenario   │    │ Page       │    │ Driver     │           │
//! │   │ (Rust)     │───►│ Objects +  │───►│ (browser   │           │
//! │   │            │    │ Actions    │    │  session)  │           │
//! │   └────────────┘    └────────────┘    └────────────┘           │
//! └────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

/// Action vocabulary shared by every page object
mod actions;
/// Suite configuration and the canonical timeout set
mod config;
/// Driver facade over a browser session, plus the mock session
mod driver;
/// Fixture data loading
mod fixture;
/// Scenario runner and suite reporting
mod harness;
/// Selector and locator types
mod locator;
/// Verified navigation against the base URL
mod navigation;
/// Page objects, one per exercised playground page
pub mod pages;
/// Error and result types
mod result;
/// One-time suite environment setup
mod support;

pub use actions::Actions;
pub use config::{SuiteConfig, Timeouts};
pub use driver::{
    Driver, ElementSnapshot, MockDom, MockDriver, MockElement, UploadMethod,
};
pub use fixture::{DisabledInputFixture, FileUploadFixture, FixtureStore};
pub use harness::{ScenarioResult, ScenarioRunner, SuiteReport};
pub use locator::{Locator, LocatorOptions, Selector, DEFAULT_POLL_INTERVAL_MS};
pub use navigation::Navigate;
pub use pages::{
    AjaxDataPage, DisabledInputPage, FileUploadPage, HomePage, Page, ScrollBarsPage, NAV_LINKS,
};
pub use result::{EnsayoError, EnsayoResult};
pub use support::{hide_request_noise, init_logging};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::actions::Actions;
    pub use super::config::{SuiteConfig, Timeouts};
    pub use super::driver::{Driver, MockDriver, MockElement, UploadMethod};
    pub use super::fixture::{DisabledInputFixture, FileUploadFixture, FixtureStore};
    pub use super::harness::{ScenarioRunner, SuiteReport};
    pub use super::locator::Selector;
    pub use super::navigation::Navigate;
    pub use super::pages::*;
    pub use super::result::{EnsayoError, EnsayoResult};
    pub use super::support::{hide_request_noise, init_logging};
}
