//! Shared DOM action vocabulary.
//!
//! Implements the base-page primitives once, as a capability every page
//! module composes instead of inheriting: click, type, clear, the
//! assertion family, polling waits, scrolling, hovering, and URL checks.
//! Page objects never call the driver facade directly for these, which
//! keeps timeout and assertion behavior uniform across the suite.
//!
//! Every operation re-queries the DOM; nothing is cached between calls.
//! Polling waits are the only suspension points and always carry a
//! deadline. The implicit element lookup window is the configured short
//! timeout, matching the driver's per-command timeout.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::SuiteConfig;
use crate::driver::{Driver, ElementSnapshot, UploadMethod};
use crate::locator::{Locator, Selector, DEFAULT_POLL_INTERVAL_MS};
use crate::result::{EnsayoError, EnsayoResult};

/// DOM action provider bound to one driver session.
///
/// Cheap to clone; clones share the session and configuration.
pub struct Actions<D> {
    driver: Arc<D>,
    config: Arc<SuiteConfig>,
}

impl<D> Clone for Actions<D> {
    fn clone(&self) -> Self {
        Self {
            driver: Arc::clone(&self.driver),
            config: Arc::clone(&self.config),
        }
    }
}

impl<D> std::fmt::Debug for Actions<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actions")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl<D: Driver> Actions<D> {
    /// Bind the vocabulary to a driver session and suite config.
    #[must_use]
    pub fn new(driver: Arc<D>, config: SuiteConfig) -> Self {
        Self {
            driver,
            config: Arc::new(config),
        }
    }

    /// The underlying driver session.
    #[must_use]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The suite configuration.
    #[must_use]
    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    fn poll_interval() -> Duration {
        Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)
    }

    /// Wait for at least one match within the implicit lookup window.
    async fn require(&self, selector: &Selector) -> EnsayoResult<ElementSnapshot> {
        let deadline = Instant::now() + self.config.timeouts.short();
        loop {
            if let Some(snapshot) = self.driver.query(selector).await? {
                return Ok(snapshot);
            }
            if Instant::now() >= deadline {
                return Err(EnsayoError::LookupFailed {
                    selector: selector.to_string(),
                });
            }
            tokio::time::sleep(Self::poll_interval()).await;
        }
    }

    /// Click the first matching element.
    pub async fn click(&self, selector: &Selector) -> EnsayoResult<()> {
        let _ = self.require(selector).await?;
        tracing::debug!(selector = %selector, "click");
        self.driver.click(selector).await
    }

    /// Send keystrokes to the first matching element.
    ///
    /// Existing content is not cleared first; call [`Self::clear`]
    /// explicitly when that is wanted.
    pub async fn type_text(&self, selector: &Selector, text: &str) -> EnsayoResult<()> {
        let _ = self.require(selector).await?;
        tracing::debug!(selector = %selector, chars = text.len(), "type");
        self.driver.type_text(selector, text).await
    }

    /// Empty an input-like element's current value.
    pub async fn clear(&self, selector: &Selector) -> EnsayoResult<()> {
        let _ = self.require(selector).await?;
        self.driver.clear(selector).await
    }

    /// Assert the element is present and visually rendered.
    pub async fn assert_visible(&self, selector: &Selector) -> EnsayoResult<()> {
        self.wait_for_visible(selector, self.config.timeouts.short())
            .await
    }

    /// Poll until the element is visible, up to `timeout`.
    ///
    /// Returns as soon as the element renders; fails with a timeout error
    /// the moment the deadline elapses without it.
    pub async fn wait_for_visible(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> EnsayoResult<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(snapshot) = self.driver.query(selector).await? {
                if snapshot.visible {
                    return Ok(());
                }
            }
            if Instant::now() >= deadline {
                return Err(EnsayoError::Timeout {
                    ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                    waiting_for: format!("visibility of {selector}"),
                });
            }
            tokio::time::sleep(Self::poll_interval()).await;
        }
    }

    /// Resolve a locator, honoring its timeout, poll interval, and
    /// visibility requirement.
    ///
    /// With `visible` unset the element only has to exist; hidden
    /// elements resolve immediately. Returns the snapshot taken at the
    /// moment the requirement was met.
    pub async fn wait_for(&self, locator: &Locator) -> EnsayoResult<ElementSnapshot> {
        let options = locator.options();
        let deadline = Instant::now() + options.timeout;
        loop {
            if let Some(snapshot) = self.driver.query(locator.selector()).await? {
                if !options.visible || snapshot.visible {
                    return Ok(snapshot);
                }
            }
            if Instant::now() >= deadline {
                return Err(EnsayoError::Timeout {
                    ms: u64::try_from(options.timeout.as_millis()).unwrap_or(u64::MAX),
                    waiting_for: format!("resolution of {}", locator.selector()),
                });
            }
            tokio::time::sleep(options.poll_interval).await;
        }
    }

    /// Assert at least one matching element exists, visible or not.
    pub async fn assert_exists(&self, selector: &Selector) -> EnsayoResult<()> {
        let _ = self.require(selector).await?;
        Ok(())
    }

    /// Trimmed rendered text of the first matching element.
    pub async fn text(&self, selector: &Selector) -> EnsayoResult<String> {
        let snapshot = self.require(selector).await?;
        Ok(snapshot.text.trim().to_string())
    }

    /// Assert the element's rendered text contains `needle`.
    pub async fn assert_contains_text(&self, selector: &Selector, needle: &str) -> EnsayoResult<()> {
        let deadline = Instant::now() + self.config.timeouts.short();
        let mut last_seen: Option<String> = None;
        loop {
            if let Some(snapshot) = self.driver.query(selector).await? {
                if snapshot.text.contains(needle) {
                    return Ok(());
                }
                last_seen = Some(snapshot.text);
            }
            if Instant::now() >= deadline {
                return Err(EnsayoError::assertion(format!(
                    "expected {selector} to contain {needle:?}, last saw {last_seen:?}"
                )));
            }
            tokio::time::sleep(Self::poll_interval()).await;
        }
    }

    /// Assert the element's trimmed text equals `expected` exactly.
    pub async fn assert_text_equals(&self, selector: &Selector, expected: &str) -> EnsayoResult<()> {
        let deadline = Instant::now() + self.config.timeouts.short();
        let mut last_seen: Option<String> = None;
        loop {
            if let Some(snapshot) = self.driver.query(selector).await? {
                let trimmed = snapshot.text.trim();
                if trimmed == expected {
                    return Ok(());
                }
                last_seen = Some(trimmed.to_string());
            }
            if Instant::now() >= deadline {
                return Err(EnsayoError::assertion(format!(
                    "expected {selector} text to equal {expected:?}, last saw {last_seen:?}"
                )));
            }
            tokio::time::sleep(Self::poll_interval()).await;
        }
    }

    /// Assert the element's attribute equals `value` exactly.
    pub async fn assert_attribute(
        &self,
        selector: &Selector,
        attribute: &str,
        value: &str,
    ) -> EnsayoResult<()> {
        let deadline = Instant::now() + self.config.timeouts.short();
        let mut last_seen: Option<String> = None;
        loop {
            if let Some(snapshot) = self.driver.query(selector).await? {
                if snapshot.attribute(attribute) == Some(value) {
                    return Ok(());
                }
                last_seen = snapshot.attribute(attribute).map(ToString::to_string);
            }
            if Instant::now() >= deadline {
                return Err(EnsayoError::assertion(format!(
                    "expected {selector} attribute {attribute:?} to equal {value:?}, last saw {last_seen:?}"
                )));
            }
            tokio::time::sleep(Self::poll_interval()).await;
        }
    }

    /// Assert the element accepts input (no `disabled` attribute).
    pub async fn assert_enabled(&self, selector: &Selector) -> EnsayoResult<()> {
        let deadline = Instant::now() + self.config.timeouts.short();
        loop {
            if let Some(snapshot) = self.driver.query(selector).await? {
                if snapshot.is_enabled() {
                    return Ok(());
                }
            }
            if Instant::now() >= deadline {
                return Err(EnsayoError::assertion(format!(
                    "expected {selector} to become enabled"
                )));
            }
            tokio::time::sleep(Self::poll_interval()).await;
        }
    }

    /// Bring the first matching element into the viewport.
    ///
    /// Asserts nothing beyond the element's existence.
    pub async fn scroll_to(&self, selector: &Selector) -> EnsayoResult<()> {
        let _ = self.require(selector).await?;
        self.driver.scroll_into_view(selector).await
    }

    /// Dispatch a pointer-over event on the element.
    pub async fn hover(&self, selector: &Selector) -> EnsayoResult<()> {
        let _ = self.require(selector).await?;
        self.driver.dispatch_event(selector, "mouseover").await
    }

    /// Attach a file to a file input.
    pub async fn upload_file(
        &self,
        selector: &Selector,
        path: &Path,
        method: UploadMethod,
    ) -> EnsayoResult<()> {
        let _ = self.require(selector).await?;
        tracing::debug!(selector = %selector, method = method.as_str(), "upload");
        self.driver.upload_file(selector, path, method).await
    }

    /// The URL the session currently reports.
    pub async fn url(&self) -> EnsayoResult<String> {
        self.driver.current_url().await
    }

    /// Assert the current URL contains `fragment`.
    pub async fn assert_url_contains(&self, fragment: &str) -> EnsayoResult<()> {
        let deadline = Instant::now() + self.config.timeouts.short();
        let mut last_seen = String::new();
        loop {
            last_seen = self.driver.current_url().await?;
            if last_seen.contains(fragment) {
                return Ok(());
            }
            if Instant::now() >= deadline {
                break;
            }
            tokio::time::sleep(Self::poll_interval()).await;
        }
        Err(EnsayoError::assertion(format!(
            "expected URL to contain {fragment:?}, last saw {last_seen:?}"
        )))
    }

    /// Poll until the session reports a non-empty URL.
    ///
    /// This only checks that the URL is populated; it never compares
    /// against a previously observed value. Use
    /// [`Self::wait_for_url_changed_from`] when an actual transition
    /// matters.
    pub async fn wait_for_url_populated(&self, timeout: Duration) -> EnsayoResult<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if !self.driver.current_url().await?.is_empty() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(EnsayoError::Timeout {
                    ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                    waiting_for: "a non-empty URL".to_string(),
                });
            }
            tokio::time::sleep(Self::poll_interval()).await;
        }
    }

    /// Poll until the URL differs from `previous`.
    pub async fn wait_for_url_changed_from(
        &self,
        previous: &str,
        timeout: Duration,
    ) -> EnsayoResult<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.driver.current_url().await? != previous {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(EnsayoError::Timeout {
                    ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                    waiting_for: format!("URL to change from {previous:?}"),
                });
            }
            tokio::time::sleep(Self::poll_interval()).await;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::{MockDriver, MockElement};

    fn quick_actions(driver: MockDriver) -> Actions<MockDriver> {
        // 200ms short window keeps negative-path tests fast
        let timeouts = crate::config::Timeouts {
            short_ms: 200,
            ..crate::config::Timeouts::default()
        };
        let config = SuiteConfig::default().with_timeouts(timeouts);
        Actions::new(Arc::new(driver), config)
    }

    mod lookup_tests {
        use super::*;

        #[tokio::test]
        async fn test_click_missing_is_lookup_failure() {
            let actions = quick_actions(MockDriver::new());
            let err = actions.click(&Selector::css("#missing")).await.unwrap_err();
            assert!(matches!(err, EnsayoError::LookupFailed { .. }));
        }

        #[tokio::test]
        async fn test_require_waits_for_late_insert() {
            let driver = MockDriver::new();
            let sel = Selector::css("#late");
            let actions = quick_actions(driver);

            let insert_actions = actions.clone();
            let insert_sel = sel.clone();
            let inserter = tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(60)).await;
                insert_actions
                    .driver()
                    .insert(&insert_sel, MockElement::new("div"));
            });

            actions.assert_exists(&sel).await.unwrap();
            inserter.await.unwrap();
        }
    }

    mod visibility_tests {
        use super::*;

        #[tokio::test]
        async fn test_wait_for_visible_times_out_deterministically() {
            let driver = MockDriver::new();
            let sel = Selector::css("#never");
            driver.insert(&sel, MockElement::new("div").hidden());
            let actions = quick_actions(driver);

            let start = Instant::now();
            let err = actions
                .wait_for_visible(&sel, Duration::from_millis(150))
                .await
                .unwrap_err();
            assert!(err.is_timeout());
            assert!(start.elapsed() >= Duration::from_millis(150));
        }

        #[tokio::test]
        async fn test_wait_for_visible_returns_early() {
            let driver = MockDriver::new();
            let sel = Selector::css("#soon");
            driver.insert(&sel, MockElement::new("div"));
            let actions = quick_actions(driver);

            let start = Instant::now();
            actions
                .wait_for_visible(&sel, Duration::from_secs(10))
                .await
                .unwrap();
            assert!(start.elapsed() < Duration::from_secs(1));
        }
    }

    mod locator_resolution_tests {
        use super::*;

        #[tokio::test]
        async fn test_wait_for_hidden_element_without_visibility_requirement() {
            let driver = MockDriver::new();
            let sel = Selector::css("#tucked-away");
            driver.insert(&sel, MockElement::new("div").hidden());
            let actions = quick_actions(driver);

            let err = actions
                .wait_for(&Locator::from_selector(sel.clone()).with_timeout(Duration::from_millis(120)))
                .await
                .unwrap_err();
            assert!(err.is_timeout());

            let snapshot = actions
                .wait_for(&Locator::from_selector(sel).with_visible(false))
                .await
                .unwrap();
            assert!(!snapshot.visible);
        }

        #[tokio::test]
        async fn test_wait_for_honors_custom_timeout() {
            let actions = quick_actions(MockDriver::new());
            let locator = Locator::new("#absent").with_timeout(Duration::from_millis(150));

            let start = Instant::now();
            let err = actions.wait_for(&locator).await.unwrap_err();
            assert!(err.is_timeout());
            assert!(start.elapsed() >= Duration::from_millis(150));
            assert!(err.to_string().contains("#absent"));
        }

        #[tokio::test]
        async fn test_wait_for_text_narrowed_locator() {
            let driver = MockDriver::new();
            driver.insert(
                &Selector::css("#content > p"),
                MockElement::new("p").with_text("Data loaded with AJAX get request."),
            );
            let actions = quick_actions(driver);

            let snapshot = actions
                .wait_for(&Locator::new("#content > p").with_text("Data loaded"))
                .await
                .unwrap();
            assert!(snapshot.text.contains("Data loaded"));
        }
    }

    mod pointer_tests {
        use super::*;

        #[tokio::test]
        async fn test_hover_dispatches_mouseover() {
            let driver = MockDriver::new();
            let sel = Selector::css("button#clickButton");
            driver.insert(&sel, MockElement::new("button"));
            let actions = quick_actions(driver);

            actions.hover(&sel).await.unwrap();
            assert!(actions
                .driver()
                .was_called("event:button#clickButton:mouseover"));
        }

        #[tokio::test]
        async fn test_hover_missing_is_lookup_failure() {
            let actions = quick_actions(MockDriver::new());
            let err = actions.hover(&Selector::css("#gone")).await.unwrap_err();
            assert!(matches!(err, EnsayoError::LookupFailed { .. }));
            assert!(!actions.driver().was_called("event:"));
        }
    }

    mod input_tests {
        use super::*;

        #[tokio::test]
        async fn test_clear_empties_value() {
            let driver = MockDriver::new();
            let sel = Selector::css("input#inputField");
            driver.insert(&sel, MockElement::new("input").with_value("stale"));
            let actions = quick_actions(driver);

            actions.clear(&sel).await.unwrap();
            let snapshot = actions.driver().query(&sel).await.unwrap().unwrap();
            assert!(snapshot.value.is_empty());
        }

        #[tokio::test]
        async fn test_clear_missing_is_lookup_failure() {
            let actions = quick_actions(MockDriver::new());
            let err = actions.clear(&Selector::css("#gone")).await.unwrap_err();
            assert!(matches!(err, EnsayoError::LookupFailed { .. }));
            assert!(!actions.driver().was_called("clear:"));
        }
    }

    mod text_tests {
        use super::*;

        #[tokio::test]
        async fn test_text_is_trimmed() {
            let driver = MockDriver::new();
            let sel = Selector::css("#opstatus");
            driver.insert(&sel, MockElement::new("div").with_text("  changed \n"));
            let actions = quick_actions(driver);

            assert_eq!(actions.text(&sel).await.unwrap(), "changed");
            actions.assert_text_equals(&sel, "changed").await.unwrap();
        }

        #[tokio::test]
        async fn test_contains_text_reports_last_seen() {
            let driver = MockDriver::new();
            let sel = Selector::css("p");
            driver.insert(&sel, MockElement::new("p").with_text("something else"));
            let actions = quick_actions(driver);

            let err = actions
                .assert_contains_text(&sel, "Data loaded")
                .await
                .unwrap_err();
            assert!(err.to_string().contains("something else"));
        }
    }

    mod attribute_tests {
        use super::*;

        #[tokio::test]
        async fn test_assert_attribute_exact_match() {
            let driver = MockDriver::new();
            let sel = Selector::css("img");
            driver.insert(
                &sel,
                MockElement::new("img").with_attribute("alt", "Responsive image"),
            );
            let actions = quick_actions(driver);

            actions
                .assert_attribute(&sel, "alt", "Responsive image")
                .await
                .unwrap();
            let err = actions
                .assert_attribute(&sel, "alt", "responsive image")
                .await
                .unwrap_err();
            assert!(matches!(err, EnsayoError::AssertionFailed { .. }));
        }

        #[tokio::test]
        async fn test_assert_enabled_after_effect() {
            let driver = MockDriver::new();
            let button = Selector::css("button#enableButton");
            let input = Selector::css("input#inputField");
            driver.insert(&button, MockElement::new("button"));
            driver.insert(&input, MockElement::new("input").disabled());
            let input_for_effect = input.clone();
            driver.on_click(&button, move |dom| {
                dom.remove_attribute(&input_for_effect, "disabled");
            });
            let actions = quick_actions(driver);

            actions.click(&button).await.unwrap();
            actions.assert_enabled(&input).await.unwrap();
        }
    }

    mod url_tests {
        use super::*;

        #[tokio::test]
        async fn test_url_populated_wait() {
            let driver = MockDriver::new();
            let actions = quick_actions(driver);

            let err = actions
                .wait_for_url_populated(Duration::from_millis(120))
                .await
                .unwrap_err();
            assert!(err.is_timeout());

            actions.driver().navigate("http://localhost/home").await.unwrap();
            actions
                .wait_for_url_populated(Duration::from_millis(120))
                .await
                .unwrap();
            // Populated is not the same as changed: the helper accepts
            // whatever non-empty URL is already there.
            actions
                .wait_for_url_changed_from("http://localhost/home", Duration::from_millis(120))
                .await
                .unwrap_err();
        }

        #[tokio::test]
        async fn test_url_contains() {
            let driver = MockDriver::new();
            let actions = quick_actions(driver);
            actions.driver().navigate("http://localhost/ajax").await.unwrap();

            actions.assert_url_contains("/ajax").await.unwrap();
            let err = actions.assert_url_contains("/upload").await.unwrap_err();
            assert!(err.to_string().contains("/upload"));
        }
    }
}
