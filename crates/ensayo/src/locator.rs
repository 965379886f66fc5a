//! Locator abstraction for element selection.
//!
//! Selectors are opaque to the suite: each page object declares its own
//! table of semantic name to selector mappings, and the driver facade is
//! the only consumer of the rendered query. Selectors are immutable after
//! declaration and may match a role rather than a single element.

use std::fmt;
use std::time::Duration;

/// Default polling interval for auto-waiting (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// CSS selector (e.g., "button#ajaxButton")
    Css(String),
    /// XPath selector
    XPath(String),
    /// Text content selector (any element containing the text)
    Text(String),
    /// CSS selector narrowed to elements containing a text fragment
    CssWithText {
        /// Base CSS selector
        css: String,
        /// Text content to match
        text: String,
    },
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::XPath(selector.into())
    }

    /// Create a text selector
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Narrow a CSS selector by a text fragment.
    ///
    /// Non-CSS selectors are returned unchanged.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        match self {
            Self::Css(css) => Self::CssWithText {
                css,
                text: text.into(),
            },
            other => other,
        }
    }

    /// Render a JavaScript expression resolving to the first match.
    ///
    /// Driver implementations backed by script evaluation use this; the
    /// mock driver matches on the canonical form instead.
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::XPath(s) => {
                format!("document.evaluate({s:?}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue")
            }
            Self::Text(t) => {
                format!("Array.from(document.querySelectorAll('*')).find(el => el.textContent.includes({t:?}))")
            }
            Self::CssWithText { css, text } => {
                format!("Array.from(document.querySelectorAll({css:?})).find(el => el.textContent.includes({text:?}))")
            }
        }
    }

    /// Render a JavaScript expression resolving to the match count.
    #[must_use]
    pub fn to_count_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelectorAll({s:?}).length"),
            Self::XPath(s) => {
                format!("document.evaluate({s:?}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null).snapshotLength")
            }
            Self::Text(t) => {
                format!("Array.from(document.querySelectorAll('*')).filter(el => el.textContent.includes({t:?})).length")
            }
            Self::CssWithText { css, text } => {
                format!("Array.from(document.querySelectorAll({css:?})).filter(el => el.textContent.includes({text:?})).length")
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "{s}"),
            Self::XPath(s) => write!(f, "xpath={s}"),
            Self::Text(t) => write!(f, "text={t}"),
            Self::CssWithText { css, text } => write!(f, "{css}:text({text})"),
        }
    }
}

/// Options controlling how a locator is resolved
#[derive(Debug, Clone)]
pub struct LocatorOptions {
    /// Timeout for auto-waiting
    pub timeout: Duration,
    /// Polling interval for auto-waiting
    pub poll_interval: Duration,
    /// Whether the element must be visible
    pub visible: bool,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(crate::config::Timeouts::CANONICAL_SHORT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            visible: true,
        }
    }
}

/// A selector paired with resolution options.
#[derive(Debug, Clone)]
pub struct Locator {
    selector: Selector,
    options: LocatorOptions,
}

impl Locator {
    /// Create a new locator with a CSS selector
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self::from_selector(Selector::Css(selector.into()))
    }

    /// Create a locator from a selector
    #[must_use]
    pub fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            options: LocatorOptions::default(),
        }
    }

    /// Filter by text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.selector = self.selector.with_text(text);
        self
    }

    /// Set a custom timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Set visibility requirement
    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.options.visible = visible;
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the options
    #[must_use]
    pub const fn options(&self) -> &LocatorOptions {
        &self.options
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod selector_tests {
        use super::*;

        #[test]
        fn test_css_display_is_bare() {
            let sel = Selector::css("button#ajaxButton");
            assert_eq!(sel.to_string(), "button#ajaxButton");
        }

        #[test]
        fn test_with_text_wraps_css() {
            let sel = Selector::css("#content > p").with_text("Data loaded");
            assert_eq!(
                sel,
                Selector::CssWithText {
                    css: "#content > p".to_string(),
                    text: "Data loaded".to_string(),
                }
            );
            assert_eq!(sel.to_string(), "#content > p:text(Data loaded)");
        }

        #[test]
        fn test_with_text_leaves_xpath_alone() {
            let sel = Selector::xpath("//div").with_text("ignored");
            assert_eq!(sel, Selector::XPath("//div".to_string()));
        }

        #[test]
        fn test_to_query_css() {
            let q = Selector::css(".success-file").to_query();
            assert!(q.contains("querySelector"));
            assert!(q.contains(".success-file"));
        }

        #[test]
        fn test_to_count_query_text() {
            let q = Selector::text("Home").to_count_query();
            assert!(q.ends_with(".length"));
        }
    }

    mod locator_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let loc = Locator::new("input#inputField");
            assert!(loc.options().visible);
            assert_eq!(
                loc.options().poll_interval,
                Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)
            );
        }

        #[test]
        fn test_builder() {
            let loc = Locator::new("button")
                .with_text("Enable")
                .with_timeout(Duration::from_secs(2))
                .with_visible(false);
            assert!(!loc.options().visible);
            assert_eq!(loc.options().timeout, Duration::from_secs(2));
            assert!(matches!(loc.selector(), Selector::CssWithText { .. }));
        }
    }
}
