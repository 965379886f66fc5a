//! Driver facade: the contract the suite expects from a browser
//! automation client.
//!
//! The suite never talks to a browser directly. Everything above this
//! module composes the [`Driver`] trait, which an externally supplied
//! command-queueing client implements. Methods take `&self` because the
//! client owns its own queue and synchronization; callers sequence
//! commands through program order, not through exclusive borrows.
//!
//! [`MockDriver`] is the scripted implementation the suite's own tests
//! run against: a small in-memory DOM keyed by canonical selector text,
//! with per-selector effects that mutate the DOM in response to clicks,
//! keystrokes, and uploads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::locator::Selector;
use crate::result::{EnsayoError, EnsayoResult};

/// Snapshot of one DOM element at query time.
///
/// Ownership is transient: every action call produces and consumes its
/// own snapshot, never caching one across calls, so stale-element state
/// cannot leak between steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementSnapshot {
    /// Element tag name
    pub tag_name: String,
    /// Rendered text content (untrimmed)
    pub text: String,
    /// Current input value, if input-like
    pub value: String,
    /// Whether the element is visually rendered
    pub visible: bool,
    /// Attribute map at query time
    pub attributes: HashMap<String, String>,
}

impl ElementSnapshot {
    /// Create a snapshot for a tag with empty content.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            text: String::new(),
            value: String::new(),
            visible: true,
            attributes: HashMap::new(),
        }
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whether the element accepts input (no `disabled` attribute).
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.attributes.contains_key("disabled")
    }
}

/// How a file reaches a file input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadMethod {
    /// Simulated drag-and-drop onto the drop zone
    DragDrop,
    /// Direct selection through the file chooser
    FileChooser,
}

impl UploadMethod {
    /// Stable name used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DragDrop => "drag-drop",
            Self::FileChooser => "file-chooser",
        }
    }
}

/// Abstract browser automation contract.
///
/// Implementations queue each call onto a single ordered command queue
/// and resolve it against the live DOM; the suite relies only on FIFO
/// ordering within one scenario.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigate the session to an absolute URL.
    async fn navigate(&self, url: &str) -> EnsayoResult<()>;

    /// Current URL the session reports.
    async fn current_url(&self) -> EnsayoResult<String>;

    /// Query the first element matching a selector.
    async fn query(&self, selector: &Selector) -> EnsayoResult<Option<ElementSnapshot>>;

    /// Query all elements matching a selector.
    async fn query_all(&self, selector: &Selector) -> EnsayoResult<Vec<ElementSnapshot>>;

    /// Dispatch a click on the first matching element.
    async fn click(&self, selector: &Selector) -> EnsayoResult<()>;

    /// Send keystrokes to the first matching element.
    async fn type_text(&self, selector: &Selector, text: &str) -> EnsayoResult<()>;

    /// Empty an input-like element's current value.
    async fn clear(&self, selector: &Selector) -> EnsayoResult<()>;

    /// Bring the first matching element into the viewport.
    async fn scroll_into_view(&self, selector: &Selector) -> EnsayoResult<()>;

    /// Dispatch a named DOM event on the first matching element.
    async fn dispatch_event(&self, selector: &Selector, event: &str) -> EnsayoResult<()>;

    /// Attach a file to a file input.
    async fn upload_file(
        &self,
        selector: &Selector,
        path: &Path,
        method: UploadMethod,
    ) -> EnsayoResult<()>;

    /// Evaluate a script in page context.
    async fn evaluate(&self, script: &str) -> EnsayoResult<serde_json::Value>;

    /// Capture a PNG screenshot of the session.
    async fn screenshot(&self) -> EnsayoResult<Vec<u8>>;
}

/// One element in the mock DOM.
#[derive(Debug, Clone)]
pub struct MockElement {
    /// Element tag name
    pub tag_name: String,
    /// Rendered text content
    pub text: String,
    /// Current input value
    pub value: String,
    /// Whether the element is rendered
    pub visible: bool,
    /// Attribute map
    pub attributes: HashMap<String, String>,
    visible_at: Option<Instant>,
}

impl MockElement {
    /// Create a visible element with empty content.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            text: String::new(),
            value: String::new(),
            visible: true,
            attributes: HashMap::new(),
            visible_at: None,
        }
    }

    /// Set the rendered text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the input value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Set an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    /// Start hidden.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Start with the `disabled` attribute set.
    #[must_use]
    pub fn disabled(self) -> Self {
        self.with_attribute("disabled", "disabled")
    }

    fn currently_visible(&self) -> bool {
        self.visible || self.visible_at.is_some_and(|at| Instant::now() >= at)
    }

    fn snapshot(&self) -> ElementSnapshot {
        ElementSnapshot {
            tag_name: self.tag_name.clone(),
            text: self.text.clone(),
            value: self.value.clone(),
            visible: self.currently_visible(),
            attributes: self.attributes.clone(),
        }
    }
}

/// The mock driver's in-memory DOM, exposed to scripted effects.
#[derive(Debug, Default)]
pub struct MockDom {
    /// URL the session currently reports
    pub current_url: String,
    elements: HashMap<String, MockElement>,
    call_log: Vec<String>,
    eval_results: VecDeque<serde_json::Value>,
}

impl MockDom {
    fn key(selector: &Selector) -> String {
        selector.to_string()
    }

    /// Insert or replace an element under a selector.
    pub fn insert(&mut self, selector: &Selector, element: MockElement) {
        let _ = self.elements.insert(Self::key(selector), element);
    }

    /// Remove an element.
    pub fn remove(&mut self, selector: &Selector) {
        let _ = self.elements.remove(&Self::key(selector));
    }

    /// Mutable access to an element by its declaring selector.
    pub fn element_mut(&mut self, selector: &Selector) -> Option<&mut MockElement> {
        self.elements.get_mut(&Self::key(selector))
    }

    /// Replace an element's rendered text.
    pub fn set_text(&mut self, selector: &Selector, text: impl Into<String>) {
        if let Some(el) = self.element_mut(selector) {
            el.text = text.into();
        }
    }

    /// Show or hide an element immediately.
    pub fn set_visible(&mut self, selector: &Selector, visible: bool) {
        if let Some(el) = self.element_mut(selector) {
            el.visible = visible;
            el.visible_at = None;
        }
    }

    /// Schedule a hidden element to become visible after a delay.
    pub fn reveal_after(&mut self, selector: &Selector, delay: Duration) {
        if let Some(el) = self.element_mut(selector) {
            el.visible = false;
            el.visible_at = Some(Instant::now() + delay);
        }
    }

    /// Set an attribute on an element.
    pub fn set_attribute(
        &mut self,
        selector: &Selector,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        if let Some(el) = self.element_mut(selector) {
            let _ = el.attributes.insert(name.into(), value.into());
        }
    }

    /// Remove an attribute from an element.
    pub fn remove_attribute(&mut self, selector: &Selector, name: &str) {
        if let Some(el) = self.element_mut(selector) {
            let _ = el.attributes.remove(name);
        }
    }

    // CSS-with-text selectors fall back to their base CSS entry filtered
    // by text content, so tests register plain CSS elements once.
    fn resolve(&self, selector: &Selector) -> Option<&MockElement> {
        if let Some(el) = self.elements.get(&Self::key(selector)) {
            return Some(el);
        }
        if let Selector::CssWithText { css, text } = selector {
            return self
                .elements
                .get(&Self::key(&Selector::Css(css.clone())))
                .filter(|el| el.text.contains(text.as_str()));
        }
        None
    }

    fn resolve_mut(&mut self, selector: &Selector) -> Option<&mut MockElement> {
        let key = if self.elements.contains_key(&Self::key(selector)) {
            Self::key(selector)
        } else if let Selector::CssWithText { css, text } = selector {
            let base = Self::key(&Selector::Css(css.clone()));
            match self.elements.get(&base) {
                Some(el) if el.text.contains(text.as_str()) => base,
                _ => return None,
            }
        } else {
            return None;
        };
        self.elements.get_mut(&key)
    }

    fn log(&mut self, entry: String) {
        self.call_log.push(entry);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum EffectTrigger {
    Click,
    Type,
    Upload,
}

type Effect = Box<dyn Fn(&mut MockDom) + Send + Sync>;

/// Scripted driver for suite tests.
///
/// Tests seed the DOM with [`MockElement`]s, register effects that fire
/// when a selector is clicked, typed into, or uploaded to, and inspect
/// the ordered call log afterwards.
pub struct MockDriver {
    state: Mutex<MockDom>,
    effects: Mutex<HashMap<(EffectTrigger, String), Vec<Effect>>>,
}

impl std::fmt::Debug for MockDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockDriver")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDriver {
    /// Create an empty mock session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockDom::default()),
            effects: Mutex::new(HashMap::new()),
        }
    }

    fn dom(&self) -> std::sync::MutexGuard<'_, MockDom> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert or replace an element under a selector.
    pub fn insert(&self, selector: &Selector, element: MockElement) {
        self.dom().insert(selector, element);
    }

    /// Remove an element.
    pub fn remove(&self, selector: &Selector) {
        self.dom().remove(selector);
    }

    /// Run a scripted mutation against the DOM.
    pub fn apply(&self, f: impl FnOnce(&mut MockDom)) {
        f(&mut self.dom());
    }

    /// Register an effect that runs when `selector` is clicked.
    pub fn on_click(&self, selector: &Selector, effect: impl Fn(&mut MockDom) + Send + Sync + 'static) {
        self.register(EffectTrigger::Click, selector, Box::new(effect));
    }

    /// Register an effect that runs after keystrokes land on `selector`.
    pub fn on_type(&self, selector: &Selector, effect: impl Fn(&mut MockDom) + Send + Sync + 'static) {
        self.register(EffectTrigger::Type, selector, Box::new(effect));
    }

    /// Register an effect that runs after a file is attached to `selector`.
    pub fn on_upload(&self, selector: &Selector, effect: impl Fn(&mut MockDom) + Send + Sync + 'static) {
        self.register(EffectTrigger::Upload, selector, Box::new(effect));
    }

    /// Queue a result for the next `evaluate` call.
    pub fn push_eval_result(&self, value: serde_json::Value) {
        self.dom().eval_results.push_back(value);
    }

    /// Ordered log of driver commands received so far.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.dom().call_log.clone()
    }

    /// Whether any received command starts with `prefix`.
    #[must_use]
    pub fn was_called(&self, prefix: &str) -> bool {
        self.dom().call_log.iter().any(|c| c.starts_with(prefix))
    }

    fn register(&self, trigger: EffectTrigger, selector: &Selector, effect: Effect) {
        self.effects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry((trigger, MockDom::key(selector)))
            .or_default()
            .push(effect);
    }

    fn run_effects(&self, trigger: EffectTrigger, selector: &Selector) {
        let effects = self.effects.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(list) = effects.get(&(trigger, MockDom::key(selector))) {
            let mut dom = self.dom();
            for effect in list {
                effect(&mut dom);
            }
        }
    }

    fn require(&self, selector: &Selector) -> EnsayoResult<()> {
        if self.dom().resolve(selector).is_none() {
            return Err(EnsayoError::LookupFailed {
                selector: selector.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn navigate(&self, url: &str) -> EnsayoResult<()> {
        let mut dom = self.dom();
        dom.log(format!("navigate:{url}"));
        dom.current_url = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> EnsayoResult<String> {
        Ok(self.dom().current_url.clone())
    }

    async fn query(&self, selector: &Selector) -> EnsayoResult<Option<ElementSnapshot>> {
        Ok(self.dom().resolve(selector).map(MockElement::snapshot))
    }

    async fn query_all(&self, selector: &Selector) -> EnsayoResult<Vec<ElementSnapshot>> {
        Ok(self
            .dom()
            .resolve(selector)
            .map(MockElement::snapshot)
            .into_iter()
            .collect())
    }

    async fn click(&self, selector: &Selector) -> EnsayoResult<()> {
        self.require(selector)?;
        self.dom().log(format!("click:{selector}"));
        self.run_effects(EffectTrigger::Click, selector);
        Ok(())
    }

    async fn type_text(&self, selector: &Selector, text: &str) -> EnsayoResult<()> {
        {
            let mut dom = self.dom();
            dom.log(format!("type:{selector}:{text}"));
            let Some(el) = dom.resolve_mut(selector) else {
                return Err(EnsayoError::LookupFailed {
                    selector: selector.to_string(),
                });
            };
            if el.attributes.contains_key("disabled") {
                return Err(EnsayoError::InputError {
                    selector: selector.to_string(),
                    message: "element is disabled".to_string(),
                });
            }
            el.value.push_str(text);
        }
        self.run_effects(EffectTrigger::Type, selector);
        Ok(())
    }

    async fn clear(&self, selector: &Selector) -> EnsayoResult<()> {
        let mut dom = self.dom();
        dom.log(format!("clear:{selector}"));
        let Some(el) = dom.resolve_mut(selector) else {
            return Err(EnsayoError::LookupFailed {
                selector: selector.to_string(),
            });
        };
        el.value.clear();
        Ok(())
    }

    async fn scroll_into_view(&self, selector: &Selector) -> EnsayoResult<()> {
        self.require(selector)?;
        self.dom().log(format!("scroll:{selector}"));
        Ok(())
    }

    async fn dispatch_event(&self, selector: &Selector, event: &str) -> EnsayoResult<()> {
        self.require(selector)?;
        self.dom().log(format!("event:{selector}:{event}"));
        Ok(())
    }

    async fn upload_file(
        &self,
        selector: &Selector,
        path: &Path,
        method: UploadMethod,
    ) -> EnsayoResult<()> {
        self.require(selector)?;
        self.dom().log(format!(
            "upload:{selector}:{}:{}",
            method.as_str(),
            path.display()
        ));
        self.run_effects(EffectTrigger::Upload, selector);
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> EnsayoResult<serde_json::Value> {
        let mut dom = self.dom();
        dom.log(format!("evaluate:{}", script.chars().take(40).collect::<String>()));
        Ok(dom.eval_results.pop_front().unwrap_or(serde_json::Value::Null))
    }

    async fn screenshot(&self) -> EnsayoResult<Vec<u8>> {
        self.dom().log("screenshot".to_string());
        // PNG magic bytes so artifact files look like what they claim to be
        Ok(vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod element_snapshot_tests {
        use super::*;

        #[test]
        fn test_new() {
            let snap = ElementSnapshot::new("button");
            assert_eq!(snap.tag_name, "button");
            assert!(snap.visible);
            assert!(snap.is_enabled());
        }

        #[test]
        fn test_disabled_detection() {
            let mut snap = ElementSnapshot::new("input");
            let _ = snap
                .attributes
                .insert("disabled".to_string(), "disabled".to_string());
            assert!(!snap.is_enabled());
            assert_eq!(snap.attribute("disabled"), Some("disabled"));
        }
    }

    mod mock_dom_tests {
        use super::*;

        #[test]
        fn test_insert_and_resolve() {
            let mut dom = MockDom::default();
            let sel = Selector::css("button#enableButton");
            dom.insert(&sel, MockElement::new("button").with_text("Enable"));
            assert!(dom.resolve(&sel).is_some());
        }

        #[test]
        fn test_css_with_text_fallback() {
            let mut dom = MockDom::default();
            let base = Selector::css("#content > p");
            dom.insert(&base, MockElement::new("p").with_text("Data loaded with AJAX get request."));

            let narrowed = base.clone().with_text("Data loaded");
            assert!(dom.resolve(&narrowed).is_some());

            let wrong = base.with_text("nope");
            assert!(dom.resolve(&wrong).is_none());
        }

        #[test]
        fn test_reveal_after() {
            let mut dom = MockDom::default();
            let sel = Selector::css("#late");
            dom.insert(&sel, MockElement::new("div").hidden());
            dom.reveal_after(&sel, Duration::from_millis(30));

            assert!(!dom.resolve(&sel).unwrap().currently_visible());
            std::thread::sleep(Duration::from_millis(50));
            assert!(dom.resolve(&sel).unwrap().currently_visible());
        }
    }

    mod mock_driver_tests {
        use super::*;

        #[tokio::test]
        async fn test_navigate_records_url() {
            let driver = MockDriver::new();
            driver.navigate("http://localhost/ajax").await.unwrap();
            assert_eq!(driver.current_url().await.unwrap(), "http://localhost/ajax");
            assert!(driver.was_called("navigate:"));
        }

        #[tokio::test]
        async fn test_click_missing_element_fails() {
            let driver = MockDriver::new();
            let err = driver.click(&Selector::css("#missing")).await.unwrap_err();
            assert!(matches!(err, EnsayoError::LookupFailed { .. }));
        }

        #[tokio::test]
        async fn test_click_effect_mutates_dom() {
            let driver = MockDriver::new();
            let button = Selector::css("button#enableButton");
            let input = Selector::css("input#inputField");
            driver.insert(&button, MockElement::new("button"));
            driver.insert(&input, MockElement::new("input").disabled());

            let input_for_effect = input.clone();
            driver.on_click(&button, move |dom| {
                dom.remove_attribute(&input_for_effect, "disabled");
            });

            driver.click(&button).await.unwrap();
            assert!(driver.query(&input).await.unwrap().unwrap().is_enabled());
        }

        #[tokio::test]
        async fn test_type_into_disabled_rejected() {
            let driver = MockDriver::new();
            let input = Selector::css("input#inputField");
            driver.insert(&input, MockElement::new("input").disabled());

            let err = driver.type_text(&input, "hello").await.unwrap_err();
            assert!(matches!(err, EnsayoError::InputError { .. }));
        }

        #[tokio::test]
        async fn test_type_appends_without_clearing() {
            let driver = MockDriver::new();
            let input = Selector::css("input");
            driver.insert(&input, MockElement::new("input").with_value("abc"));

            driver.type_text(&input, "def").await.unwrap();
            assert_eq!(driver.query(&input).await.unwrap().unwrap().value, "abcdef");

            driver.clear(&input).await.unwrap();
            assert!(driver.query(&input).await.unwrap().unwrap().value.is_empty());
        }

        #[tokio::test]
        async fn test_upload_logs_method_and_path() {
            let driver = MockDriver::new();
            let input = Selector::css("input#browse");
            driver.insert(&input, MockElement::new("input"));

            driver
                .upload_file(&input, Path::new("upload/sample.txt"), UploadMethod::DragDrop)
                .await
                .unwrap();
            assert!(driver.was_called("upload:input#browse:drag-drop:upload/sample.txt"));
        }

        #[tokio::test]
        async fn test_evaluate_scripted_results() {
            let driver = MockDriver::new();
            driver.push_eval_result(serde_json::json!(true));

            assert_eq!(driver.evaluate("1+1").await.unwrap(), serde_json::json!(true));
            assert_eq!(driver.evaluate("1+1").await.unwrap(), serde_json::Value::Null);
        }

        #[tokio::test]
        async fn test_screenshot_is_png_shaped() {
            let driver = MockDriver::new();
            let bytes = driver.screenshot().await.unwrap();
            assert_eq!(&bytes[..4], &[0x89, 0x50, 0x4E, 0x47]);
        }
    }
}
