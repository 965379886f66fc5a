//! AJAX data page: a trigger button whose response renders ~15s later.

use crate::actions::Actions;
use crate::driver::Driver;
use crate::locator::Selector;
use crate::pages::Page;
use crate::result::EnsayoResult;

const LOADED_TEXT: &str = "Data loaded with AJAX get request.";

/// Page exercising waits on network-delayed content.
pub struct AjaxDataPage<D> {
    actions: Actions<D>,
    trigger: Selector,
    loaded_content: Selector,
}

impl<D: Driver> AjaxDataPage<D> {
    /// Bind the page to a session.
    #[must_use]
    pub fn new(actions: Actions<D>) -> Self {
        Self {
            actions,
            trigger: Selector::css("button#ajaxButton"),
            loaded_content: Selector::css("#content > p").with_text(LOADED_TEXT),
        }
    }

    /// Start the delayed request.
    pub async fn click_ajax_trigger(&self) -> EnsayoResult<()> {
        self.actions.click(&self.trigger).await
    }

    /// Wait for the response paragraph within the extended timeout and
    /// assert its text. Returns as soon as the paragraph renders.
    pub async fn verify_data_loaded(&self) -> EnsayoResult<()> {
        self.actions
            .wait_for_visible(
                &self.loaded_content,
                self.actions.config().timeouts.extended(),
            )
            .await?;
        self.actions
            .assert_contains_text(&self.loaded_content, LOADED_TEXT)
            .await
    }
}

#[async_trait::async_trait]
impl<D: Driver> Page<D> for AjaxDataPage<D> {
    fn path(&self) -> &'static str {
        "/ajax"
    }

    fn marker(&self) -> &Selector {
        &self.trigger
    }

    fn actions(&self) -> &Actions<D> {
        &self.actions
    }
}
