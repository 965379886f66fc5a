//! Scroll bars page: a target button placed outside the initial viewport.

use crate::actions::Actions;
use crate::driver::Driver;
use crate::locator::Selector;
use crate::pages::Page;
use crate::result::EnsayoResult;

/// Page exercising scrolling an off-screen element into view.
pub struct ScrollBarsPage<D> {
    actions: Actions<D>,
    hiding_button: Selector,
}

impl<D: Driver> ScrollBarsPage<D> {
    /// Bind the page to a session.
    #[must_use]
    pub fn new(actions: Actions<D>) -> Self {
        Self {
            actions,
            hiding_button: Selector::css("button#hidingButton"),
        }
    }

    /// Scroll the target button into the viewport.
    ///
    /// Asserts existence only; callers click it separately when the
    /// scenario requires interaction.
    pub async fn reveal_hidden_button(&self) -> EnsayoResult<()> {
        self.actions.scroll_to(&self.hiding_button).await
    }

    /// Click the target button once it is in view.
    pub async fn click_hidden_button(&self) -> EnsayoResult<()> {
        self.actions.click(&self.hiding_button).await
    }
}

#[async_trait::async_trait]
impl<D: Driver> Page<D> for ScrollBarsPage<D> {
    fn path(&self) -> &'static str {
        "/scrollbars"
    }

    fn marker(&self) -> &Selector {
        &self.hiding_button
    }

    fn actions(&self) -> &Actions<D> {
        &self.actions
    }
}
