//! Disabled input page: a field that only accepts input after an
//! asynchronous enable completes, with a status line reporting progress.

use crate::actions::Actions;
use crate::driver::Driver;
use crate::locator::Selector;
use crate::pages::Page;
use crate::result::EnsayoResult;

/// Page exercising waits on element enablement.
pub struct DisabledInputPage<D> {
    actions: Actions<D>,
    input: Selector,
    enable_button: Selector,
    status: Selector,
}

impl<D: Driver> DisabledInputPage<D> {
    /// Bind the page to a session.
    #[must_use]
    pub fn new(actions: Actions<D>) -> Self {
        Self {
            actions,
            input: Selector::css("input#inputField"),
            enable_button: Selector::css("button#enableButton"),
            status: Selector::css("div#opstatus"),
        }
    }

    /// Click the enable trigger and wait for the field to accept input.
    pub async fn enable_input(&self) -> EnsayoResult<()> {
        self.actions.click(&self.enable_button).await?;
        self.actions.assert_enabled(&self.input).await
    }

    /// Type into the field and assert the status line settles on the
    /// exact expected text.
    ///
    /// Fails with an input error when the field is still disabled.
    pub async fn submit_text(&self, text: &str, expected_status: &str) -> EnsayoResult<()> {
        self.actions.type_text(&self.input, text).await?;
        self.actions
            .assert_text_equals(&self.status, expected_status)
            .await
    }

    /// The status line's current text.
    pub async fn status_text(&self) -> EnsayoResult<String> {
        self.actions.text(&self.status).await
    }
}

#[async_trait::async_trait]
impl<D: Driver> Page<D> for DisabledInputPage<D> {
    fn path(&self) -> &'static str {
        "/disabledinput"
    }

    fn marker(&self) -> &Selector {
        &self.enable_button
    }

    fn actions(&self) -> &Actions<D> {
        &self.actions
    }
}
