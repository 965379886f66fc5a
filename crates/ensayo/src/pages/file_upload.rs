//! File upload page: an input accepting attachments by drag-drop or the
//! file chooser, with a success banner naming the uploaded file.

use std::path::Path;

use crate::actions::Actions;
use crate::driver::{Driver, UploadMethod};
use crate::locator::Selector;
use crate::pages::Page;
use crate::result::EnsayoResult;

/// Page exercising both upload entry points.
pub struct FileUploadPage<D> {
    actions: Actions<D>,
    input: Selector,
    browse_label: Selector,
    success_banner: Selector,
}

impl<D: Driver> FileUploadPage<D> {
    /// Bind the page to a session.
    #[must_use]
    pub fn new(actions: Actions<D>) -> Self {
        Self {
            actions,
            input: Selector::css("input#browse"),
            browse_label: Selector::css("label.browse-btn"),
            success_banner: Selector::css(".success-file"),
        }
    }

    async fn upload_and_verify(
        &self,
        path: &Path,
        method: UploadMethod,
        expected: &str,
    ) -> EnsayoResult<()> {
        self.actions.assert_visible(&self.browse_label).await?;
        self.actions.upload_file(&self.input, path, method).await?;
        self.actions
            .wait_for_visible(
                &self.success_banner,
                self.actions.config().timeouts.default_wait(),
            )
            .await?;
        self.actions
            .assert_contains_text(&self.success_banner, expected)
            .await
    }

    /// Attach a file by simulated drag-drop and assert the banner names it.
    pub async fn upload_by_drag_drop(&self, path: &Path, expected: &str) -> EnsayoResult<()> {
        self.upload_and_verify(path, UploadMethod::DragDrop, expected)
            .await
    }

    /// Attach a file through the file chooser and assert the banner names it.
    pub async fn upload_by_file_chooser(&self, path: &Path, expected: &str) -> EnsayoResult<()> {
        self.upload_and_verify(path, UploadMethod::FileChooser, expected)
            .await
    }
}

#[async_trait::async_trait]
impl<D: Driver> Page<D> for FileUploadPage<D> {
    fn path(&self) -> &'static str {
        "/upload"
    }

    fn marker(&self) -> &Selector {
        &self.browse_label
    }

    fn actions(&self) -> &Actions<D> {
        &self.actions
    }
}
