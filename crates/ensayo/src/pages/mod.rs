//! Page objects for the UI Testing Playground site.
//!
//! Each page owns its selector table privately and exposes semantic
//! operations composed from the shared action vocabulary. Scenarios talk
//! to pages, never to raw selectors; flows spanning several pages are
//! composed at the scenario layer, not here.

use async_trait::async_trait;

use crate::actions::Actions;
use crate::driver::Driver;
use crate::locator::Selector;
use crate::navigation::Navigate;
use crate::result::EnsayoResult;

mod ajax_data;
mod disabled_input;
mod file_upload;
mod home;
mod scroll_bars;

pub use ajax_data::AjaxDataPage;
pub use disabled_input::DisabledInputPage;
pub use file_upload::FileUploadPage;
pub use home::{HomePage, NAV_LINKS};
pub use scroll_bars::ScrollBarsPage;

/// Common shape of every page object.
///
/// A page declares its site path and a marker element that proves the
/// page rendered. `open` composes the two into the one way any page is
/// reached.
#[async_trait]
pub trait Page<D: Driver>: Send + Sync {
    /// Site path of the page, starting with `/`.
    fn path(&self) -> &'static str;

    /// Element whose visibility proves the page rendered.
    fn marker(&self) -> &Selector;

    /// The action vocabulary this page drives.
    fn actions(&self) -> &Actions<D>;

    /// Navigate to the page and wait for its marker to render.
    async fn open(&self) -> EnsayoResult<()> {
        let actions = self.actions();
        actions.navigate_to(self.path()).await?;
        actions
            .wait_for_visible(self.marker(), actions.config().timeouts.default_wait())
            .await
    }
}
