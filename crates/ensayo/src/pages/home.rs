//! Landing page with the scenario navigation grid.

use crate::actions::Actions;
use crate::driver::Driver;
use crate::locator::Selector;
use crate::pages::Page;
use crate::result::EnsayoResult;

/// Site paths of every scenario link on the landing page.
pub const NAV_LINKS: [&str; 25] = [
    "/home",
    "/resources",
    "/dynamicid",
    "/classattr",
    "/hiddenlayers",
    "/loaddelay",
    "/ajax",
    "/clientdelay",
    "/click",
    "/textinput",
    "/scrollbars",
    "/dynamictable",
    "/verifytext",
    "/progressbar",
    "/visibility",
    "/sampleapp",
    "/mouseover",
    "/nbsp",
    "/overlapped",
    "/shadowdom",
    "/alerts",
    "/upload",
    "/animation",
    "/disabledinput",
    "/autowait",
];

/// The landing page.
pub struct HomePage<D> {
    actions: Actions<D>,
    header: Selector,
    image: Selector,
}

impl<D: Driver> HomePage<D> {
    /// Bind the page to a session.
    #[must_use]
    pub fn new(actions: Actions<D>) -> Self {
        Self {
            actions,
            header: Selector::css("h1, h2, h3").with_text("UI Test Automation"),
            image: Selector::css(r#"img[alt="Responsive image"]"#),
        }
    }

    fn nav_link(href: &str) -> Selector {
        Selector::css(format!(r#"a[href="{href}"]"#))
    }

    /// Assert the header, hero image, and every scenario link rendered.
    pub async fn verify_displayed(&self) -> EnsayoResult<()> {
        let timeout = self.actions.config().timeouts.default_wait();
        self.actions.wait_for_visible(&self.header, timeout).await?;
        self.actions.wait_for_visible(&self.image, timeout).await?;
        for href in NAV_LINKS {
            self.actions
                .wait_for_visible(&Self::nav_link(href), timeout)
                .await?;
        }
        Ok(())
    }

    /// Follow one scenario link by its site path.
    pub async fn click_nav_link(&self, href: &str) -> EnsayoResult<()> {
        self.actions.click(&Self::nav_link(href)).await
    }

    /// Follow the `/home` link.
    pub async fn click_home_link(&self) -> EnsayoResult<()> {
        self.click_nav_link("/home").await
    }

    /// Assert the `/home` link exists and is labelled Home.
    pub async fn verify_home_link(&self) -> EnsayoResult<()> {
        let link = Self::nav_link("/home");
        self.actions.assert_exists(&link).await?;
        self.actions.assert_contains_text(&link, "Home").await
    }
}

#[async_trait::async_trait]
impl<D: Driver> Page<D> for HomePage<D> {
    fn path(&self) -> &'static str {
        "/home"
    }

    fn marker(&self) -> &Selector {
        &self.header
    }

    fn actions(&self) -> &Actions<D> {
        &self.actions
    }
}
