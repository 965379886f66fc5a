//! Cross-cutting navigation helper.
//!
//! Kept as an extension of the action vocabulary rather than a page
//! method: every page opens the same way, by resolving its path against
//! the configured base URL and verifying the session settled on it.

use async_trait::async_trait;

use crate::actions::Actions;
use crate::driver::Driver;
use crate::result::{EnsayoError, EnsayoResult};

/// Verified navigation against the suite base URL.
#[async_trait]
pub trait Navigate {
    /// Navigate to a site path and assert the settled URL contains it.
    ///
    /// Fails with a navigation error when the target is unreachable and
    /// with an assertion error when the URL does not contain `path`
    /// after the navigation settles. Repeating the call yields the same
    /// outcome.
    async fn navigate_to(&self, path: &str) -> EnsayoResult<()>;
}

#[async_trait]
impl<D: Driver> Navigate for Actions<D> {
    async fn navigate_to(&self, path: &str) -> EnsayoResult<()> {
        let url = self.config().join_url(path);
        tracing::info!(%url, "navigate");
        self.driver()
            .navigate(&url)
            .await
            .map_err(|e| EnsayoError::NavigationError {
                url: url.clone(),
                message: e.to_string(),
            })?;
        self.assert_url_contains(path).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::SuiteConfig;
    use crate::driver::MockDriver;
    use std::sync::Arc;

    fn local_actions() -> Actions<MockDriver> {
        let config = SuiteConfig::default().with_base_url("http://localhost:8080");
        Actions::new(Arc::new(MockDriver::new()), config)
    }

    #[tokio::test]
    async fn test_navigate_resolves_against_base() {
        let actions = local_actions();
        actions.navigate_to("/ajax").await.unwrap();
        assert_eq!(
            actions.url().await.unwrap(),
            "http://localhost:8080/ajax"
        );
    }

    #[tokio::test]
    async fn test_navigate_is_idempotent() {
        let actions = local_actions();
        actions.navigate_to("/upload").await.unwrap();
        let first = actions.url().await.unwrap();
        actions.navigate_to("/upload").await.unwrap();
        assert_eq!(actions.url().await.unwrap(), first);
    }
}
