//! One-time suite environment setup.
//!
//! Two idempotent steps run at suite initialization: process-wide log
//! wiring, and a cosmetic style injection that keeps request/XHR noise
//! out of the interactive command log. Both are guarded so repeated
//! initialization is a no-op.

use std::sync::OnceLock;

use crate::driver::Driver;
use crate::result::EnsayoResult;

static LOGGING: OnceLock<()> = OnceLock::new();

/// Initialize process-wide tracing output.
///
/// Respects `RUST_LOG`; defaults to `info` for the suite. Safe to call
/// from every scenario entry point.
pub fn init_logging() {
    let _ = LOGGING.get_or_init(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    });
}

// Installs the style guarded by a presence check, so re-running the
// script in the same session changes nothing. Returns whether this call
// performed the installation.
const HIDE_REQUEST_NOISE_JS: &str = r"(() => {
  const head = window.top ? window.top.document.head : document.head;
  if (head.querySelector('[data-hide-request-noise]')) { return false; }
  const style = head.ownerDocument.createElement('style');
  style.innerHTML = '.command-name-request, .command-name-xhr { display: none }';
  style.setAttribute('data-hide-request-noise', '');
  head.appendChild(style);
  return true;
})()";

/// Hide request/XHR entries from the session's command log.
///
/// Returns `true` when this call installed the style and `false` when a
/// previous initialization already had.
pub async fn hide_request_noise<D: Driver>(driver: &D) -> EnsayoResult<bool> {
    let installed = driver.evaluate(HIDE_REQUEST_NOISE_JS).await?;
    Ok(installed.as_bool().unwrap_or(false))
}
