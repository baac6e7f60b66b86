//! One-time startup notice.

use std::sync::Once;

static NOTICE: Once = Once::new();

/// Log the adapter name, version and API base URL, once per process.
///
/// Later calls are no-ops, whatever `base_url` they pass.
pub fn log_startup_notice(base_url: &str) {
    NOTICE.call_once(|| {
        tracing::info!(
            adapter = env!("CARGO_PKG_NAME"),
            version = env!("CARGO_PKG_VERSION"),
            base_url,
            "Deno Deploy adapter ready"
        );
    });
}

/// Whether the notice has been logged in this process.
pub fn notice_logged() -> bool {
    NOTICE.is_completed()
}
