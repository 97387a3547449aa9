//! External-action port.
//!
//! Side effects that leave the process (opening links, the share
//! composer, the terminal redirect) sit behind this port so the core
//! stays presentation-free and tests can record calls instead of
//! performing them.

use async_trait::async_trait;

/// Outbound side effects requested of the presentation layer.
#[async_trait]
pub trait ExternalActions: Send + Sync {
    /// Opens an external link (the join destination, also used by the
    /// generic-tap promotion).
    async fn open_link(&self, url: &str);

    /// Opens the external share composer prefilled with `text`.
    async fn open_share_composer(&self, text: &str);

    /// Navigates the user to `url`, leaving the funnel for good.
    async fn redirect(&self, url: &str);
}
