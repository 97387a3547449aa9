//! Console implementation of the external-action port.

use async_trait::async_trait;

use greenroom_core::actions::ExternalActions;

/// Performs outbound navigation by announcing it on stdout. A terminal
/// cannot open a browser tab on the user's behalf, so each action prints
/// the destination it would have opened.
pub struct ConsoleActions;

#[async_trait]
impl ExternalActions for ConsoleActions {
    async fn open_link(&self, url: &str) {
        println!("-> opening {url}");
    }

    async fn open_share_composer(&self, text: &str) {
        println!("-> opening share composer: {text}");
    }

    async fn redirect(&self, url: &str) {
        println!("-> redirecting to {url}");
    }
}
