//! Test actions — recording `ExternalActions` implementation for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use greenroom_core::actions::ExternalActions;

/// A single recorded outbound side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalCall {
    /// An external link was opened with the given URL.
    Link(String),
    /// The share composer was opened with the given prefilled text.
    ShareComposer(String),
    /// The user was redirected to the given destination.
    Redirect(String),
}

/// An `ExternalActions` implementation that records every call instead of
/// performing it. Tests assert on the recorded sequence.
#[derive(Debug, Default)]
pub struct RecordingActions {
    calls: Mutex<Vec<ExternalCall>>,
}

impl RecordingActions {
    /// Create a new recorder with no calls.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all recorded calls, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<ExternalCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns how many redirects were recorded.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn redirect_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| matches!(call, ExternalCall::Redirect(_)))
            .count()
    }

    fn record(&self, call: ExternalCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ExternalActions for RecordingActions {
    async fn open_link(&self, url: &str) {
        self.record(ExternalCall::Link(url.to_owned()));
    }

    async fn open_share_composer(&self, text: &str) {
        self.record(ExternalCall::ShareComposer(text.to_owned()));
    }

    async fn redirect(&self, url: &str) {
        self.record(ExternalCall::Redirect(url.to_owned()));
    }
}
