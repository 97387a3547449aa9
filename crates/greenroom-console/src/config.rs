//! Console configuration from the environment.

use greenroom_session::config::SessionConfig;

/// Console settings resolved from the environment.
///
/// Every variable is optional. `GREENROOM_SCRIPT_PATH` points at a JSON
/// script to replay instead of the bundled sample; `GREENROOM_JOIN_URL`,
/// `GREENROOM_SHARE_TEXT`, and `GREENROOM_REDIRECT_URL` override the
/// default destinations; `GREENROOM_SEED` pins the pacing randomness for
/// reproducible replays.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Path to a JSON script, when one was supplied.
    pub script_path: Option<String>,
    /// Fixed pacing seed, when one was supplied.
    pub seed: Option<u64>,
    /// Session configuration with destination overrides applied.
    pub session: SessionConfig,
}

impl ConsoleConfig {
    /// Reads configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error message if `GREENROOM_SEED` is set but does not
    /// parse as an integer.
    pub fn from_env() -> Result<Self, String> {
        let mut session = SessionConfig::default();
        if let Ok(url) = std::env::var("GREENROOM_JOIN_URL") {
            session.destinations.join_url = url;
        }
        if let Ok(text) = std::env::var("GREENROOM_SHARE_TEXT") {
            session.destinations.share_text = text;
        }
        if let Ok(url) = std::env::var("GREENROOM_REDIRECT_URL") {
            session.destinations.redirect_url = url;
        }

        let seed = match std::env::var("GREENROOM_SEED") {
            Ok(raw) => Some(
                raw.parse::<u64>()
                    .map_err(|e| format!("GREENROOM_SEED must be a valid u64: {e}"))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            script_path: std::env::var("GREENROOM_SCRIPT_PATH").ok(),
            seed,
            session,
        })
    }
}
