//! Session configuration.

use std::time::Duration;

use greenroom_replay::application::driver::ReplayPacing;

/// Destinations for outbound navigation.
#[derive(Debug, Clone)]
pub struct Destinations {
    /// Opened when the user accepts the join call-to-action; also used by
    /// the generic tap promotion.
    pub join_url: String,
    /// Prefilled into the share composer.
    pub share_text: String,
    /// Terminal destination once the share quota is reached.
    pub redirect_url: String,
}

impl Default for Destinations {
    fn default() -> Self {
        Self {
            join_url: "https://greenroom.example/join".to_owned(),
            share_text: "You're invited to the Greenroom launch. Don't miss out: \
                         https://greenroom.example/invite"
                .to_owned(),
            redirect_url: "https://greenroom.example/channel".to_owned(),
        }
    }
}

/// Configuration for one funnel session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Pacing bounds for the conversation replay.
    pub pacing: ReplayPacing,
    /// How long after start the join call-to-action is revealed.
    pub reveal_delay: Duration,
    /// Shares required before the terminal redirect fires.
    pub share_quota: u32,
    /// Outbound navigation destinations.
    pub destinations: Destinations,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pacing: ReplayPacing::default(),
            reveal_delay: Duration::from_millis(8000),
            share_quota: 5,
            destinations: Destinations::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_the_funnel_tuning() {
        let config = SessionConfig::default();

        assert_eq!(config.reveal_delay, Duration::from_millis(8000));
        assert_eq!(config.share_quota, 5);
        assert_eq!(
            config.pacing.initial_delay,
            Duration::from_millis(1000)
        );
        assert!(!config.destinations.join_url.is_empty());
        assert!(!config.destinations.redirect_url.is_empty());
    }
}
