//! Pre-styled embed builders.
//!
//! An [`EmbedFactory`] owns an immutable [`EmbedDefaults`] value and applies it
//! to every builder it creates. Hosts that want different styling create a
//! second factory rather than mutating shared settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::builder::{Color, EmbedBuilder};

/// Styling applied to every new embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedDefaults {
    /// Color set on every embed
    pub color: Color,
    /// Stamp embeds with the creation time
    pub timestamp: bool,
    /// Add a footer with the bot's identity, when one is given
    pub footer: bool,
}

impl Default for EmbedDefaults {
    fn default() -> Self {
        Self {
            color: Color::DEFAULT,
            timestamp: true,
            footer: true,
        }
    }
}

impl EmbedDefaults {
    /// Teal-green color, timestamp and footer on
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the color
    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    /// Builder: enable or disable the timestamp
    pub fn with_timestamp(mut self, timestamp: bool) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Builder: enable or disable the identity footer
    pub fn with_footer(mut self, footer: bool) -> Self {
        self.footer = footer;
        self
    }
}

/// The bot account shown in embed footers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub display_name: String,
    pub avatar_url: String,
}

impl Identity {
    pub fn new(display_name: impl Into<String>, avatar_url: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            avatar_url: avatar_url.into(),
        }
    }
}

/// Hands out embed builders with the configured defaults applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmbedFactory {
    defaults: EmbedDefaults,
}

impl EmbedFactory {
    pub fn new(defaults: EmbedDefaults) -> Self {
        Self { defaults }
    }

    /// Styling applied by this factory
    pub fn defaults(&self) -> EmbedDefaults {
        self.defaults
    }

    /// Create a builder stamped with the current time.
    ///
    /// The footer is only set when an identity is given and footers are enabled.
    pub fn create_builder(&self, identity: Option<&Identity>) -> EmbedBuilder {
        self.create_builder_at(identity, Utc::now())
    }

    /// Create a builder, using `now` as the timestamp when timestamps are enabled.
    pub fn create_builder_at(
        &self,
        identity: Option<&Identity>,
        now: DateTime<Utc>,
    ) -> EmbedBuilder {
        let mut embed = EmbedBuilder::new().with_color(self.defaults.color);

        if self.defaults.timestamp {
            embed = embed.with_timestamp(now);
        }

        if let Some(identity) = identity.filter(|_| self.defaults.footer) {
            embed = embed.with_footer(
                identity.display_name.as_str(),
                Some(identity.avatar_url.as_str()),
            );
        }

        trace!(
            color = %self.defaults.color,
            timestamp = embed.timestamp.is_some(),
            footer = embed.footer.is_some(),
            "created embed builder"
        );
        embed
    }
}
