//! Rich-message embed builder.
//!
//! `EmbedBuilder` accumulates the fields of a chat embed and serializes to the
//! platform's embed JSON object. It never talks to the platform itself.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::RutilsError;

/// 24-bit RGB embed color, serialized as an integer.
///
/// Deserializing goes through [`Color::new`], so out-of-range input is masked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Color(u32);

impl Color {
    /// Teal-green used when no other color is configured
    pub const DEFAULT: Color = Color(0x00ce6c);

    /// Create from a packed `0xRRGGBB` value; bits above 24 are dropped.
    pub const fn new(rgb: u32) -> Self {
        Color(rgb & 0x00ff_ffff)
    }

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Packed `0xRRGGBB` value
    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::DEFAULT
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl FromStr for Color {
    type Err = RutilsError;

    /// Parse `#rrggbb`, `0xrrggbb` or bare `rrggbb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(RutilsError::InvalidColor {
                input: s.to_string(),
                message: "expected six hex digits".to_string(),
            });
        }

        u32::from_str_radix(hex, 16)
            .map(Color)
            .map_err(|e| RutilsError::InvalidColor {
                input: s.to_string(),
                message: e.to_string(),
            })
    }
}

impl From<u32> for Color {
    fn from(rgb: u32) -> Self {
        Color::new(rgb)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.value()
    }
}

/// Footer line shown under the embed body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// Author line shown above the embed title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// A name/value pair in the embed body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

/// Accumulates embed fields before the host application sends the message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedBuilder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

impl EmbedBuilder {
    /// Create an empty embed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Stamp the embed with the current UTC time.
    pub fn with_current_timestamp(self) -> Self {
        self.with_timestamp(Utc::now())
    }

    /// Set the footer; an empty icon URL leaves the footer without an icon.
    pub fn with_footer(mut self, text: impl Into<String>, icon_url: Option<&str>) -> Self {
        self.footer = Some(EmbedFooter {
            text: text.into(),
            icon_url: icon_url.filter(|url| !url.is_empty()).map(str::to_string),
        });
        self
    }

    pub fn with_author(mut self, author: EmbedAuthor) -> Self {
        self.author = Some(author);
        self
    }

    pub fn add_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_color_components() {
        let color = Color::from_rgb(0x12, 0x34, 0x56);
        assert_eq!(color.value(), 0x123456);
        assert_eq!((color.r(), color.g(), color.b()), (0x12, 0x34, 0x56));
        assert_eq!(Color::new(0xff00ce6c), Color::DEFAULT);
        assert_eq!(Color::default(), Color::DEFAULT);
    }

    #[test]
    fn test_color_parse_and_display() {
        assert_eq!("#00ce6c".parse::<Color>().unwrap(), Color::DEFAULT);
        assert_eq!("0x00CE6C".parse::<Color>().unwrap(), Color::DEFAULT);
        assert_eq!("00ce6c".parse::<Color>().unwrap(), Color::DEFAULT);
        assert_eq!(Color::DEFAULT.to_string(), "#00ce6c");
    }

    #[test]
    fn test_color_parse_errors() {
        assert!(matches!(
            "#fff".parse::<Color>(),
            Err(RutilsError::InvalidColor { .. })
        ));
        assert!(matches!(
            "#gggggg".parse::<Color>(),
            Err(RutilsError::InvalidColor { .. })
        ));
    }

    #[test]
    fn test_color_serde_masks_to_24_bits() {
        let color: Color = serde_json::from_str("4294967295").unwrap();
        assert_eq!(color.value(), 0x00ff_ffff);

        let color: Color = serde_json::from_str("52844").unwrap();
        assert_eq!(color, Color::DEFAULT);
        assert_eq!(serde_json::to_string(&color).unwrap(), "52844");
    }

    #[test]
    fn test_new_builder_is_empty() {
        let embed = EmbedBuilder::new();
        assert!(embed.color.is_none());
        assert!(embed.timestamp.is_none());
        assert!(embed.footer.is_none());
        assert_eq!(serde_json::to_value(&embed).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_builder_serializes_to_embed_shape() {
        let when = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let embed = EmbedBuilder::new()
            .with_title("Prices")
            .with_description("Daily summary")
            .with_color(Color::new(0x00ce6c))
            .with_timestamp(when)
            .with_footer("PriceBot", Some("https://cdn.example/avatar.png"))
            .add_field("Gold", "$1,234.50", true);

        let json = serde_json::to_value(&embed).unwrap();
        assert_eq!(json["title"], "Prices");
        assert_eq!(json["description"], "Daily summary");
        assert_eq!(json["color"], 0x00ce6c);
        assert_eq!(json["timestamp"], "2024-03-01T12:30:00Z");
        assert_eq!(json["footer"]["text"], "PriceBot");
        assert_eq!(json["footer"]["icon_url"], "https://cdn.example/avatar.png");
        assert_eq!(json["fields"][0]["name"], "Gold");
        assert_eq!(json["fields"][0]["inline"], true);
    }

    #[test]
    fn test_footer_without_icon() {
        let embed = EmbedBuilder::new().with_footer("bot", Some(""));
        let footer = embed.footer.unwrap();
        assert_eq!(footer.text, "bot");
        assert!(footer.icon_url.is_none());
    }

    #[test]
    fn test_current_timestamp_is_recent() {
        let before = Utc::now();
        let embed = EmbedBuilder::new().with_current_timestamp();
        let after = Utc::now();
        let stamped = embed.timestamp.unwrap();
        assert!(before <= stamped && stamped <= after);
    }
}
