//! Chat embeds with default styling.
//!
//! - **builder**: [`EmbedBuilder`] and its value types, serializable to the
//!   platform's embed JSON
//! - **factory**: [`EmbedFactory`], which applies [`EmbedDefaults`] (color,
//!   timestamp, identity footer) to each builder it creates
//!
//! ## Example
//!
//! ```rust
//! use rutilslib::{EmbedDefaults, EmbedFactory, Identity};
//!
//! let factory = EmbedFactory::new(EmbedDefaults::new().with_timestamp(false));
//! let bot = Identity::new("PriceBot", "https://cdn.example/avatar.png");
//!
//! let embed = factory.create_builder(Some(&bot)).with_title("Prices");
//! assert_eq!(embed.footer.unwrap().text, "PriceBot");
//! assert!(embed.timestamp.is_none());
//! ```

pub mod builder;
pub mod factory;

pub use builder::{Color, EmbedAuthor, EmbedBuilder, EmbedField, EmbedFooter};
pub use factory::{EmbedDefaults, EmbedFactory, Identity};
