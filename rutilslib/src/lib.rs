//! # rutilslib
//!
//! Small helpers for building chat bot applications.
//!
//! ## Overview
//!
//! The crate is two independent collections of pure functions:
//!
//! - **Text**: bordered plain-text tables, delimiter-respecting message chunking,
//!   currency strings with thousands grouping, first-letter capitalisation
//! - **Embed**: a rich-message embed builder plus a factory that pre-styles every
//!   builder it hands out (color, timestamp, footer)
//!
//! Nothing here performs I/O or keeps state between calls. Embed styling is an
//! explicit [`EmbedDefaults`] value owned by an [`EmbedFactory`].
//!
//! ## Example
//!
//! ```rust
//! use rutilslib::{format_currency, render_table, split_in_chunks, Column};
//!
//! struct Coin {
//!     name: &'static str,
//!     price: f64,
//! }
//!
//! let coins = [
//!     Coin { name: "Gold", price: 1234.5 },
//!     Coin { name: "Silver", price: 17.0 },
//! ];
//! let columns = [
//!     Column::new("Coin", |c: &Coin| c.name.to_string()),
//!     Column::new("Price", |c: &Coin| format_currency(c.price, Some("$"), None, "en-US")),
//! ];
//!
//! let table = render_table(&coins, &columns);
//! assert!(table.starts_with("| Coin   | Price     |\n"));
//!
//! assert_eq!(split_in_chunks("a b c", 3), "a b\nc");
//! ```

pub mod embed;
pub mod error;
pub mod text;

pub use embed::{
    Color, EmbedAuthor, EmbedBuilder, EmbedDefaults, EmbedFactory, EmbedField, EmbedFooter,
    Identity,
};
pub use error::RutilsError;
pub use text::{
    first_char_to_upper, format_currency, render_records, render_table, render_table_with_style,
    split_in_chunks, try_render_table, Chunker, Column, CurrencyFormat, Table, TableRecord,
    TableStyle,
};

/// Result type for rutilslib operations
pub type Result<T> = std::result::Result<T, RutilsError>;
