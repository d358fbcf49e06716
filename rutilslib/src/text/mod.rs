//! Text helpers: tables, chunking, currency and capitalisation.
//!
//! Every function in this module is pure:
//!
//! - **table**: render records as a bordered, aligned plain-text table
//! - **chunk**: split long text into delimiter-respecting bounded chunks
//! - **currency**: format amounts with en-US thousands grouping
//! - **case**: uppercase the first character of a string

pub mod case;
pub mod chunk;
pub mod currency;
pub mod table;

pub use case::first_char_to_upper;
pub use chunk::{split_in_chunks, Chunker};
pub use currency::{format_currency, CurrencyFormat};
pub use table::{
    render_records, render_table, render_table_with_style, try_render_table, Column, Table,
    TableRecord, TableStyle,
};
