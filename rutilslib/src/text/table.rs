//! Bordered plain-text tables.
//!
//! A table is described by an ordered list of [`Column`]s, each pairing a title
//! with a selector that turns a record into the cell text. Rendering is a pure
//! function of the records, the columns and a [`TableStyle`]:
//!
//! ```text
//! | Name  | Age |
//! |-------------|
//! | Alice | 30  |
//! |-------------|
//! | Bob   | 7   |
//! |-------------|
//! ```
//!
//! Every column is as wide as its longest title or cell, measured in chars.
//! Cells are right-padded and never truncated.

use std::convert::Infallible;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Characters used to draw a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStyle {
    /// Outer borders and column separators
    pub vertical: char,
    /// Divider lines between rows
    pub horizontal: char,
    /// Cell padding, also used to right-pad cells to the column width
    pub padding: char,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            vertical: '|',
            horizontal: '-',
            padding: ' ',
        }
    }
}

impl TableStyle {
    /// Create the default `|` / `-` / space style
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the vertical separator
    pub fn with_vertical(mut self, vertical: char) -> Self {
        self.vertical = vertical;
        self
    }

    /// Builder: set the horizontal separator
    pub fn with_horizontal(mut self, horizontal: char) -> Self {
        self.horizontal = horizontal;
        self
    }

    /// Builder: set the padding character
    pub fn with_padding(mut self, padding: char) -> Self {
        self.padding = padding;
        self
    }
}

/// A titled column with a selector producing the cell text for a record.
///
/// `E` is the selector's error type. Columns built with [`Column::new`] cannot
/// fail; use [`Column::try_new`] when producing a cell may error, and render
/// with [`Table::try_render`] or [`try_render_table`].
pub struct Column<'a, T, E = Infallible> {
    title: String,
    select: Box<dyn Fn(&T) -> Result<String, E> + 'a>,
}

impl<'a, T> Column<'a, T> {
    /// Create a column whose selector always succeeds.
    pub fn new<F>(title: impl Into<String>, select: F) -> Self
    where
        F: Fn(&T) -> String + 'a,
    {
        Self {
            title: title.into(),
            select: Box::new(move |record: &T| Ok(select(record))),
        }
    }
}

impl<'a, T, E> Column<'a, T, E> {
    /// Create a column whose selector may fail.
    pub fn try_new<F>(title: impl Into<String>, select: F) -> Self
    where
        F: Fn(&T) -> Result<String, E> + 'a,
    {
        Self {
            title: title.into(),
            select: Box::new(select),
        }
    }

    /// Column title shown in the header row
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Apply the selector to a record.
    pub fn select(&self, record: &T) -> Result<String, E> {
        (self.select)(record)
    }
}

impl<T, E> fmt::Debug for Column<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Types that know how to present themselves as table rows.
///
/// ```rust
/// use rutilslib::{render_records, Column, TableRecord};
///
/// struct Player {
///     name: String,
///     score: u32,
/// }
///
/// impl TableRecord for Player {
///     fn columns<'a>() -> Vec<Column<'a, Self>> {
///         vec![
///             Column::new("Player", |p: &Player| p.name.clone()),
///             Column::new("Score", |p: &Player| p.score.to_string()),
///         ]
///     }
/// }
///
/// let players = [Player { name: "ann".into(), score: 12 }];
/// assert!(render_records(&players).contains("| ann    | 12    |"));
/// ```
pub trait TableRecord: Sized {
    /// Ordered columns used to render a slice of `Self`.
    fn columns<'a>() -> Vec<Column<'a, Self>>;
}

/// A set of columns plus a style, reusable across renders.
#[derive(Debug)]
pub struct Table<'a, T, E = Infallible> {
    columns: Vec<Column<'a, T, E>>,
    style: TableStyle,
}

impl<'a, T, E> Table<'a, T, E> {
    /// Create a table with the default style.
    pub fn new(columns: Vec<Column<'a, T, E>>) -> Self {
        Self {
            columns,
            style: TableStyle::default(),
        }
    }

    /// Builder: set the drawing style
    pub fn style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    /// Builder: append a column
    pub fn column(mut self, column: Column<'a, T, E>) -> Self {
        self.columns.push(column);
        self
    }

    /// Columns in rendering order
    pub fn columns(&self) -> &[Column<'a, T, E>] {
        &self.columns
    }

    /// Render the records, aborting on the first selector error.
    pub fn try_render(&self, records: &[T]) -> Result<String, E> {
        try_render_table(records, &self.columns, self.style)
    }
}

impl<T> Table<'_, T> {
    /// Render the records.
    pub fn render(&self, records: &[T]) -> String {
        into_ok(self.try_render(records))
    }
}

/// Render records with the default `|` / `-` / space style.
pub fn render_table<T>(records: &[T], columns: &[Column<'_, T>]) -> String {
    render_table_with_style(records, columns, TableStyle::default())
}

/// Render records with an explicit style.
pub fn render_table_with_style<T>(
    records: &[T],
    columns: &[Column<'_, T>],
    style: TableStyle,
) -> String {
    into_ok(try_render_table(records, columns, style))
}

/// Render a slice of a [`TableRecord`] type with its own columns.
pub fn render_records<T: TableRecord>(records: &[T]) -> String {
    render_table(records, &T::columns())
}

/// Render records, propagating the first selector error unchanged.
///
/// Selectors run record by record, left to right. No output is produced when
/// any of them fails.
pub fn try_render_table<T, E>(
    records: &[T],
    columns: &[Column<'_, T, E>],
    style: TableStyle,
) -> Result<String, E> {
    debug!(
        columns = columns.len(),
        rows = records.len(),
        "rendering table"
    );

    // cells[column][row]
    let mut cells: Vec<Vec<String>> = columns
        .iter()
        .map(|_| Vec::with_capacity(records.len()))
        .collect();
    for record in records {
        for (column, column_cells) in columns.iter().zip(cells.iter_mut()) {
            column_cells.push(column.select(record)?);
        }
    }

    let widths: Vec<usize> = columns
        .iter()
        .zip(&cells)
        .map(|(column, column_cells)| {
            column_cells
                .iter()
                .map(|cell| text_len(cell))
                .fold(text_len(&column.title), usize::max)
        })
        .collect();
    trace!(?widths, "resolved column widths");

    let divider = divider_line(&widths, style);

    let mut table = render_line(columns.iter().map(|c| c.title.as_str()), &widths, style);
    table.push_str(&divider);

    for row in 0..records.len() {
        table.push_str(&render_line(
            cells.iter().map(|column_cells| column_cells[row].as_str()),
            &widths,
            style,
        ));
        table.push_str(&divider);
    }

    Ok(table)
}

/// Full-width divider: one fill char per content char, plus two padding chars
/// and one separator per column, minus the final separator.
fn divider_line(widths: &[usize], style: TableStyle) -> String {
    let fill = (widths.iter().sum::<usize>() + 3 * widths.len()).saturating_sub(1);
    let mut line = String::with_capacity(fill + 3);
    line.push(style.vertical);
    line.extend(std::iter::repeat(style.horizontal).take(fill));
    line.push(style.vertical);
    line.push('\n');
    line
}

fn render_line<'s>(
    cells: impl Iterator<Item = &'s str>,
    widths: &[usize],
    style: TableStyle,
) -> String {
    let separator: String = [style.padding, style.vertical, style.padding]
        .iter()
        .collect();
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| pad_right(cell, width, style.padding))
        .collect();

    let mut line = String::new();
    line.push(style.vertical);
    line.push(style.padding);
    line.push_str(&padded.join(&separator));
    line.push(style.padding);
    line.push(style.vertical);
    line.push('\n');
    line
}

fn pad_right(cell: &str, width: usize, padding: char) -> String {
    let mut padded = String::from(cell);
    padded.extend(std::iter::repeat(padding).take(width.saturating_sub(text_len(cell))));
    padded
}

fn text_len(text: &str) -> usize {
    text.chars().count()
}

fn into_ok<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
