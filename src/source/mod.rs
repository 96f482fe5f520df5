//! Tabular data sources for the sheet loader.
//!
//! A source exposes an ordered list of sheet names and, per sheet, a lazy
//! stream of rows (the first row being the header). Reading is one-shot and
//! in order; every error is fatal to the load.

mod error;
mod memory;
mod numfmt;
mod xlsx;

pub use error::{Result, SourceError};
pub use memory::MemorySource;
pub use xlsx::XlsxSource;

use std::fmt::Debug;

/// A lazily produced sequence of raw rows.
pub type RowIter<'a> = Box<dyn Iterator<Item = Result<Vec<String>>> + 'a>;

/// Trait for reading sheets from a tabular file.
///
/// # Example
///
/// ```
/// use sheetview::{MemorySource, TabularSource};
///
/// let mut source = MemorySource::new("people.xlsx")
///     .with_sheet("People", vec![vec!["Name", "Age"], vec!["Ann", "9"]]);
/// assert_eq!(source.sheet_names(), ["People".to_string()]);
///
/// let rows: Vec<_> = source.rows("People").unwrap().collect();
/// assert_eq!(rows.len(), 2);
/// ```
pub trait TabularSource: Debug {
    /// Ordered sheet names.
    fn sheet_names(&self) -> &[String];

    /// Stream the rows of one sheet, header first.
    ///
    /// Returns [`SourceError::UnknownSheet`] if no sheet has that name.
    fn rows(&mut self, sheet: &str) -> Result<RowIter<'_>>;

    /// Returns a human-readable description of the source.
    ///
    /// Shown in the footer of the viewer.
    fn description(&self) -> &str;
}
