//! In-memory tabular source.

use super::{Result, RowIter, SourceError, TabularSource};

/// A source backed by rows already held in memory.
///
/// Useful for library consumers that produce their own data, and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    description: String,
    names: Vec<String>,
    sheets: Vec<Vec<Vec<String>>>,
}

impl MemorySource {
    /// Create an empty source with the given description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            names: Vec::new(),
            sheets: Vec::new(),
        }
    }

    /// Append a sheet. The first row is the header.
    pub fn with_sheet<R, C>(mut self, name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        self.names.push(name.into());
        self.sheets.push(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        );
        self
    }
}

impl TabularSource for MemorySource {
    fn sheet_names(&self) -> &[String] {
        &self.names
    }

    fn rows(&mut self, sheet: &str) -> Result<RowIter<'_>> {
        let index = self
            .names
            .iter()
            .position(|name| name == sheet)
            .ok_or_else(|| SourceError::UnknownSheet(sheet.to_string()))?;
        Ok(Box::new(self.sheets[index].iter().cloned().map(Ok)))
    }

    fn description(&self) -> &str {
        &self.description
    }
}
