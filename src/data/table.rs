//! Column and table types shared by the loader and the viewport.

use unicode_width::UnicodeWidthStr;

/// Upper bound on a column's width in terminal cells.
pub const MAX_COLUMN_WIDTH: usize = 999;

/// A table row: the index cell followed by one string per column.
///
/// Rows may be shorter than the column list; missing trailing cells are empty.
pub type Row = Vec<String>;

/// A column header and the number of terminal cells reserved for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub title: String,
    /// Always `<= MAX_COLUMN_WIDTH`.
    pub width: usize,
}

impl Column {
    /// Create a column sized to its title, capped at [`MAX_COLUMN_WIDTH`].
    pub fn from_title(title: impl Into<String>) -> Self {
        let title = title.into();
        let width = display_width(&title).min(MAX_COLUMN_WIDTH);
        Self { title, width }
    }

    /// Grow the width to fit `value`, capped at [`MAX_COLUMN_WIDTH`].
    pub fn fit(&mut self, value: &str) {
        self.width = self.width.max(display_width(value)).min(MAX_COLUMN_WIDTH);
    }
}

/// Columns and rows of one sheet, ready for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetTable {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl SheetTable {
    /// Number of columns, including the index column.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Width of `s` in terminal cells.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}
