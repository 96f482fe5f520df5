//! Sheet tables and the loader that builds them.
//!
//! ## Submodules
//!
//! - [`table`]: Display-ready table types ([`SheetTable`], [`Column`])
//! - [`loader`]: Converts a source's streamed rows into [`SheetTable`]s
//!
//! ## Data Flow
//!
//! ```text
//! TabularSource::rows() (header + raw rows)
//!        │
//!        ▼
//! load_sheet()
//!        │
//!        ├──▶ Column widths (header-derived, grown per cell unless in performance mode)
//!        │
//!        └──▶ Rows (prefixed with a zero-based index cell)
//! ```

pub mod loader;
pub mod table;

pub use loader::{load_sheet, load_workbook, LoadOptions, Sheet, Workbook};
pub use table::{display_width, Column, Row, SheetTable, MAX_COLUMN_WIDTH};
