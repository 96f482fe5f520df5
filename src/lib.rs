//! # sheetview
//!
//! A terminal viewer for multi-sheet spreadsheet files.
//!
//! Every sheet of a workbook is loaded up front into a display-ready table
//! (column widths measured, rows prefixed with an index). The viewer then
//! pages between sheets, scrolls columns and moves a row cursor, entirely
//! from the keyboard.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐  │
//! │  │ source  │───▶│   data   │───▶│   app   │───▶│    ui    │  │
//! │  │ (input) │    │ (loader) │    │ (state) │    │(rendering│  │
//! │  └─────────┘    └──────────┘    └────▲────┘    └──────────┘  │
//! │       ▲                              │                       │
//! │  XlsxSource | MemorySource      events (keys, resize)        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: The [`TabularSource`] trait and its `.xlsx` reader
//! - **[`data`]**: Sheet loading and column width measurement
//! - **[`app`]**: The viewport state machine ([`App::apply`])
//! - **[`pager`]** / **[`sheet_view`]**: Sheet paging and per-sheet row navigation
//! - **[`events`]**: Terminal events to [`Action`]s
//! - **[`ui`]**: Rendering with ratatui, theme and message catalog
//! - **[`config`]** / **[`logging`]**: Settings layering and log capture
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! sheetview report.xlsx
//!
//! # Header-only column widths, debug logs printed after exit
//! sheetview --performance --debug report.xlsx
//! ```
//!
//! ### As a library
//!
//! ```
//! use sheetview::{load_workbook, Action, App, Catalog, LoadOptions, MemorySource, Theme};
//!
//! let mut source = MemorySource::new("people.xlsx")
//!     .with_sheet("People", vec![vec!["Name", "Age"], vec!["Ann", "9"]]);
//! let workbook = load_workbook(&mut source, &LoadOptions::default()).unwrap();
//!
//! let mut app = App::new(workbook, Theme::dark(), Catalog::load().unwrap()).unwrap();
//! app.apply(Action::Resize { width: 80, height: 24 });
//! app.apply(Action::ToggleFocus);
//! assert!(app.in_cell_mode());
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod logging;
pub mod pager;
pub mod sheet_view;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{Action, App, Effect};
pub use config::Settings;
pub use data::{
    load_sheet, load_workbook, Column, LoadOptions, Sheet, SheetTable, Workbook, MAX_COLUMN_WIDTH,
};
pub use pager::Pager;
pub use sheet_view::SheetView;
pub use source::{MemorySource, SourceError, TabularSource, XlsxSource};
pub use ui::{Catalog, Theme, ThemeMode};
