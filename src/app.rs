//! Application state and navigation logic.
//!
//! Each sheet is in one of two modes, tracked per sheet by its focus flag:
//!
//! - **Sheet navigation** (blurred): left/right page between sheets.
//! - **Table navigation** (focused): left/right scroll columns, and the
//!   table keys move the row cursor.
//!
//! Esc flips the mode of the active sheet only.

use anyhow::{ensure, Result};
use crossterm::event::KeyEvent;

use crate::data::Workbook;
use crate::pager::Pager;
use crate::sheet_view::SheetView;
use crate::ui::{Catalog, Theme};

/// Rows above the table. The viewer has no header band.
pub const HEADER_BAND_HEIGHT: u16 = 0;
/// Rows below the table taken by the status footer.
pub const FOOTER_BAND_HEIGHT: u16 = 1;
/// Upper bound on the table height, to bound rendering cost.
pub const MAX_TABLE_HEIGHT: u16 = 666;

/// A discrete input the viewport reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Switch the active sheet between sheet and table navigation.
    ToggleFocus,
    MoveLeft,
    MoveRight,
    Quit,
    /// Acknowledge the selected row.
    Select,
    /// The terminal was resized.
    Resize { width: u16, height: u16 },
    /// Any other key, handed to the active table and the pager.
    Key(KeyEvent),
}

/// Observable outcome of applying an [`Action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A user-facing acknowledgment of the selected row.
    Acknowledge(String),
    /// The terminal cannot fit the footer; the session is over.
    TerminalTooSmall { height: u16, required: u16 },
}

/// Main application state.
pub struct App {
    pub running: bool,

    // Sheets and navigation
    name: String,
    sheets: Vec<SheetView>,
    pager: Pager,
    horizontal_offset: usize,

    // Viewport
    width: u16,
    height: u16,

    // UI
    pub theme: Theme,
    pub catalog: Catalog,

    // Acknowledgment of the last select, cleared by the next action
    status_message: Option<String>,
}

impl App {
    /// Create the viewer in sheet navigation on the first sheet.
    pub fn new(workbook: Workbook, theme: Theme, catalog: Catalog) -> Result<Self> {
        ensure!(!workbook.sheets.is_empty(), "No sheets found in the file");

        let sheets: Vec<SheetView> = workbook.sheets.into_iter().map(SheetView::new).collect();
        Ok(Self {
            running: true,
            name: workbook.name,
            pager: Pager::new(sheets.len()),
            sheets,
            horizontal_offset: 0,
            width: 0,
            height: 0,
            theme,
            catalog,
            status_message: None,
        })
    }

    /// Name of the open file.
    pub fn workbook_name(&self) -> &str {
        &self.name
    }

    pub fn sheets(&self) -> &[SheetView] {
        &self.sheets
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Index of the visible sheet.
    pub fn active_index(&self) -> usize {
        self.pager.page()
    }

    pub fn active_sheet(&self) -> &SheetView {
        &self.sheets[self.pager.page()]
    }

    fn active_sheet_mut(&mut self) -> &mut SheetView {
        &mut self.sheets[self.pager.page()]
    }

    /// True when the active sheet is in table navigation.
    pub fn in_cell_mode(&self) -> bool {
        self.active_sheet().is_focused()
    }

    /// Count of leading columns hidden from the active sheet.
    pub fn horizontal_offset(&self) -> usize {
        self.horizontal_offset
    }

    /// Last known terminal size as `(width, height)`.
    pub fn viewport(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Apply one action to the navigation state.
    pub fn apply(&mut self, action: Action) -> Option<Effect> {
        self.status_message = None;

        let effect = match action {
            Action::ToggleFocus => {
                self.active_sheet_mut().toggle_focus();
                None
            }
            Action::MoveLeft => {
                if self.in_cell_mode() {
                    self.horizontal_offset = self.horizontal_offset.saturating_sub(1);
                } else {
                    self.horizontal_offset = 0;
                    self.pager.prev();
                }
                None
            }
            Action::MoveRight => {
                if self.in_cell_mode() {
                    self.horizontal_offset += 1;
                } else {
                    self.horizontal_offset = 0;
                    self.pager.next();
                }
                None
            }
            Action::Quit => {
                self.quit();
                None
            }
            Action::Select => self.select(),
            Action::Resize { width, height } => self.resize(width, height),
            Action::Key(key) => {
                self.active_sheet_mut().handle_key(&key);
                self.pager.handle_key(&key);
                None
            }
        };

        self.clamp_offset();
        effect
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    fn select(&mut self) -> Option<Effect> {
        if !self.in_cell_mode() {
            return None;
        }
        let value = self.active_sheet().selected_row()?.get(1)?.clone();

        let message = self.catalog.t("select.acknowledge", &[&value]);
        tracing::info!(sheet = %self.active_sheet().name, %value, "Row selected");
        self.status_message = Some(message.clone());
        Some(Effect::Acknowledge(message))
    }

    fn resize(&mut self, width: u16, height: u16) -> Option<Effect> {
        self.width = width;
        self.height = height;

        let required = HEADER_BAND_HEIGHT + FOOTER_BAND_HEIGHT;
        if height < required {
            tracing::error!(height, required, "Terminal height is too small");
            self.quit();
            return Some(Effect::TerminalTooSmall { height, required });
        }

        let table_height = usize::from((height - required).min(MAX_TABLE_HEIGHT));
        for sheet in &mut self.sheets {
            sheet.set_height(table_height);
        }
        None
    }

    fn clamp_offset(&mut self) {
        let max = self.active_sheet().table.column_count().saturating_sub(1);
        self.horizontal_offset = self.horizontal_offset.min(max);
    }
}
