//! Per-sheet view state: focus, row cursor and vertical scroll.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::data::{Sheet, SheetTable};

/// Rows of the table area that never show data: one margin row above the
/// table, the header row, and one margin row below.
pub const TABLE_CHROME_HEIGHT: usize = 3;

/// A loaded sheet plus the navigation state that belongs to it.
///
/// Focus and cursor survive paging away from the sheet and back.
#[derive(Debug, Clone)]
pub struct SheetView {
    pub name: String,
    pub table: SheetTable,
    focused: bool,
    /// Selected data row.
    cursor: usize,
    /// First data row shown.
    start: usize,
    /// Height of the table area in terminal rows.
    height: usize,
}

impl SheetView {
    pub fn new(sheet: Sheet) -> Self {
        Self {
            name: sheet.name,
            table: sheet.table,
            focused: false,
            cursor: 0,
            start: 0,
            height: 0,
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn toggle_focus(&mut self) {
        self.focused = !self.focused;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of data rows that fit in the table area.
    pub fn visible_rows(&self) -> usize {
        self.height.saturating_sub(TABLE_CHROME_HEIGHT)
    }

    /// The row under the cursor, if the sheet has rows.
    pub fn selected_row(&self) -> Option<&[String]> {
        self.table.rows.get(self.cursor).map(Vec::as_slice)
    }

    /// Set the table area height and keep the cursor on screen.
    pub fn set_height(&mut self, height: usize) {
        self.height = height;
        self.scroll_to_cursor();
    }

    /// Move the cursor with the table keys. Ignored while blurred.
    pub fn handle_key(&mut self, key: &KeyEvent) {
        if !self.focused {
            return;
        }

        let page = self.visible_rows().max(1);
        let half_page = (page / 2).max(1);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let plain_or_ctrl =
            key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::CONTROL;

        match key.code {
            KeyCode::Up | KeyCode::Char('k') if !ctrl => self.move_up(1),
            KeyCode::Down | KeyCode::Char('j') if !ctrl => self.move_down(1),
            KeyCode::Char('b') if !ctrl => self.move_up(page),
            KeyCode::Char('f') | KeyCode::Char(' ') if !ctrl => self.move_down(page),
            KeyCode::Char('u') if plain_or_ctrl => self.move_up(half_page),
            KeyCode::Char('d') if plain_or_ctrl => self.move_down(half_page),
            KeyCode::Home | KeyCode::Char('g') => self.goto_top(),
            KeyCode::End | KeyCode::Char('G') => self.goto_bottom(),
            _ => {}
        }
    }

    pub fn move_up(&mut self, n: usize) {
        self.cursor = self.cursor.saturating_sub(n);
        self.scroll_to_cursor();
    }

    pub fn move_down(&mut self, n: usize) {
        let last = self.table.row_count().saturating_sub(1);
        self.cursor = self.cursor.saturating_add(n).min(last);
        self.scroll_to_cursor();
    }

    pub fn goto_top(&mut self) {
        self.cursor = 0;
        self.scroll_to_cursor();
    }

    pub fn goto_bottom(&mut self) {
        self.cursor = self.table.row_count().saturating_sub(1);
        self.scroll_to_cursor();
    }

    fn scroll_to_cursor(&mut self) {
        let visible = self.visible_rows().max(1);
        if self.cursor < self.start {
            self.start = self.cursor;
        } else if self.cursor >= self.start + visible {
            self.start = self.cursor + 1 - visible;
        }
    }
}
