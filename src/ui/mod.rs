//! Terminal rendering using ratatui.
//!
//! [`render`] projects the current [`App`] state to a frame: the active
//! sheet's table in the body band and the status footer below it. Rendering
//! never changes navigation state.

pub mod catalog;
pub mod footer;
pub mod table;
pub mod theme;

pub use catalog::Catalog;
pub use table::display_table;
pub use theme::{TableStyles, Theme, ThemeMode};

use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};

use crate::app::{App, FOOTER_BAND_HEIGHT};

/// Draw the whole viewer.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Min(0),                     // Sheet table
        Constraint::Length(FOOTER_BAND_HEIGHT), // Footer
    ])
    .split(frame.area());

    table::render(frame, app, chunks[0]);
    footer::render(frame, app, chunks[1]);
}
