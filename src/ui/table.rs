//! Sheet table rendering.

use std::ops::Range;

use ratatui::{
    layout::{Constraint, Margin, Rect},
    widgets::{Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::SheetTable;

/// Build the display copy of `table` for the given rows.
///
/// With `offset > 0` the first `offset` columns are dropped, along with the
/// same number of leading cells from every row (rows shorter than that
/// become empty). The stored table is never modified.
pub fn display_table(table: &SheetTable, offset: usize, rows: Range<usize>) -> SheetTable {
    let window = table.rows.iter().skip(rows.start).take(rows.len());
    SheetTable {
        columns: table.columns.iter().skip(offset).cloned().collect(),
        rows: window.map(|row| row.iter().skip(offset).cloned().collect()).collect(),
    }
}

/// Render the active sheet's table with its header and selection.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let sheet = app.active_sheet();
    let styles = app.theme.table(sheet.is_focused());

    let start = sheet.start();
    let display = display_table(
        &sheet.table,
        app.horizontal_offset(),
        start..start + sheet.visible_rows(),
    );

    let header = Row::new(display.columns.iter().map(|c| Cell::from(c.title.clone())))
        .height(1)
        .style(styles.header);

    let rows: Vec<Row> = display
        .rows
        .into_iter()
        .map(|cells| Row::new(cells.into_iter().map(Cell::from)).style(styles.cell))
        .collect();

    let widths: Vec<Constraint> = display
        .columns
        .iter()
        .map(|c| Constraint::Length(u16::try_from(c.width).unwrap_or(u16::MAX)))
        .collect();

    let selected = sheet
        .selected_row()
        .map(|_| sheet.cursor().saturating_sub(start));

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .row_highlight_style(styles.selected);

    let mut state = TableState::default().with_selected(selected);

    frame.render_stateful_widget(
        table,
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut state,
    );
}
