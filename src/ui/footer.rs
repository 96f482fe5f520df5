//! Status footer: mode badge, file and sheet context, page indicator.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Build the footer line for a band `width` cells wide.
///
/// The page indicator is right-aligned; the gap before it is filled with
/// the footer background.
pub fn footer_line(app: &App, width: u16) -> Line<'static> {
    let theme = &app.theme;
    let catalog = &app.catalog;
    let sheet = app.active_sheet();

    let (mode, badge_style) = if app.in_cell_mode() {
        (catalog.t("mode.navigation.table", &[]), theme.badge_table)
    } else {
        (catalog.t("mode.navigation.sheet", &[]), theme.badge_sheet)
    };

    let mut spans = vec![
        Span::styled(format!(" {} ", mode.to_uppercase()), badge_style),
        Span::styled(" ", theme.footer_context),
        Span::styled(
            catalog.t("context.filename", &[&app.workbook_name()]),
            theme.footer_context,
        ),
        Span::styled(" ↪ ", theme.footer_context),
        Span::styled(
            catalog.t("context.sheetname", &[&sheet.name]),
            theme.footer_context,
        ),
        Span::styled(" ", theme.footer_context),
    ];

    if let Some(message) = app.status_message() {
        spans.push(Span::styled(format!(" {message} "), theme.footer_message));
    }

    let paginator = Span::styled(
        format!(
            " {} ",
            catalog.t(
                "context.paginator",
                &[&(app.active_index() + 1), &app.sheet_count()]
            )
        ),
        theme.footer_context,
    );

    let used = Line::from(spans.clone()).width() + paginator.width();
    let gap = usize::from(width).saturating_sub(used);
    spans.push(Span::styled(" ".repeat(gap), theme.footer));
    spans.push(paginator);

    Line::from(spans)
}

/// Render the footer band.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let line = footer_line(app, area.width);
    frame.render_widget(Paragraph::new(line).style(app.theme.footer), area);
}
