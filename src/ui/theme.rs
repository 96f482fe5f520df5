//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use clap::ValueEnum;
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const PRIMARY: Color = Color::Rgb(0x00, 0xbb, 0xf9);
const SECONDARY: Color = Color::Rgb(0x9b, 0x5d, 0xe5);

/// Which theme to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Pick from the terminal background luminance.
    #[default]
    Auto,
    Dark,
    Light,
}

/// Styles for one table state (focused or blurred).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStyles {
    /// Header row.
    pub header: Style,
    /// Regular cells.
    pub cell: Style,
    /// The row under the cursor.
    pub selected: Style,
}

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Table styles while the sheet is in cell navigation.
    pub focused: TableStyles,
    /// Table styles while the sheet list is navigated.
    pub blurred: TableStyles,
    /// Mode badge in sheet navigation.
    pub badge_sheet: Style,
    /// Mode badge in table navigation.
    pub badge_table: Style,
    /// Footer background filling the gaps.
    pub footer: Style,
    /// File name, sheet name and page indicator.
    pub footer_context: Style,
    /// Acknowledgment messages in the footer.
    pub footer_message: Style,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        let inactive = Color::Rgb(0x66, 0x66, 0x66);
        let badge = Style::default().fg(Color::Rgb(0xdd, 0xdd, 0xdd)).add_modifier(Modifier::BOLD);
        Self {
            focused: TableStyles {
                header: Style::default().fg(SECONDARY).add_modifier(Modifier::BOLD),
                cell: Style::default(),
                selected: Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
            },
            blurred: TableStyles {
                header: Style::default().fg(inactive).add_modifier(Modifier::BOLD),
                cell: Style::default().fg(inactive),
                selected: Style::default().fg(inactive).add_modifier(Modifier::BOLD),
            },
            badge_sheet: badge.bg(PRIMARY),
            badge_table: badge.bg(SECONDARY),
            footer: Style::default().bg(Color::Rgb(0x33, 0x33, 0x33)),
            footer_context: Style::default()
                .fg(Color::Rgb(0xdd, 0xdd, 0xdd))
                .bg(Color::Rgb(0x32, 0x32, 0x32)),
            footer_message: Style::default().fg(PRIMARY).bg(Color::Rgb(0x32, 0x32, 0x32)),
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        let inactive = Color::Rgb(0x99, 0x99, 0x99);
        let badge = Style::default().fg(Color::Rgb(0xff, 0xff, 0xff)).add_modifier(Modifier::BOLD);
        Self {
            focused: TableStyles {
                header: Style::default().fg(SECONDARY).add_modifier(Modifier::BOLD),
                cell: Style::default(),
                selected: Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
            },
            blurred: TableStyles {
                header: Style::default().fg(inactive).add_modifier(Modifier::BOLD),
                cell: Style::default().fg(inactive),
                selected: Style::default().fg(inactive).add_modifier(Modifier::BOLD),
            },
            badge_sheet: badge.bg(PRIMARY),
            badge_table: badge.bg(SECONDARY),
            footer: Style::default().bg(Color::Rgb(0xe0, 0xe0, 0xe0)),
            footer_context: Style::default()
                .fg(Color::Rgb(0x22, 0x22, 0x22))
                .bg(Color::Rgb(0xd5, 0xd5, 0xd5)),
            footer_message: Style::default().fg(SECONDARY).bg(Color::Rgb(0xd5, 0xd5, 0xd5)),
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Auto => Self::auto_detect(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Table styles for a focused or blurred sheet.
    pub fn table(&self, focused: bool) -> &TableStyles {
        if focused {
            &self.focused
        } else {
            &self.blurred
        }
    }
}
