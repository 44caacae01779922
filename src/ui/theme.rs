//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::Target;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Line color for the 8.8.8.8 series.
    pub google: Color,
    /// Line color for the gateway series.
    pub gateway: Color,
    /// Color for downtime figures.
    pub down: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for headings.
    pub header: Style,
    /// Style for selectable window buttons.
    pub button: Style,
    /// Style for the button of the active window (disabled).
    pub button_disabled: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            google: Color::LightBlue,
            gateway: Color::LightGreen,
            down: Color::Red,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            button: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            button_disabled: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            google: Color::Blue,
            gateway: Color::Green,
            down: Color::Red,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            button: Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
            button_disabled: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Line color for a series.
    pub fn series_color(&self, target: Target) -> Color {
        match target {
            Target::Google => self.google,
            Target::Gateway => self.gateway,
        }
    }
}
