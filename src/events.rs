use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;
use crate::data::TimeWindow;

/// File written by the export key.
const EXPORT_FILE: &str = "pingwatch_export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // Window selection
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(window) = TimeWindow::from_hotkey(c) {
                app.set_window(window);
            }
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => app.next_window(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => app.prev_window(),

        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('?') => app.toggle_help(),

        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_FILE);
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.show_help {
                app.show_help = false;
                return;
            }
            if let Some(window) = app.window_at(mouse.column, mouse.row) {
                app.set_window(window);
            }
        }
        MouseEventKind::ScrollUp => app.next_window(),
        MouseEventKind::ScrollDown => app.prev_window(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::source::ChannelSource;
    use crate::ui::Theme;
    use ratatui::layout::Rect;

    fn app() -> App {
        let (_tx, source) = ChannelSource::create("test");
        App::with_theme(Box::new(source), Settings::default(), Theme::dark())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_digit_selects_window() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('1')));
        assert_eq!(app.window, TimeWindow::Minute);
        handle_key_event(&mut app, key(KeyCode::Char('6')));
        assert_eq!(app.window, TimeWindow::Month);
        handle_key_event(&mut app, key(KeyCode::Char('9')));
        assert_eq!(app.window, TimeWindow::Month);
    }

    #[test]
    fn test_arrows_cycle_windows() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Right));
        assert_eq!(app.window, TimeWindow::Day);
        handle_key_event(&mut app, key(KeyCode::Left));
        assert_eq!(app.window, TimeWindow::Hour);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);

        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(app.running);

        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn test_click_on_button_selects_window() {
        let mut app = app();
        app.window_buttons = vec![
            (Rect::new(0, 20, 15, 1), TimeWindow::Minute),
            (Rect::new(15, 20, 15, 1), TimeWindow::Hour),
        ];

        handle_mouse_event(&mut app, click(5, 20));
        assert_eq!(app.window, TimeWindow::Minute);

        // Clicking elsewhere changes nothing
        handle_mouse_event(&mut app, click(5, 2));
        assert_eq!(app.window, TimeWindow::Minute);
    }
}
