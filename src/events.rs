use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};

/// File written by the `e` key.
pub const EXPORT_FILE: &str = "stationwatch_export.json";

/// Row of the tab bar (after the header).
const TAB_ROW: u16 = 1;

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
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),

        KeyCode::Char('1') => app.set_view(View::Current),
        KeyCode::Char('2') => app.set_view(View::Charts),
        KeyCode::Char('3') => app.set_view(View::Annual),

        // Chart selection
        KeyCode::Up | KeyCode::Char('k') if app.current_view == View::Charts => {
            app.select_prev_chart()
        }
        KeyCode::Down | KeyCode::Char('j') if app.current_view == View::Charts => {
            app.select_next_chart()
        }

        KeyCode::Char('u') => app.toggle_units(),

        KeyCode::Char('r') => {
            app.refresh();
            app.set_status_message("Refreshing...".to_string());
        }

        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

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
        MouseEventKind::ScrollUp if app.current_view == View::Charts => app.select_prev_chart(),
        MouseEventKind::ScrollDown if app.current_view == View::Charts => app.select_next_chart(),

        MouseEventKind::Down(MouseButton::Left) if mouse.row == TAB_ROW => {
            if let Some(view) = crate::ui::common::tab_at(mouse.column) {
                app.set_view(view);
            }
        }

        MouseEventKind::Down(MouseButton::Right) => app.go_back(),

        _ => {}
    }
}
