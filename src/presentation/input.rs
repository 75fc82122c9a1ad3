use crate::application::{App, AppMode};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::ImportFile => Self::handle_filename_input_mode(app, key, modifiers),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    /// Ctrl on every platform; Super too, for terminals that report Cmd on macOS.
    /// Ctrl+Alt is AltGr on many layouts and types a character instead.
    fn is_shortcut(modifiers: KeyModifiers) -> bool {
        if modifiers.contains(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return false;
        }
        modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER)
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if Self::is_shortcut(modifiers) {
            // Shortcuts are consumed here and never reach the document.
            match key {
                KeyCode::Char('s') => {
                    let _ = app.export_model();
                }
                KeyCode::Char('r') => app.start_submission(),
                KeyCode::Char('o') => app.start_import(),
                KeyCode::Char('e') => {
                    let _ = app.export_results();
                }
                KeyCode::Char('t') => {
                    let _ = app.export_results_csv();
                }
                KeyCode::Char('y') => app.copy_result(),
                KeyCode::Char('l') => app.start_sample_load(),
                KeyCode::Char('w') => app.close_result(),
                KeyCode::Char('q') => app.should_quit = true,
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::F(1) => app.open_help(),
            KeyCode::Enter => app.editor.insert_newline(),
            KeyCode::Tab => app.editor.insert_indent(),
            KeyCode::Backspace => app.editor.backspace(),
            KeyCode::Delete => app.editor.delete(),
            KeyCode::Left => app.editor.move_left(),
            KeyCode::Right => app.editor.move_right(),
            KeyCode::Up => app.editor.move_up(),
            KeyCode::Down => app.editor.move_down(),
            KeyCode::Home => app.editor.move_home(),
            KeyCode::End => app.editor.move_end(),
            KeyCode::Esc => app.status_message = None,
            KeyCode::Char(c) => app.editor.insert_char(c),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_filename_input_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if Self::is_shortcut(modifiers) {
            // Only the save shortcut works here; the rest never reach the path.
            if key == KeyCode::Char('s') {
                let _ = app.export_model();
            }
            return;
        }

        match key {
            KeyCode::Enter => app.finish_import(),
            KeyCode::Esc => app.cancel_import(),
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    let idx = Self::byte_index(&app.filename_input, app.cursor_position - 1);
                    app.filename_input.remove(idx);
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.filename_input.chars().count() {
                    let idx = Self::byte_index(&app.filename_input, app.cursor_position);
                    app.filename_input.remove(idx);
                }
            }
            KeyCode::Left => {
                if app.cursor_position > 0 {
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Right => {
                if app.cursor_position < app.filename_input.chars().count() {
                    app.cursor_position += 1;
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.filename_input.chars().count();
            }
            KeyCode::Char(c) => {
                let idx = Self::byte_index(&app.filename_input, app.cursor_position);
                app.filename_input.insert(idx, c);
                app.cursor_position += 1;
            }
            _ => {}
        }
    }

    fn byte_index(text: &str, col: usize) -> usize {
        text.char_indices().nth(col).map(|(i, _)| i).unwrap_or(text.len())
    }
}
