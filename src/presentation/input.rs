use crate::application::{App, AppMode};
use crate::domain::FieldKey;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Form => Self::handle_form_mode(app, key, modifiers),
            AppMode::Alert => Self::handle_alert_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_form_mode(app: &mut App, key: KeyCode, _modifiers: KeyModifiers) {
        match key {
            KeyCode::Tab | KeyCode::Enter | KeyCode::Down => {
                app.focus_next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.focus_prev();
            }
            KeyCode::F(1) => {
                app.open_help();
            }
            KeyCode::Backspace => {
                app.handle_field_key(FieldKey::Backspace);
            }
            KeyCode::Delete => {
                app.handle_field_key(FieldKey::Delete);
            }
            KeyCode::Left => {
                app.handle_field_key(FieldKey::ArrowLeft);
            }
            KeyCode::Right => {
                app.handle_field_key(FieldKey::ArrowRight);
            }
            KeyCode::Char(c) => {
                app.handle_field_key(FieldKey::Char(c));
            }
            _ => {}
        }
    }

    fn handle_alert_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
                app.dismiss_alert();
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{App, AppMode};

    #[test]
    fn test_typed_characters_reach_the_field() {
        let mut app = App::default();

        InputHandler::handle_key_event(&mut app, KeyCode::Char('='), KeyModifiers::NONE);
        InputHandler::handle_key_event(&mut app, KeyCode::Char('5'), KeyModifiers::NONE);
        InputHandler::handle_key_event(&mut app, KeyCode::Char('+'), KeyModifiers::SHIFT);
        InputHandler::handle_key_event(&mut app, KeyCode::Char('5'), KeyModifiers::NONE);

        assert_eq!(app.focused_field().value, "=5+5");
    }

    #[test]
    fn test_tab_commits_and_advances() {
        let mut app = App::default();

        for c in "=2*3".chars() {
            InputHandler::handle_key_event(&mut app, KeyCode::Char(c), KeyModifiers::NONE);
        }
        InputHandler::handle_key_event(&mut app, KeyCode::Tab, KeyModifiers::NONE);

        assert_eq!(app.fields[0].value, "6");
        assert_eq!(app.focused, 1);
    }

    #[test]
    fn test_alert_blocks_form_input_until_dismissed() {
        let mut app = App::default();

        for c in "=5-10".chars() {
            InputHandler::handle_key_event(&mut app, KeyCode::Char(c), KeyModifiers::NONE);
        }
        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.mode, AppMode::Alert);

        // Typing while the alert is up must not touch any field
        InputHandler::handle_key_event(&mut app, KeyCode::Char('7'), KeyModifiers::NONE);
        assert_eq!(app.fields[0].value, "=5-10");
        assert_eq!(app.fields[1].value, "");

        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.mode, AppMode::Form);
        assert_eq!(app.focused, 0);
    }

    #[test]
    fn test_help_key_binding() {
        let mut app = App::default();

        InputHandler::handle_key_event(&mut app, KeyCode::F(1), KeyModifiers::NONE);
        assert_eq!(app.mode, AppMode::Help);

        InputHandler::handle_key_event(&mut app, KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(app.help_scroll, 1);

        InputHandler::handle_key_event(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.mode, AppMode::Form);
    }
}
