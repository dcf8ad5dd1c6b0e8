//! Application state management for the formula form.
//!
//! This module contains the form state and mode management for the terminal
//! user interface. It is the "UI collaborator" of the domain core: it owns
//! field text, cursor positions, and error flags, routes keystrokes through
//! the validator, and commits fields through the evaluator on focus change.

use crate::domain::{
    FieldKey, FieldUpdate, FormulaEvaluator, KeyDecision, KeystrokeValidator,
};

/// Represents the current mode of the application.
#[derive(Debug, PartialEq)]
pub enum AppMode {
    /// Normal form interaction - typing into the focused field
    Form,
    /// A blocking alert with an evaluation error is displayed
    Alert,
    /// Help screen is displayed
    Help,
}

/// What kind of input a field accepts.
///
/// Only `Currency` fields get keystroke validation and focus-out formula
/// evaluation; `Text` fields accept anything and are never evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Currency,
    Text,
}

/// One text-input field of the form.
#[derive(Debug)]
pub struct FormField {
    /// Label shown next to the field
    pub label: String,
    /// Whether the field is formula-capable
    pub kind: FieldKind,
    /// Current text content
    pub value: String,
    /// Cursor position within the text, as a byte offset on a char boundary
    pub cursor: usize,
    /// Error message from the last failed evaluation, if any
    pub error: Option<String>,
}

impl FormField {
    fn new(label: &str, kind: FieldKind) -> Self {
        Self {
            label: label.to_string(),
            kind,
            value: String::new(),
            cursor: 0,
            error: None,
        }
    }
}

/// Main application state containing the form fields and UI state.
///
/// # Examples
///
/// ```
/// use calcform::application::App;
///
/// let app = App::default();
/// assert_eq!(app.focused, 0);
/// assert!(app.fields.len() > 0);
/// ```
#[derive(Debug)]
pub struct App {
    /// The form's fields, in tab order
    pub fields: Vec<FormField>,
    /// Index of the focused field
    pub focused: usize,
    /// Current application mode
    pub mode: AppMode,
    /// Message shown in the blocking alert popup
    pub alert_message: Option<String>,
    /// Field to refocus once the alert is dismissed
    pub pending_refocus: Option<usize>,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self {
            fields: vec![
                FormField::new("Amount", FieldKind::Currency),
                FormField::new("Tax", FieldKind::Currency),
                FormField::new("Shipping", FieldKind::Currency),
                FormField::new("Discount", FieldKind::Currency),
                FormField::new("Notes", FieldKind::Text),
            ],
            focused: 0,
            mode: AppMode::Form,
            alert_message: None,
            pending_refocus: None,
            help_scroll: 0,
            status_message: None,
        }
    }
}

impl App {
    /// Returns the currently focused field.
    pub fn focused_field(&self) -> &FormField {
        &self.fields[self.focused]
    }

    fn focused_field_mut(&mut self) -> &mut FormField {
        &mut self.fields[self.focused]
    }

    /// Delivers one keystroke to the focused field.
    ///
    /// Any previous error indication on the field is cleared first. For
    /// currency fields the validator decides whether the key is admissible;
    /// blocked keys are dropped without touching the text.
    pub fn handle_field_key(&mut self, key: FieldKey) {
        self.status_message = None;

        let field = self.focused_field_mut();
        field.error = None;

        if field.kind == FieldKind::Currency {
            let char_cursor = field.value[..field.cursor].chars().count();
            if KeystrokeValidator::decide(&field.value, char_cursor, &key) == KeyDecision::Block {
                return;
            }
        }

        match key {
            FieldKey::Char(c) => {
                let field = self.focused_field_mut();
                field.value.insert(field.cursor, c);
                field.cursor += c.len_utf8();
            }
            FieldKey::Backspace => {
                let field = self.focused_field_mut();
                if let Some(prev) = field.value[..field.cursor].chars().next_back() {
                    field.cursor -= prev.len_utf8();
                    field.value.remove(field.cursor);
                }
            }
            FieldKey::Delete => {
                let field = self.focused_field_mut();
                if field.cursor < field.value.len() {
                    field.value.remove(field.cursor);
                }
            }
            FieldKey::ArrowLeft => {
                let field = self.focused_field_mut();
                if let Some(prev) = field.value[..field.cursor].chars().next_back() {
                    field.cursor -= prev.len_utf8();
                }
            }
            FieldKey::ArrowRight => {
                let field = self.focused_field_mut();
                if let Some(next) = field.value[field.cursor..].chars().next() {
                    field.cursor += next.len_utf8();
                }
            }
            // Focus movement is driven by the input handler, not the field
            FieldKey::Tab | FieldKey::Enter => {}
        }
    }

    /// Runs focus-out processing on the focused field.
    ///
    /// Currency fields holding a formula are evaluated: on success the text
    /// is replaced by the rendered result; on failure the text stays, the
    /// field is marked errored, and the app enters alert mode with the
    /// field parked for refocus after dismissal. Plain text and non-currency
    /// fields are left untouched.
    pub fn commit_focused(&mut self) {
        if self.focused_field().kind != FieldKind::Currency {
            return;
        }

        let update = FormulaEvaluator::process_focus_out(&self.focused_field().value);
        let index = self.focused;

        match update {
            FieldUpdate::Unchanged => {}
            FieldUpdate::Replaced(text) => {
                let label = self.fields[index].label.clone();
                self.status_message = Some(format!("{} = {}", label, text));
                let field = &mut self.fields[index];
                field.cursor = text.len();
                field.value = text;
                field.error = None;
            }
            FieldUpdate::Error { message } => {
                self.fields[index].error = Some(message.clone());
                self.alert_message = Some(message);
                self.pending_refocus = Some(index);
                self.mode = AppMode::Alert;
            }
        }
    }

    /// Commits the focused field and moves focus to the next one, wrapping.
    pub fn focus_next(&mut self) {
        self.commit_focused();
        self.focused = (self.focused + 1) % self.fields.len();
    }

    /// Commits the focused field and moves focus to the previous one, wrapping.
    pub fn focus_prev(&mut self) {
        self.commit_focused();
        self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
    }

    /// Dismisses the alert popup.
    ///
    /// Focus returns to the errored field with the cursor at the end. This
    /// is the deferred refocus of the spec: it happens after the evaluation
    /// call returned, once the platform is done moving focus on its own.
    pub fn dismiss_alert(&mut self) {
        self.mode = AppMode::Form;
        self.alert_message = None;

        if let Some(index) = self.pending_refocus.take() {
            self.focused = index;
            let field = &mut self.fields[index];
            field.cursor = field.value.len();
        }
    }

    /// Opens the help screen.
    pub fn open_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    /// Closes the help screen.
    pub fn close_help(&mut self) {
        self.mode = AppMode::Form;
    }
}
