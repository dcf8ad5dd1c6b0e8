/// A single keypress aimed at a formula field, as seen by the core.
///
/// The presentation layer translates whatever key representation its
/// terminal backend uses into this type before asking the domain for a
/// decision, so the validator never depends on a UI crate.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKey {
    Backspace,
    Tab,
    Enter,
    ArrowLeft,
    ArrowRight,
    Delete,
    /// A printable character the user wants inserted at the cursor.
    Char(char),
}

/// Outcome of validating a single keypress.
///
/// `Block` is a normal result, not a fault: it means the character must not
/// be inserted into the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyDecision {
    Allow,
    Block,
}

/// What the field should do with its text after focus-out processing.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    /// Not a formula (or empty): leave the field exactly as it is.
    Unchanged,
    /// Formula evaluated successfully: write this text into the field.
    Replaced(String),
    /// Formula failed: keep the text, mark the field errored, surface the message.
    Error { message: String },
}
