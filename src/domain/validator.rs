//! Keystroke validation for formula fields.
//!
//! Every keypress aimed at a formula-capable field is checked against the
//! formula grammar incrementally, before the character lands in the field.
//! The validator is a pure function of the current text, the cursor
//! position, and the proposed key; the surrounding application layer owns
//! any side effects (such as clearing a field's error state).

use super::models::{FieldKey, KeyDecision};

/// Characters that delimit numeric runs and are only legal after a leading '='.
const OPERATORS: [char; 6] = ['+', '-', '*', '/', '(', ')'];

/// Decides whether a single keypress may be inserted into a formula field.
///
/// Rules are applied in order; the first match wins:
///
/// 1. Navigation and control keys are always allowed.
/// 2. Digits are always allowed.
/// 3. `=` is allowed only when no `=` exists yet and the cursor is at the
///    very start of the field.
/// 4. Arithmetic operators and parentheses are allowed only when the field
///    already starts with `=`.
/// 5. `.` is allowed only when inserting it would not give any numeric run
///    a second decimal point.
/// 6. Everything else is blocked.
///
/// # Examples
///
/// ```
/// use calcform::domain::{KeystrokeValidator, FieldKey, KeyDecision};
///
/// // '=' may only start a formula
/// assert_eq!(KeystrokeValidator::decide("", 0, &FieldKey::Char('=')), KeyDecision::Allow);
/// assert_eq!(KeystrokeValidator::decide("=5+", 3, &FieldKey::Char('=')), KeyDecision::Block);
///
/// // operators need the '=' prefix
/// assert_eq!(KeystrokeValidator::decide("12", 2, &FieldKey::Char('+')), KeyDecision::Block);
/// assert_eq!(KeystrokeValidator::decide("=12", 3, &FieldKey::Char('+')), KeyDecision::Allow);
/// ```
pub struct KeystrokeValidator;

impl KeystrokeValidator {
    /// Applies the admission rules to one keypress.
    pub fn decide(current_text: &str, cursor: usize, key: &FieldKey) -> KeyDecision {
        let ch = match key {
            FieldKey::Backspace
            | FieldKey::Tab
            | FieldKey::Enter
            | FieldKey::ArrowLeft
            | FieldKey::ArrowRight
            | FieldKey::Delete => return KeyDecision::Allow,
            FieldKey::Char(ch) => *ch,
        };

        if ch.is_ascii_digit() {
            return KeyDecision::Allow;
        }

        if ch == '=' {
            return if current_text.contains('=') || cursor != 0 {
                KeyDecision::Block
            } else {
                KeyDecision::Allow
            };
        }

        if OPERATORS.contains(&ch) {
            return if current_text.starts_with('=') {
                KeyDecision::Allow
            } else {
                KeyDecision::Block
            };
        }

        if ch == '.' {
            return if Self::would_double_decimal(current_text, cursor) {
                KeyDecision::Block
            } else {
                KeyDecision::Allow
            };
        }

        KeyDecision::Block
    }

    /// Checks whether inserting a '.' at the cursor would give some numeric
    /// run two or more decimal points.
    ///
    /// A numeric run is a maximal substring containing no arithmetic
    /// operator. The check is deliberately global over the whole string's
    /// runs rather than strictly the run under the cursor, preserving the
    /// original admission behavior for mid-string edits.
    fn would_double_decimal(current_text: &str, cursor: usize) -> bool {
        let mut candidate: String = current_text.chars().take(cursor).collect();
        candidate.push('.');
        candidate.extend(current_text.chars().skip(cursor));

        candidate
            .split(|c| OPERATORS.contains(&c))
            .any(|run| run.matches('.').count() > 1)
    }
}
