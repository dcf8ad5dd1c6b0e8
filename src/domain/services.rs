//! Formula evaluation services for formula-capable fields.
//!
//! This module wraps the expression parser into the two operations the UI
//! boundary needs: evaluating a bare expression to a rounded number, and
//! deciding what a field's text should become when it loses focus.

use super::errors::{EvalError, EvalResult};
use super::models::FieldUpdate;
use super::parser::{ExpressionEvaluator, Parser};

/// Evaluates field formulas under standard arithmetic precedence.
///
/// Supported features:
/// - Binary operators: +, -, *, /
/// - Parentheses for grouping and unary minus
/// - 'x' (or 'X') as an alias for multiplication
/// - Results rounded to 2 decimal places, half away from zero
/// - Negative results rejected
///
/// The evaluator never raises past its own boundary; failures come back as
/// a typed [`EvalError`] and carry the user-facing message.
///
/// # Examples
///
/// ```
/// use calcform::domain::FormulaEvaluator;
///
/// assert_eq!(FormulaEvaluator::evaluate("2+3*4"), Ok(14.0));
/// assert_eq!(FormulaEvaluator::evaluate("10/3"), Ok(3.33));
/// assert_eq!(FormulaEvaluator::evaluate("2x3"), Ok(6.0));
/// assert!(FormulaEvaluator::evaluate("5-10").is_err());
/// ```
pub struct FormulaEvaluator;

impl FormulaEvaluator {
    /// Evaluates a formula expression (leading '=' already stripped).
    ///
    /// Any tokenizing or parsing failure, an empty expression, and division
    /// by zero all report [`EvalError::InvalidSyntax`]; a well-formed
    /// expression with a negative value reports
    /// [`EvalError::NegativeResult`]. Syntax is checked before the sign of
    /// the result can matter.
    pub fn evaluate(expression: &str) -> EvalResult<f64> {
        let normalized = Self::normalize(expression);

        let value = Self::parse_and_evaluate(&normalized)
            .map_err(|_| EvalError::InvalidSyntax)?;

        if value < 0.0 {
            return Err(EvalError::NegativeResult);
        }

        Ok(Self::round_currency(value))
    }

    /// Decides what a field's text becomes when the field loses focus.
    ///
    /// Text without a leading '=' (plain numbers, empty fields) passes
    /// through untouched and is never evaluated. Formulas are evaluated
    /// and either replace the text with their rendered value or surface
    /// the failure message, leaving the text as typed.
    ///
    /// # Examples
    ///
    /// ```
    /// use calcform::domain::{FormulaEvaluator, FieldUpdate};
    ///
    /// assert_eq!(FormulaEvaluator::process_focus_out("42"), FieldUpdate::Unchanged);
    /// assert_eq!(
    ///     FormulaEvaluator::process_focus_out("=10/4"),
    ///     FieldUpdate::Replaced("2.5".to_string()),
    /// );
    /// ```
    pub fn process_focus_out(text: &str) -> FieldUpdate {
        let formula = text.trim();

        if !formula.starts_with('=') {
            return FieldUpdate::Unchanged;
        }

        let expression = &formula[1..];

        match Self::evaluate(expression) {
            Ok(value) => FieldUpdate::Replaced(Self::render_value(value)),
            Err(err) => FieldUpdate::Error {
                message: err.to_string(),
            },
        }
    }

    /// Replaces the multiplication alias 'x'/'X' with '*'.
    fn normalize(expression: &str) -> String {
        expression.replace(['x', 'X'], "*")
    }

    /// Parses and evaluates an expression, keeping parser-internal errors.
    fn parse_and_evaluate(expression: &str) -> Result<f64, String> {
        let mut parser = Parser::new(expression)?;
        let ast = parser.parse()?;
        ExpressionEvaluator::evaluate(&ast)
    }

    /// Rounds to 2 decimal places, half away from zero.
    fn round_currency(value: f64) -> f64 {
        let rounded = (value * 100.0).round() / 100.0;
        // -0 can survive rounding; render it as plain 0
        if rounded == 0.0 { 0.0 } else { rounded }
    }

    /// Renders a rounded value in its shortest decimal form ("6", "3.33").
    fn render_value(value: f64) -> String {
        value.to_string()
    }
}
