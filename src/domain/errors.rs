#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    InvalidSyntax,
    NegativeResult,
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::InvalidSyntax => {
                write!(f, "Invalid formula syntax. Please review.")
            }
            EvalError::NegativeResult => {
                write!(f, "Negative value detected. Review and amend.")
            }
        }
    }
}

impl std::error::Error for EvalError {}

pub type EvalResult<T> = Result<T, EvalError>;
