use core::fmt;

/// Minimal error set for core-domain validation & parsing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CoreError {
    InvalidToken,
    InvalidDate,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidToken => write!(f, "invalid token"),
            CoreError::InvalidDate => write!(f, "invalid date"),
        }
    }
}

impl std::error::Error for CoreError {}
