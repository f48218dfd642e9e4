//! Error codes shared across the domain layer.

use std::fmt;

/// Stable machine-readable error codes, surfaced on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    InvalidSession,
    BadRequest,

    // Not found errors
    SessionNotFound,
    OptionNotFound,
    UnknownOption,
}

impl ErrorCode {
    /// Returns the wire representation of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidSession => "INVALID_SESSION",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::SessionNotFound => "SESSION_NOT_FOUND",
            ErrorCode::OptionNotFound => "OPTION_NOT_FOUND",
            ErrorCode::UnknownOption => "UNKNOWN_OPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::SessionNotFound), "SESSION_NOT_FOUND");
        assert_eq!(format!("{}", ErrorCode::UnknownOption), "UNKNOWN_OPTION");
        assert_eq!(format!("{}", ErrorCode::BadRequest), "BAD_REQUEST");
    }
}
