use thiserror::Error;

pub type Result<T> = std::result::Result<T, InvalidJsonError>;

/// What went wrong while reading a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Not syntactically valid JSON
    Syntax,
    /// Input ended in the middle of a value
    Eof,
    /// Valid JSON, but not a shape that maps to a collection (e.g. a bare scalar)
    Data,
    /// The underlying reader failed
    Io,
    /// The input went over one of the configured [`crate::Limits`]
    Limit,
}

/// The provided input could not be turned into a collection
///
/// `line` and `column` are 1-based and `0` when the failure has no position
/// (reader errors and limit violations detected before parsing).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("provided JSON is not valid at line {line}, column {column}: {message}")]
pub struct InvalidJsonError {
    pub category: Category,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl InvalidJsonError {
    pub(crate) fn limit(message: String) -> Self {
        InvalidJsonError {
            category: Category::Limit,
            line: 0,
            column: 0,
            message,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.category == Category::Eof
    }
}

impl From<serde_json::Error> for InvalidJsonError {
    fn from(err: serde_json::Error) -> Self {
        let category = match err.classify() {
            serde_json::error::Category::Syntax => Category::Syntax,
            serde_json::error::Category::Eof => Category::Eof,
            serde_json::error::Category::Data => Category::Data,
            serde_json::error::Category::Io => Category::Io,
        };

        // serde_json appends " at line X column Y" to its Display output,
        // we keep the position in dedicated fields instead.
        let mut message = err.to_string();
        let suffix = format!(" at line {} column {}", err.line(), err.column());
        if message.ends_with(&suffix) {
            message.truncate(message.len() - suffix.len());
        }

        InvalidJsonError {
            category,
            line: err.line(),
            column: err.column(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_position_of_syntax_errors() {
        let err: InvalidJsonError = serde_json::from_str::<serde_json::Value>("{\n  \"a\": x}")
            .unwrap_err()
            .into();

        assert_eq!(err.category, Category::Syntax);
        assert_eq!(err.line, 2);
        assert!(err.column > 0);
        assert!(!err.message.contains("at line"));
        assert!(err.to_string().starts_with("provided JSON is not valid at line 2"));
    }

    #[test]
    fn truncated_input_is_eof() {
        let err: InvalidJsonError = serde_json::from_str::<serde_json::Value>("{\"a\": [1, 2")
            .unwrap_err()
            .into();

        assert!(err.is_eof());
    }

    #[test]
    fn limit_errors_have_no_position() {
        let err = InvalidJsonError::limit("too big".to_string());
        assert_eq!(err.category, Category::Limit);
        assert_eq!((err.line, err.column), (0, 0));
    }
}
