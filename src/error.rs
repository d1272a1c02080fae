// Error taxonomy for a single lens analysis request

use thiserror::Error;

/// Empty required form field, reported before any model call is made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("Description cannot be empty")]
    EmptyDescription,

    #[error("Tags cannot be empty")]
    EmptyTags,

    #[error("Please provide at least one tag")]
    NoUsableTags,
}

impl InputError {
    /// Name of the offending form field
    pub fn field(&self) -> &'static str {
        match self {
            InputError::EmptyTitle => "title",
            InputError::EmptyDescription => "description",
            InputError::EmptyTags | InputError::NoUsableTags => "tags",
        }
    }
}

/// Failure talking to the hosted model
#[derive(Debug, Error)]
#[error("{provider} API error: {message}")]
pub struct ProviderError {
    pub provider: &'static str,
    pub message: String,
}

impl ProviderError {
    pub fn new(provider: &'static str, message: impl Into<String>) -> Self {
        Self {
            provider,
            message: message.into(),
        }
    }
}

/// Decoded JSON that does not have the expected four-object shape
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("Invalid response format - expected array of 4 items")]
    NotAnArray,

    #[error("Invalid response format - expected array of 4 items, got {0}")]
    WrongLength(usize),

    #[error("Item {index} is not an object")]
    NotAnObject { index: usize },

    #[error("Missing field: {field} (item {index})")]
    MissingField { index: usize, field: &'static str },

    #[error("Unknown lens '{name}' (item {index})")]
    UnknownLens { index: usize, name: String },

    #[error("Lens '{name}' appears more than once (item {index})")]
    DuplicateLens { index: usize, name: String },

    #[error("Invalid value for {field} (item {index}): {message}")]
    InvalidField {
        index: usize,
        field: &'static str,
        message: String,
    },
}

/// Every way a lens analysis request can fail. All are terminal for the request.
#[derive(Debug, Error)]
pub enum LensError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Failed to render prompt: {0}")]
    Prompt(String),

    #[error("Failed to parse AI response as JSON: {message}")]
    Decode { message: String, raw: String },

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("Invalid rankings - must be unique values 1-4 (got {ranks:?})")]
    InvalidRanks { ranks: Vec<i64> },

    /// A decode, shape or ranking failure together with the reply it came from
    #[error("{error}")]
    Unparsed { raw: String, error: Box<LensError> },
}

impl LensError {
    /// Whether the failure came from interpreting the model's reply
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            LensError::Decode { .. }
                | LensError::Shape(_)
                | LensError::InvalidRanks { .. }
                | LensError::Unparsed { .. }
        )
    }

    /// The model text behind a parse failure, when it was kept
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            LensError::Decode { raw, .. } | LensError::Unparsed { raw, .. } => Some(raw.as_str()),
            _ => None,
        }
    }
}

pub type LensResult<T> = Result<T, LensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_fields() {
        assert_eq!(InputError::EmptyTitle.field(), "title");
        assert_eq!(InputError::EmptyDescription.field(), "description");
        assert_eq!(InputError::EmptyTags.field(), "tags");
        assert_eq!(InputError::NoUsableTags.field(), "tags");
    }

    #[test]
    fn test_provider_error_message() {
        let err = ProviderError::new("Claude", "401 Unauthorized");
        assert_eq!(err.to_string(), "Claude API error: 401 Unauthorized");
    }

    #[test]
    fn test_parse_failure_classification() {
        let decode = LensError::Decode {
            message: "eof".to_string(),
            raw: "[".to_string(),
        };
        assert!(decode.is_parse_failure());
        assert!(LensError::InvalidRanks { ranks: vec![1, 1, 2, 3] }.is_parse_failure());
        assert!(!LensError::Input(InputError::EmptyTitle).is_parse_failure());
    }

    #[test]
    fn test_unparsed_keeps_raw_and_message() {
        let err = LensError::Unparsed {
            raw: "[1, 1]".to_string(),
            error: Box::new(LensError::InvalidRanks { ranks: vec![1, 1] }),
        };
        assert!(err.is_parse_failure());
        assert_eq!(err.raw_output(), Some("[1, 1]"));
        assert!(err.to_string().starts_with("Invalid rankings"));
        assert_eq!(LensError::Input(InputError::EmptyTags).raw_output(), None);
    }
}
