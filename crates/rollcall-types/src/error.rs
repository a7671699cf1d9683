use std::fmt;

/// Result type for rollcall-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug)]
pub enum Error {
    /// Value could not be parsed into a domain type
    Parse { kind: &'static str, input: String },
}

impl Error {
    pub(crate) fn parse(kind: &'static str, input: impl Into<String>) -> Self {
        Error::Parse {
            kind,
            input: input.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse { kind, input } => write!(f, "invalid {}: '{}'", kind, input),
        }
    }
}

impl std::error::Error for Error {}
