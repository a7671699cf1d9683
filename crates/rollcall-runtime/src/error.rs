use rollcall_engine::FieldError;
use std::fmt;

/// Result type for rollcall-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// Stored JSON could not be read or written
    Json(serde_json::Error),

    /// Domain value failed to parse
    Types(rollcall_types::Error),

    /// Configuration error
    Config(String),

    /// Requested class, student or role does not exist
    NotFound(String),

    /// Invalid operation or state
    InvalidOperation(String),

    /// Backend collaborator rejected or failed the request
    Backend(String),

    /// Form input failed validation
    Validation(Vec<FieldError>),

    /// Export could not be rendered
    Export(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Json(err) => write!(f, "Data error: {}", err),
            Error::Types(err) => write!(f, "{}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
            Error::Backend(msg) => write!(f, "Backend error: {}", msg),
            Error::Validation(errors) => {
                write!(f, "Invalid input:")?;
                for err in errors {
                    write!(f, " {} ({});", err.message, err.field)?;
                }
                Ok(())
            }
            Error::Export(msg) => write!(f, "Export failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Types(err) => Some(err),
            Error::Config(_)
            | Error::NotFound(_)
            | Error::InvalidOperation(_)
            | Error::Backend(_)
            | Error::Validation(_)
            | Error::Export(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<rollcall_types::Error> for Error {
    fn from(err: rollcall_types::Error) -> Self {
        Error::Types(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
