use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// A required request part or field was absent.
    MissingInput(String),
    /// Bad extension, undecodable bytes or a malformed CSV record.
    InvalidFormat(String),
    /// Parsing succeeded but produced no names.
    EmptyResult,
    /// Count was non-positive or not an integer.
    InvalidCount(String),
    CountExceedsPopulation { requested: i128, available: usize },
    PayloadTooLarge { limit: usize },
    Config(String),
    Internal(String),
}

impl AppError {
    /// True for failures caused by the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AppError::Config(_) | AppError::Internal(_))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingInput(msg) => write!(f, "{}", msg),
            AppError::InvalidFormat(msg) => write!(f, "{}", msg),
            AppError::EmptyResult => write!(f, "No names found in file"),
            AppError::InvalidCount(msg) => write!(f, "{}", msg),
            AppError::CountExceedsPopulation {
                requested,
                available,
            } => write!(
                f,
                "Cannot select {} names from {} total names",
                requested, available
            ),
            AppError::PayloadTooLarge { limit } => write!(
                f,
                "File exceeds the maximum upload size of {} bytes",
                limit
            ),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
