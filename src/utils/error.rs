use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocatorError {
    #[error("Geocoder request failed: {message}")]
    ResolutionError { message: String },

    #[error("Place search request failed: {message}")]
    SearchError { message: String },

    #[error("{message}")]
    NotFoundError { message: String },

    #[error("Static map request failed: {message}")]
    RenderError { message: String },

    #[error("Malformed {service} response: {reason}")]
    MalformedResponse { service: String, reason: String },

    #[error("Map image could not be decoded: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("Could not present map: {message}")]
    PresentationError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    NotFound,
    Structural,
    Presentation,
    Configuration,
}

impl LocatorError {
    pub fn malformed(service: &str, reason: impl Into<String>) -> Self {
        LocatorError::MalformedResponse {
            service: service.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            LocatorError::ResolutionError { .. }
            | LocatorError::SearchError { .. }
            | LocatorError::RenderError { .. } => ErrorCategory::Transport,
            LocatorError::NotFoundError { .. } => ErrorCategory::NotFound,
            LocatorError::MalformedResponse { .. } | LocatorError::ImageDecode(_) => {
                ErrorCategory::Structural
            }
            LocatorError::PresentationError { .. } | LocatorError::IoError(_) => {
                ErrorCategory::Presentation
            }
            LocatorError::ConfigError { .. } | LocatorError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Transport => {
                "Check network access and that the API key for this service is valid"
            }
            ErrorCategory::NotFound => "Try a more precise address or a different search term",
            ErrorCategory::Structural => {
                "The service answered in an unexpected format; check the configured endpoint"
            }
            ErrorCategory::Presentation => {
                "Use --output to save the map to a file, or --no-map to skip it"
            }
            ErrorCategory::Configuration => "Fix the configuration file or command-line options",
        }
    }
}

pub type Result<T> = std::result::Result<T, LocatorError>;
