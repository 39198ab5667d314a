use thiserror::Error;

/// Main error type for the bulk-watermark library
#[derive(Error, Debug)]
pub enum WatermarkError {
    #[error("Compositing error: {0}")]
    Composite(#[from] CompositeError),

    #[error("Image loading error: {0}")]
    Load(#[from] LoadError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Errors raised by the compositor itself
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompositeError {
    #[error("Invalid anchor '{value}' (expected top-left, top-right, bottom-left, bottom-right or center)")]
    InvalidAnchor { value: String },

    #[error("Invalid watermark: {width}x{height} has zero width")]
    InvalidWatermark { width: u32, height: u32 },
}

/// Image loading errors
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Image file not found or unreadable: {path}")]
    NotFound { path: String },

    #[error("Failed to decode image {path}: {reason}")]
    DecodeFailure { path: String, reason: String },
}

/// Errors raised while encoding or writing composites
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("PNG encoding failed for {name}: {reason}")]
    EncodeFailed { name: String, reason: String },

    #[error("Failed to write {path}: {reason}")]
    WriteFailed { path: String, reason: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}: {reason}")]
    ParseFailed { path: String, reason: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using WatermarkError
pub type Result<T> = std::result::Result<T, WatermarkError>;

impl WatermarkError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Check if this error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::Load(LoadError::NotFound { .. }) => true,
            Self::Export(ExportError::WriteFailed { .. }) => true,
            // Bad pixels or bad parameters stay bad
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Load(LoadError::NotFound { path }) => {
                format!("Could not read image '{}'. Please check the file exists.", path)
            }
            Self::Load(LoadError::DecodeFailure { path, .. }) => {
                format!("Could not decode '{}'. Supported formats are PNG and JPEG.", path)
            }
            Self::Composite(CompositeError::InvalidAnchor { value }) => {
                format!(
                    "Anchor '{}' not recognised. Use one of: top-left, top-right, bottom-left, bottom-right, center",
                    value
                )
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
