use thiserror::Error;

/// Main error type for the dotmorph library
#[derive(Error, Debug)]
pub enum MorphError {
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Capture-side errors
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Frame buffer has {actual} bytes, expected {expected} for a {width}x{height} RGBA grid")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to load capture image: {path}")]
    LoadFailed { path: String },

    #[error("No capture images found in directory: {path}")]
    NoImagesFound { path: String },
}

/// Rendering-side errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to save frame: {path} - {reason}")]
    SaveFailed { path: String, reason: String },

    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using MorphError
pub type Result<T> = std::result::Result<T, MorphError>;

impl MorphError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Check if this error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        match self {
            // IO errors might be temporary
            Self::Io(_) => true,
            // A malformed frame is simply dropped; the next one may be fine
            Self::Capture(CaptureError::BufferSize { .. }) => true,
            Self::Capture(CaptureError::LoadFailed { .. }) => true,
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Capture(CaptureError::NoImagesFound { path }) => {
                format!("No images found in '{}'. Supported formats: png, jpg, jpeg, bmp.", path)
            }
            Self::Capture(CaptureError::LoadFailed { path }) => {
                format!("Could not load image '{}'. Please check the file exists and is a supported format.", path)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
