use std::{fmt, path::PathBuf};

/// The main error type for the pixplot crate
#[derive(Debug)]
pub enum PixplotError {
    /// Error occurred while reading or decoding an image
    ImageDecode(image::ImageError),

    /// Error occurred while writing or encoding an image
    ImageEncode(image::ImageError),

    /// Error occurred during I/O operations (file read/write)
    Io(std::io::Error),

    /// The output path does not name an image format the codec can write
    UnsupportedFormat(PathBuf),

    /// The chart output path names no backend this build can draw with
    UnsupportedChartFormat {
        path: PathBuf,
        reason: &'static str,
    },

    /// Error reported by the chart backend while drawing
    Plot(String),

    /// Error occurred while parsing a plot configuration
    Config(String),
}

impl fmt::Display for PixplotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixplotError::ImageDecode(e) => write!(f, "Image decode error: {}", e),
            PixplotError::ImageEncode(e) => write!(f, "Image encode error: {}", e),
            PixplotError::Io(e) => write!(f, "I/O error: {}", e),
            PixplotError::UnsupportedFormat(path) => {
                write!(f, "Unsupported image format for '{}'", path.display())
            }
            PixplotError::UnsupportedChartFormat { path, reason } => {
                write!(f, "Cannot write a chart to '{}': {}", path.display(), reason)
            }
            PixplotError::Plot(msg) => write!(f, "Plot error: {}", msg),
            PixplotError::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for PixplotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PixplotError::ImageDecode(e) | PixplotError::ImageEncode(e) => Some(e),
            PixplotError::Io(e) => Some(e),
            PixplotError::UnsupportedFormat(_)
            | PixplotError::UnsupportedChartFormat { .. }
            | PixplotError::Plot(_)
            | PixplotError::Config(_) => None,
        }
    }
}

// From implementations for automatic conversion from common error types

impl From<image::ImageError> for PixplotError {
    fn from(err: image::ImageError) -> Self {
        // Distinguish between decode and encode errors based on the error kind
        match err {
            image::ImageError::Encoding(_) => PixplotError::ImageEncode(err),
            image::ImageError::IoError(e) => PixplotError::Io(e),
            _ => PixplotError::ImageDecode(err),
        }
    }
}

impl From<std::io::Error> for PixplotError {
    fn from(err: std::io::Error) -> Self {
        PixplotError::Io(err)
    }
}

impl From<json::Error> for PixplotError {
    fn from(err: json::Error) -> Self {
        PixplotError::Config(err.to_string())
    }
}

impl<E: std::error::Error + Send + Sync> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for PixplotError
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        PixplotError::Plot(err.to_string())
    }
}

impl PixplotError {
    /// Wrap an error raised by an image encoder.
    ///
    /// Anything but an I/O failure counts as an encode error, including
    /// `Unsupported` color types.
    pub fn encode(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => PixplotError::Io(e),
            _ => PixplotError::ImageEncode(err),
        }
    }
}

// Convenience type alias for Results using PixplotError
pub type Result<T = ()> = std::result::Result<T, PixplotError>;
