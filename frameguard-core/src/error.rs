use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the frame-manifest integrity engine.
///
/// Container-level failures (`Decode`, `Encode`) abort the current call.
/// `FrameProcessing` is recovered locally by the pipelines: the offending
/// frame is skipped and the stream continues.
#[derive(Debug, Error)]
pub enum Error {
    /// The video container cannot be opened or probed.
    #[error("decode error: {0}")]
    Decode(String),

    /// The output container cannot be opened or finished.
    #[error("encode error: {0}")]
    Encode(String),

    /// A stored manifest does not parse.
    #[error("malformed manifest at line {line}: {message}")]
    ManifestFormat { line: usize, message: String },

    /// A single frame failed to transform.
    #[error("frame processing error: {0}")]
    FrameProcessing(String),

    /// A required external tool is not on PATH.
    #[error("tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Create an encode error.
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode(message.into())
    }

    /// Create a manifest format error for the given 1-based line number.
    pub fn manifest_format(line: usize, message: impl Into<String>) -> Self {
        Self::ManifestFormat {
            line,
            message: message.into(),
        }
    }

    /// Create a per-frame processing error.
    pub fn frame(message: impl Into<String>) -> Self {
        Self::FrameProcessing(message.into())
    }

    /// Create a tool not found error.
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }
}
