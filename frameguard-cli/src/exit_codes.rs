//! Exit codes following sysexits.h conventions.
//!
//! These codes provide semantic meaning for different failure modes,
//! enabling scripts and CI systems to handle errors appropriately.

#![allow(dead_code)] // Constants may be used in future or for documentation

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// General error (catch-all).
pub const GENERAL_ERROR: i32 = 1;

/// Command line usage error (invalid arguments).
/// Maps to EX_USAGE from sysexits.h.
pub const USAGE_ERROR: i32 = 64;

/// Data format error (tampered or truncated candidate, bad manifest).
/// Maps to EX_DATAERR from sysexits.h.
pub const VERIFICATION_FAILED: i32 = 65;

/// Cannot open or decode an input file.
/// Maps to EX_NOINPUT from sysexits.h.
pub const INPUT_ERROR: i32 = 66;

/// Required tool unavailable (ffmpeg/ffprobe missing).
/// Maps to EX_UNAVAILABLE from sysexits.h.
pub const TOOL_UNAVAILABLE: i32 = 69;

/// I/O error (cannot write an output file).
/// Maps to EX_IOERR from sysexits.h.
pub const IO_ERROR: i32 = 74;

/// Represents an exit code with optional error context.
pub struct ExitCode {
    pub code: i32,
    pub message: Option<String>,
}

impl ExitCode {
    pub const fn success() -> Self {
        Self {
            code: SUCCESS,
            message: None,
        }
    }

    pub fn error(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
        }
    }

    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");

        // Classify error by inspecting the chain
        let code = if message.contains("tool not found") {
            TOOL_UNAVAILABLE
        } else if message.contains("tampered") || message.contains("Verification failed") {
            VERIFICATION_FAILED
        } else if message.contains("Failed to read")
            || message.contains("decode error")
            || message.contains("malformed manifest")
        {
            INPUT_ERROR
        } else if message.contains("Failed to write") || message.contains("encode error") {
            IO_ERROR
        } else {
            GENERAL_ERROR
        };

        Self {
            code,
            message: Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_common_failures() {
        let err = anyhow::anyhow!("tool not found: ffmpeg");
        assert_eq!(ExitCode::from_anyhow(&err).code, TOOL_UNAVAILABLE);

        let err = anyhow::anyhow!("Verification failed: 3 tampered frame(s)");
        assert_eq!(ExitCode::from_anyhow(&err).code, VERIFICATION_FAILED);

        let err = anyhow::anyhow!("Failed to read manifest file: x.manifest");
        assert_eq!(ExitCode::from_anyhow(&err).code, INPUT_ERROR);

        let err = anyhow::anyhow!("something else entirely");
        assert_eq!(ExitCode::from_anyhow(&err).code, GENERAL_ERROR);
    }
}
