//! Encoding sink: marked `Frame`s -> ffmpeg rawvideo stdin -> output
//! container.

use std::io::Write;
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};

use super::{Frame, StreamInfo};
use crate::error::{Error, Result};

/// Re-encodes a sequence of frames into a new video container, mirroring the
/// source stream's frame rate and resolution.
///
/// [`FrameSink::finish`] must be called to flush the encoder and observe its
/// exit status; a sink dropped without finishing kills the encoder child.
pub struct FrameSink {
    child: Child,
    stdin: Option<ChildStdin>,
    frame_len: usize,
    frames_written: u64,
}

impl FrameSink {
    /// Open the output container for writing.
    pub fn create(path: &Path, info: &StreamInfo) -> Result<Self> {
        let size = format!("{}x{}", info.width, info.height);
        let rate = info.frame_rate.to_string();

        let mut child = Command::new("ffmpeg")
            .args(["-v", "error", "-y"])
            .args(["-f", "rawvideo", "-pix_fmt", "rgb24"])
            .args(["-s", &size, "-r", &rate])
            .args(["-i", "-"])
            .args(["-an", "-c:v", "mpeg4", "-pix_fmt", "yuv420p"])
            .arg(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found("ffmpeg")
                } else {
                    Error::encode(format!("failed to spawn encoder: {}", e))
                }
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::encode("ffmpeg stdin unavailable"))?;

        tracing::debug!(path = %path.display(), size = %size, rate = %rate, "opened encoding sink");

        Ok(Self {
            child,
            stdin: Some(stdin),
            frame_len: info.frame_len(),
            frames_written: 0,
        })
    }

    /// Write one frame to the output stream.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        if frame.data.len() != self.frame_len {
            return Err(Error::frame(format!(
                "frame {} has {} bytes, sink expects {}",
                frame.index,
                frame.data.len(),
                self.frame_len
            )));
        }

        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| Error::encode("sink already finished"))?;
        stdin
            .write_all(&frame.data)
            .map_err(|e| Error::encode(format!("failed to write frame {}: {}", frame.index, e)))?;

        self.frames_written += 1;
        Ok(())
    }

    /// Close the input pipe, wait for the encoder, and report how many frames
    /// were written.
    pub fn finish(mut self) -> Result<u64> {
        // Closing stdin signals end of stream to the encoder.
        drop(self.stdin.take());

        let status = self
            .child
            .wait()
            .map_err(|e| Error::encode(format!("failed to wait for encoder: {}", e)))?;
        if !status.success() {
            return Err(Error::encode(format!("encoder exited with {}", status)));
        }

        Ok(self.frames_written)
    }
}

impl Drop for FrameSink {
    fn drop(&mut self) {
        if self.stdin.is_some() {
            // Abandoned without finish(); don't leave the encoder running.
            drop(self.stdin.take());
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
    }
}
