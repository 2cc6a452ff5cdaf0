//! Frame stream reader: ffmpeg rawvideo pipe -> ordered `Frame`s.

use std::io::Read;
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};

use super::{probe_stream, Frame, StreamInfo};
use crate::error::{Error, Result};

/// Lazy, finite, forward-only sequence of decoded frames.
///
/// Frames are yielded in presentation order as raw RGB24 buffers of
/// `info().frame_len()` bytes. The stream is not restartable: re-iterating
/// requires a fresh [`FrameStream::open`]. A decode failure mid-stream
/// truncates the sequence at that point; frames already yielded remain valid.
pub struct FrameStream {
    child: Child,
    stdout: ChildStdout,
    info: StreamInfo,
    next_index: usize,
    done: bool,
}

impl FrameStream {
    /// Probe the container and start decoding it.
    pub fn open(path: &Path) -> Result<Self> {
        let info = probe_stream(path)?;

        let mut child = Command::new("ffmpeg")
            .args(["-v", "error", "-i"])
            .arg(path)
            .args(["-f", "rawvideo", "-pix_fmt", "rgb24", "-"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found("ffmpeg")
                } else {
                    Error::Io(e)
                }
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::decode("ffmpeg stdout unavailable"))?;

        tracing::debug!(
            path = %path.display(),
            width = info.width,
            height = info.height,
            frame_rate = info.frame_rate,
            "opened frame stream"
        );

        Ok(Self {
            child,
            stdout,
            info,
            next_index: 0,
            done: false,
        })
    }

    /// Metadata of the stream being decoded.
    pub fn info(&self) -> StreamInfo {
        self.info
    }

    fn read_frame(&mut self) -> Option<Frame> {
        if self.done {
            return None;
        }

        let frame_len = self.info.frame_len();
        let mut data = vec![0u8; frame_len];
        let mut filled = 0;

        while filled < frame_len {
            match self.stdout.read(&mut data[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::warn!(frame = self.next_index, error = %e, "decode read failed, truncating stream");
                    self.done = true;
                    return None;
                }
            }
        }

        if filled == 0 {
            // Clean end of stream.
            self.done = true;
            return None;
        }
        if filled < frame_len {
            tracing::warn!(
                frame = self.next_index,
                got = filled,
                expected = frame_len,
                "partial frame at end of stream, truncating"
            );
            self.done = true;
            return None;
        }

        let frame = Frame {
            index: self.next_index,
            data,
        };
        self.next_index += 1;
        Some(frame)
    }
}

impl Iterator for FrameStream {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        self.read_frame()
    }
}

impl Drop for FrameStream {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
