//! Video container I/O: probing, the frame stream reader, and the encoding
//! sink.
//!
//! Decoding and encoding go through the `ffmpeg`/`ffprobe` CLI tools over
//! raw RGB24 pipes, so the engine sees every frame as a plain byte buffer of
//! `width * height * 3` bytes in presentation order.

mod probe;
mod reader;
mod sink;

pub use probe::probe_stream;
pub use reader::FrameStream;
pub use sink::FrameSink;

use serde::{Deserialize, Serialize};

/// Samples per pixel. Frames are always RGB24.
pub const CHANNELS: usize = 3;

/// Metadata of a decoded video stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamInfo {
    pub width: u32,
    pub height: u32,
    /// Frames per second, rounded to the nearest integer.
    pub frame_rate: u32,
}

impl StreamInfo {
    /// Byte length of one raw frame at this geometry.
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * CHANNELS
    }
}

/// One decoded frame.
///
/// Identity is purely positional: `index` is the frame's position in the
/// source stream, nothing else is persisted about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub index: usize,
    pub data: Vec<u8>,
}
