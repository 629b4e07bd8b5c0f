//! Byte-stream to line framing with an overflow reset policy.

use tracing::warn;

/// Hard cap on one accumulated line, sized to the largest expected single
/// JSON message. Overflow drops the buffer rather than stalling the link.
pub const MAX_LINE_BYTES: usize = 16 * 1024;

pub struct LineFramer {
    buf: Vec<u8>,
    cap: usize,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::with_capacity(MAX_LINE_BYTES)
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buf: Vec::new(),
            cap,
        }
    }

    // One byte in, maybe one line out. CR is dropped; the completed line is
    // decoded lossily and trimmed. No parsing happens here.
    pub fn feed(&mut self, byte: u8) -> Option<String> {
        match byte {
            b'\n' => {
                let line = String::from_utf8_lossy(&self.buf).trim().to_string();
                self.buf.clear();
                Some(line)
            }
            b'\r' => None,
            _ => {
                self.buf.push(byte);
                if self.buf.len() > self.cap {
                    warn!(cap = self.cap, "line overflow, discarding buffer");
                    self.buf.clear();
                }
                None
            }
        }
    }

    // Feed a read chunk; returns whatever lines it completed.
    pub fn feed_slice(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        for &b in chunk {
            if let Some(line) = self.feed(b) {
                lines.push(line);
            }
        }
        lines
    }

    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new()
    }
}
