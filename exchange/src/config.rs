//! Configuration for frame encoding and decoding

/// Limits applied while encoding and decoding frames
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    /// Upper bound on the encoded size of a frame or a single payload
    pub max_frame_bytes: u64,
    /// Upper bound on the byte length of a single label
    pub max_label_len: usize,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            max_frame_bytes: 64 * 1024 * 1024,
            max_label_len: 256,
        }
    }
}

impl ExchangeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_frame_bytes(mut self, bytes: u64) -> Self {
        self.max_frame_bytes = bytes;
        self
    }

    pub fn with_max_label_len(mut self, len: usize) -> Self {
        self.max_label_len = len;
        self
    }

    /// Tight limits, useful when exercising the size checks.
    pub fn minimal() -> Self {
        Self {
            max_frame_bytes: 4096,
            max_label_len: 32,
        }
    }
}
