use base64::{prelude::BASE64_STANDARD, Engine};

use crate::domain::{errors::FrameError, frame::DecodedFrame};

/// Turns a base64 text payload into an RGB frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameDecoder;

impl FrameDecoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&self, payload: &str) -> Result<DecodedFrame, FrameError> {
        let bytes = BASE64_STANDARD.decode(strip_data_url(payload.trim()))?;
        let image = image::load_from_memory(&bytes)?;
        DecodedFrame::new(image.to_rgb8())
    }
}

/// Browsers hand out `data:image/jpeg;base64,<payload>`; keep only the payload.
fn strip_data_url(payload: &str) -> &str {
    if !payload.starts_with("data:") {
        return payload;
    }
    match payload.split_once(',') {
        Some((_, rest)) => rest,
        None => payload,
    }
}
