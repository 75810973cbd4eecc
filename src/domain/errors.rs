use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("operation failed: {0}")]
    OperationFailed(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Failure reported by a detector backend.
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("unexpected model output: {0}")]
    OutputShape(String),
    #[error("detector unavailable: {0}")]
    Unavailable(String),
}

/// Failure while turning one inbound message into an outbound record.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("frame payload is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("expected a text frame, got {len} bytes of binary data")]
    NotText { len: usize },
    #[error("frame bytes are not a decodable image: {0}")]
    ImageDecode(#[from] image::ImageError),
    #[error("decoded image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error(transparent)]
    Inference(#[from] DetectorError),
    #[error("failed to serialize frame result: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl FrameError {
    /// Envelope and image errors only cost the current frame. Everything else
    /// ends the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FrameError::Encoding(_)
                | FrameError::NotText { .. }
                | FrameError::ImageDecode(_)
                | FrameError::EmptyImage { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("receive failed: {0}")]
    Receive(String),
    #[error("send failed: {0}")]
    Send(String),
}

/// Reason a session was torn down by the handler.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Frame(FrameError),
    #[error("frame worker aborted: {0}")]
    Worker(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;

    #[test]
    fn decode_errors_are_recoverable() {
        let bad_b64 = base64::prelude::BASE64_STANDARD.decode("@@@").unwrap_err();
        assert!(FrameError::from(bad_b64).is_recoverable());
        assert!(FrameError::NotText { len: 3 }.is_recoverable());
        assert!(FrameError::EmptyImage { width: 0, height: 4 }.is_recoverable());

        let bad_image = image::load_from_memory(&[]).unwrap_err();
        assert!(FrameError::from(bad_image).is_recoverable());
    }

    #[test]
    fn inference_errors_end_the_session() {
        let err = FrameError::from(DetectorError::Inference("boom".into()));
        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "inference failed: boom");
    }
}
