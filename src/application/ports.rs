use async_trait::async_trait;
use image::RgbImage;

use crate::domain::{
    detection::RawDetection,
    errors::{DetectorError, DomainResult, TransportError},
    model::ModelId,
};

/// Object detector shared by every session.
///
/// `detect` is a blocking call. Implementations must be safe to call from
/// several sessions at once, serializing internally if the model requires it.
pub trait Detector: Send + Sync {
    fn detect(
        &self,
        image: &RgbImage,
        confidence_threshold: f32,
    ) -> Result<Vec<RawDetection>, DetectorError>;
}

#[async_trait]
pub trait ModelCatalogPort: Send + Sync {
    async fn validate_model(&self, model: &ModelId) -> DomainResult<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    Text(String),
    Binary(Vec<u8>),
}

/// One client connection as seen by the session loop.
#[async_trait]
pub trait FrameTransport: Send {
    /// Next data message. `Ok(None)` means the peer closed the connection.
    async fn recv(&mut self) -> Result<Option<InboundMessage>, TransportError>;

    async fn send(&mut self, record: String) -> Result<(), TransportError>;

    /// Best-effort release of the connection.
    async fn close(&mut self);
}
