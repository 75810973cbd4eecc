use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::application::{
    aggregator::Aggregator,
    decoder::FrameDecoder,
    dto::FrameResult,
    encoder::ResultEncoder,
    ports::Detector,
};
use crate::domain::{errors::FrameError, model::CONFIDENCE_THRESHOLD};

/// Decode → detect → aggregate → encode for a single frame.
///
/// Holds no per-frame state, so one instance serves every session.
pub struct FramePipeline {
    decoder: FrameDecoder,
    detector: Arc<dyn Detector>,
    aggregator: Aggregator,
    encoder: ResultEncoder,
}

impl FramePipeline {
    pub fn new(detector: Arc<dyn Detector>, aggregator: Aggregator) -> Self {
        Self {
            decoder: FrameDecoder::new(),
            detector,
            aggregator,
            encoder: ResultEncoder::new(),
        }
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Runs every stage except the final serialization.
    pub fn analyze(&self, payload: &str) -> Result<FrameResult, FrameError> {
        let frame = self.decoder.decode(payload)?;

        let t_infer = Instant::now();
        let detections = self.detector.detect(frame.image(), CONFIDENCE_THRESHOLD)?;
        let infer_ms = t_infer.elapsed().as_secs_f32() * 1000.0;

        let tally = self.aggregator.aggregate(&detections);
        debug!(
            width = frame.width(),
            height = frame.height(),
            detections = detections.len(),
            infer_ms,
            "frame analyzed: [{}]",
            tally.summary()
        );

        Ok(self.encoder.build(&tally, frame.width(), frame.height()))
    }

    /// Full pipeline: the returned text is the record to send.
    pub fn process(&self, payload: &str) -> Result<String, FrameError> {
        let result = self.analyze(payload)?;
        self.encoder.encode(&result)
    }
}
