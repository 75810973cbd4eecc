use crate::application::dto::{BoxRecord, FrameResult};
use crate::domain::{errors::FrameError, stream::VehicleTally};

#[derive(Debug, Clone, Copy, Default)]
pub struct ResultEncoder;

impl ResultEncoder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, tally: &VehicleTally, frame_width: u32, frame_height: u32) -> FrameResult {
        FrameResult {
            small: tally.small_count,
            big: tally.big_count,
            total: tally.total_count(),
            boxes: tally
                .boxes
                .iter()
                .map(|b| BoxRecord {
                    x1: b.x1,
                    y1: b.y1,
                    x2: b.x2,
                    y2: b.y2,
                    class_name: b.class_name.clone(),
                    confidence: b.confidence,
                })
                .collect(),
            frame_width,
            frame_height,
        }
    }

    pub fn encode(&self, result: &FrameResult) -> Result<String, FrameError> {
        Ok(serde_json::to_string(result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stream::DetectionBox;
    use serde_json::json;

    #[test]
    fn wire_record_uses_client_field_names() {
        let tally = VehicleTally {
            small_count: 1,
            big_count: 0,
            boxes: vec![DetectionBox {
                x1: 10.0,
                y1: 12.5,
                x2: 50.0,
                y2: 60.0,
                class_name: "car".into(),
                confidence: 0.91,
            }],
        };
        let encoder = ResultEncoder::new();
        let text = encoder.encode(&encoder.build(&tally, 640, 480)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(
            value,
            json!({
                "small": 1,
                "big": 0,
                "total": 1,
                "boxes": [{ "x1": 10.0, "y1": 12.5, "x2": 50.0, "y2": 60.0, "class": "car", "confidence": 0.91 }],
                "frame_width": 640,
                "frame_height": 480
            })
        );
    }

    #[test]
    fn empty_tally_encodes_zero_counts() {
        let encoder = ResultEncoder::new();
        let result = encoder.build(&VehicleTally::default(), 32, 16);
        assert_eq!((result.small, result.big, result.total), (0, 0, 0));
        assert!(result.boxes.is_empty());
        assert_eq!((result.frame_width, result.frame_height), (32, 16));
    }
}
