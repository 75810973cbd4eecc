//! Fakes shared by the unit tests.

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use base64::{prelude::BASE64_STANDARD, Engine};
use image::{ImageFormat, RgbImage};

use crate::application::ports::Detector;
use crate::domain::{detection::RawDetection, errors::DetectorError};

type Script = Box<dyn Fn(&RgbImage) -> Result<Vec<RawDetection>, DetectorError> + Send + Sync>;

pub struct ScriptedDetector {
    script: Script,
    calls: AtomicUsize,
    thresholds: Mutex<Vec<f32>>,
}

impl ScriptedDetector {
    pub fn new(
        script: impl Fn(&RgbImage) -> Result<Vec<RawDetection>, DetectorError> + Send + Sync + 'static,
    ) -> Self {
        Self { script: Box::new(script), calls: AtomicUsize::new(0), thresholds: Mutex::new(Vec::new()) }
    }

    pub fn fixed(detections: Vec<RawDetection>) -> Self {
        Self::new(move |_| Ok(detections.clone()))
    }

    pub fn failing() -> Self {
        Self::new(|_| Err(DetectorError::Inference("model crashed".into())))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn thresholds(&self) -> Vec<f32> {
        self.thresholds.lock().unwrap().clone()
    }
}

impl Detector for ScriptedDetector {
    fn detect(&self, image: &RgbImage, threshold: f32) -> Result<Vec<RawDetection>, DetectorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.thresholds.lock().unwrap().push(threshold);
        (self.script)(image)
    }
}

pub fn det(class_id: usize, confidence: f32, bbox: (f32, f32, f32, f32)) -> RawDetection {
    RawDetection { x1: bbox.0, y1: bbox.1, x2: bbox.2, y2: bbox.3, class_id, confidence }
}

/// The three detections from the reference scenario: a car, a bus and a class-9 object.
pub fn scenario_detections() -> Vec<RawDetection> {
    vec![
        det(2, 0.91, (10.0, 10.0, 50.0, 50.0)),
        det(5, 0.77, (100.0, 100.0, 300.0, 300.0)),
        det(9, 0.60, (0.0, 0.0, 5.0, 5.0)),
    ]
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    RgbImage::new(width, height).write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

pub fn png_base64(width: u32, height: u32) -> String {
    BASE64_STANDARD.encode(png_bytes(width, height))
}
