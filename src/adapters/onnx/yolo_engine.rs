use std::path::Path;
use std::sync::Mutex;

use anyhow::Result;
use image::{imageops::FilterType, RgbImage};
use ndarray::{s, Array4, ArrayViewD, Axis, Ix3};
use ort::execution_providers::CUDAExecutionProvider;
use ort::session::Session;
use ort::value::Tensor;
use tracing::info;

use crate::application::ports::Detector;
use crate::domain::detection::RawDetection;
use crate::domain::errors::DetectorError;
use crate::domain::model::{ModelId, YoloParams};

/// YOLOv8-style detector on ONNX Runtime.
///
/// Expects a single output of shape `[1, 4 + classes, candidates]` with rows
/// `cx, cy, w, h, score_0, score_1, ...` in input-image pixels.
pub struct OnnxYoloEngine {
    // `Session::run` needs exclusive access, so concurrent sessions queue here.
    session: Mutex<Session>,
    params: YoloParams,
}

impl OnnxYoloEngine {
    pub fn load(model: &ModelId, params: YoloParams, intra_threads: usize) -> Result<Self> {
        let mut builder = Session::builder()?.with_intra_threads(intra_threads)?;

        // CUDA is optional: registered when available, CPU otherwise.
        let cuda = CUDAExecutionProvider::default().build();
        if let Ok(builder_with_cuda) = builder.clone().with_execution_providers([cuda]) {
            builder = builder_with_cuda;
        }

        let session = builder.commit_from_file(Path::new(&model.onnx_path))?;
        info!(
            model = %model.name,
            input_size = params.input_size,
            iou = params.iou_threshold,
            max_det = params.max_detections,
            "ONNX model loaded"
        );

        Ok(Self { session: Mutex::new(session), params })
    }

    fn infer(&self, rgb: &RgbImage, conf_threshold: f32) -> Result<Vec<RawDetection>, DetectorError> {
        let input = preprocess(rgb, self.params.input_size);
        let input_tensor = Tensor::from_array(input).map_err(inference_error)?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| DetectorError::Unavailable("ONNX session lock poisoned".into()))?;
        let outputs = session.run(ort::inputs![input_tensor]).map_err(inference_error)?;
        let output = outputs[0].try_extract_array::<f32>().map_err(inference_error)?;

        let candidates = decode_candidates(
            output,
            rgb.width(),
            rgb.height(),
            self.params.input_size,
            conf_threshold,
        )?;
        Ok(non_max_suppression(candidates, self.params.iou_threshold, self.params.max_detections))
    }
}

impl Detector for OnnxYoloEngine {
    fn detect(&self, image: &RgbImage, confidence_threshold: f32) -> Result<Vec<RawDetection>, DetectorError> {
        self.infer(image, confidence_threshold)
    }
}

fn inference_error(e: ort::Error) -> DetectorError {
    DetectorError::Inference(e.to_string())
}

/// Resize to `imgsz × imgsz` and lay out as normalized NCHW.
fn preprocess(rgb: &RgbImage, input_size: u32) -> Array4<f32> {
    let imgsz = input_size as usize;
    let resized = image::imageops::resize(rgb, input_size, input_size, FilterType::Triangle);

    let mut input = Array4::<f32>::zeros((1, 3, imgsz, imgsz));
    for (x, y, pixel) in resized.enumerate_pixels() {
        input[[0, 0, y as usize, x as usize]] = pixel[0] as f32 / 255.0;
        input[[0, 1, y as usize, x as usize]] = pixel[1] as f32 / 255.0;
        input[[0, 2, y as usize, x as usize]] = pixel[2] as f32 / 255.0;
    }
    input
}

/// Best class per candidate, kept when its score beats the threshold. Boxes are
/// mapped back to source pixels and clamped to the frame.
fn decode_candidates(
    output: ArrayViewD<'_, f32>,
    frame_width: u32,
    frame_height: u32,
    input_size: u32,
    conf_threshold: f32,
) -> Result<Vec<RawDetection>, DetectorError> {
    let output = output
        .into_dimensionality::<Ix3>()
        .map_err(|e| DetectorError::OutputShape(e.to_string()))?;
    let view = output.index_axis(Axis(0), 0);
    if view.shape()[0] < 5 {
        return Err(DetectorError::OutputShape(format!(
            "expected at least 5 rows per candidate, got {}",
            view.shape()[0]
        )));
    }

    let num_candidates = view.shape()[1];
    let fw = frame_width as f32;
    let fh = frame_height as f32;
    let sx = fw / input_size as f32;
    let sy = fh / input_size as f32;

    let mut detections = Vec::new();
    for i in 0..num_candidates {
        let scores = view.slice(s![4.., i]);
        let (class_id, max_score) = scores
            .iter()
            .enumerate()
            .fold((0usize, f32::MIN), |best, (c, &score)| if score > best.1 { (c, score) } else { best });

        if max_score > conf_threshold {
            let cx = view[[0, i]];
            let cy = view[[1, i]];
            let w = view[[2, i]];
            let h = view[[3, i]];

            detections.push(RawDetection {
                x1: ((cx - w / 2.0) * sx).clamp(0.0, fw),
                y1: ((cy - h / 2.0) * sy).clamp(0.0, fh),
                x2: ((cx + w / 2.0) * sx).clamp(0.0, fw),
                y2: ((cy + h / 2.0) * sy).clamp(0.0, fh),
                class_id,
                confidence: max_score,
            });
        }
    }
    Ok(detections)
}

/// Greedy per-class NMS. Output is sorted by confidence, highest first.
fn non_max_suppression(mut dets: Vec<RawDetection>, iou_threshold: f32, max_detections: usize) -> Vec<RawDetection> {
    dets.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep: Vec<RawDetection> = Vec::new();
    for det in dets {
        if keep.len() >= max_detections {
            break;
        }
        let suppressed = keep
            .iter()
            .any(|k| k.class_id == det.class_id && k.iou(&det) > iou_threshold);
        if !suppressed {
            keep.push(det);
        }
    }
    keep
}
