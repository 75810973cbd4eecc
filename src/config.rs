use anyhow::{ensure, Result};
use clap::Parser;

use crate::domain::category::BoxFilter;
use crate::domain::model::{ModelId, YoloParams};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MODEL_PATH: &str = "models/yolov8n.onnx";
const DEFAULT_MAX_FRAME_BYTES: usize = 16 * 1024 * 1024;

/// Runtime settings. Every flag can also come from the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "vehicle-counter", version, about = "Counts vehicles in frames streamed over WebSocket")]
pub struct ServerConfig {
    /// Address to bind.
    #[arg(long, env = "VEHICLE_COUNTER_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(long, env = "VEHICLE_COUNTER_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// YOLO ONNX model file.
    #[arg(long, env = "VEHICLE_COUNTER_MODEL", default_value = DEFAULT_MODEL_PATH)]
    pub model: String,

    /// Square model input size in pixels.
    #[arg(long, env = "VEHICLE_COUNTER_INPUT_SIZE", default_value_t = 640)]
    pub input_size: u32,

    /// IoU above which same-class boxes are merged.
    #[arg(long, env = "VEHICLE_COUNTER_IOU", default_value_t = 0.7)]
    pub iou_threshold: f32,

    #[arg(long, env = "VEHICLE_COUNTER_MAX_DETECTIONS", default_value_t = 300)]
    pub max_detections: usize,

    /// ONNX Runtime intra-op threads.
    #[arg(long, env = "VEHICLE_COUNTER_THREADS", default_value_t = 4)]
    pub intra_threads: usize,

    /// Which detections are sent back as boxes.
    #[arg(long, env = "VEHICLE_COUNTER_BOXES", value_enum, default_value_t = BoxFilter::Vehicles)]
    pub boxes: BoxFilter,

    /// Largest accepted inbound frame message, in bytes.
    #[arg(long, env = "VEHICLE_COUNTER_MAX_FRAME_BYTES", default_value_t = DEFAULT_MAX_FRAME_BYTES)]
    pub max_frame_bytes: usize,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.input_size > 0 && self.input_size % 32 == 0,
            "input size must be a positive multiple of 32, got {}",
            self.input_size
        );
        ensure!(
            self.iou_threshold > 0.0 && self.iou_threshold <= 1.0,
            "IoU threshold must be in (0, 1], got {}",
            self.iou_threshold
        );
        ensure!(self.max_detections > 0, "max detections must be positive");
        ensure!(self.intra_threads > 0, "intra-op threads must be positive");
        ensure!(self.max_frame_bytes > 0, "max frame bytes must be positive");
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn model_id(&self) -> ModelId {
        ModelId::from_path(&self.model)
    }

    pub fn yolo_params(&self) -> YoloParams {
        YoloParams {
            input_size: self.input_size,
            iou_threshold: self.iou_threshold,
            max_detections: self.max_detections,
        }
    }
}
