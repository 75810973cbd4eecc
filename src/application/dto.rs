use serde::{Deserialize, Serialize};

use crate::domain::category::{VehicleCategory, VehicleClass};

/// Outbound record, one per processed frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameResult {
    pub small: u32,
    pub big: u32,
    pub total: u32,
    pub boxes: Vec<BoxRecord>,
    pub frame_width: u32,
    pub frame_height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxRecord {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    #[serde(rename = "class")]
    pub class_name: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub class_id: usize,
    pub name: String,
    pub category: VehicleCategory,
}

impl From<&VehicleClass> for CategoryEntry {
    fn from(c: &VehicleClass) -> Self {
        Self { class_id: c.class_id, name: c.name.clone(), category: c.category }
    }
}
