use std::collections::BTreeMap;

/// A detection ready for display: class id replaced by its name,
/// confidence rounded to two decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub class_name: String,
    pub confidence: f64,
}

/// Per-frame counts and the boxes surfaced to the client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleTally {
    pub small_count: u32,
    pub big_count: u32,
    pub boxes: Vec<DetectionBox>,
}

impl VehicleTally {
    pub fn total_count(&self) -> u32 {
        self.small_count + self.big_count
    }

    /// "1 bus, 2 car" style line for logs.
    pub fn summary(&self) -> String {
        let mut counts = BTreeMap::new();
        for b in &self.boxes {
            *counts.entry(b.class_name.as_str()).or_insert(0) += 1;
        }
        counts
            .iter()
            .map(|(label, count)| format!("{} {}", count, label))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
