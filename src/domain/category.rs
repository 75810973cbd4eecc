use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Size bucket a vehicle class is counted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleCategory {
    Small,
    Big,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleClass {
    pub class_id: usize,
    pub name: String,
    pub category: VehicleCategory,
}

/// Which detections are surfaced to the client as boxes.
///
/// Counting is the same under both policies: only classified vehicles count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum BoxFilter {
    /// Only classes present in the category table.
    #[default]
    Vehicles,
    /// Every detection the model reports.
    All,
}

/// Fixed class id → (name, category) mapping. Built once at startup.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    classes: BTreeMap<usize, VehicleClass>,
}

impl CategoryTable {
    /// COCO vehicle classes: car and motorcycle are small, bus and truck are big.
    pub fn coco_vehicles() -> Self {
        let entries = [
            (2, "car", VehicleCategory::Small),
            (3, "motorcycle", VehicleCategory::Small),
            (5, "bus", VehicleCategory::Big),
            (7, "truck", VehicleCategory::Big),
        ];
        let classes = entries
            .into_iter()
            .map(|(class_id, name, category)| {
                (class_id, VehicleClass { class_id, name: name.to_string(), category })
            })
            .collect();
        Self { classes }
    }

    pub fn get(&self, class_id: usize) -> Option<&VehicleClass> {
        self.classes.get(&class_id)
    }

    pub fn category(&self, class_id: usize) -> Option<VehicleCategory> {
        self.get(class_id).map(|c| c.category)
    }

    /// Name for any class id: vehicle table first, then the COCO label list.
    pub fn display_name(&self, class_id: usize) -> &str {
        match self.get(class_id) {
            Some(class) => &class.name,
            None => COCO_CLASSES.get(class_id).copied().unwrap_or("unknown"),
        }
    }

    /// Entries in class id order.
    pub fn classes(&self) -> impl Iterator<Item = &VehicleClass> {
        self.classes.values()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::coco_vehicles()
    }
}

pub const COCO_CLASSES: [&str; 80] = [
    "person", "bicycle", "car", "motorcycle", "airplane", "bus", "train", "truck", "boat",
    "traffic light", "fire hydrant", "stop sign", "parking meter", "bench", "bird", "cat", "dog",
    "horse", "sheep", "cow", "elephant", "bear", "zebra", "giraffe", "backpack", "umbrella",
    "handbag", "tie", "suitcase", "frisbee", "skis", "snowboard", "sports ball", "kite",
    "baseball bat", "baseball glove", "skateboard", "surfboard", "tennis racket", "bottle",
    "wine glass", "cup", "fork", "knife", "spoon", "bowl", "banana", "apple", "sandwich",
    "orange", "broccoli", "carrot", "hot dog", "pizza", "donut", "cake", "chair", "couch",
    "potted plant", "bed", "dining table", "toilet", "tv", "laptop", "mouse", "remote",
    "keyboard", "cell phone", "microwave", "oven", "toaster", "sink", "refrigerator", "book",
    "clock", "vase", "scissors", "teddy bear", "hair drier", "toothbrush",
];
