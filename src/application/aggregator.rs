use crate::domain::{
    category::{BoxFilter, CategoryTable, VehicleCategory},
    detection::RawDetection,
    stream::{DetectionBox, VehicleTally},
};

/// Classifies one frame's detections into small and big vehicles.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    table: CategoryTable,
    filter: BoxFilter,
}

impl Aggregator {
    pub fn new(table: CategoryTable, filter: BoxFilter) -> Self {
        Self { table, filter }
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    /// Boxes keep the detector's order.
    pub fn aggregate(&self, detections: &[RawDetection]) -> VehicleTally {
        let mut tally = VehicleTally::default();

        for d in detections {
            let category = self.table.category(d.class_id);
            match category {
                Some(VehicleCategory::Small) => tally.small_count += 1,
                Some(VehicleCategory::Big) => tally.big_count += 1,
                None => {}
            }

            if category.is_none() && self.filter == BoxFilter::Vehicles {
                continue;
            }

            tally.boxes.push(DetectionBox {
                x1: d.x1,
                y1: d.y1,
                x2: d.x2,
                y2: d.y2,
                class_name: self.table.display_name(d.class_id).to_string(),
                confidence: round2(d.confidence),
            });
        }

        tally
    }
}

fn round2(value: f32) -> f64 {
    (f64::from(value) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{det, scenario_detections};
    use rstest::rstest;

    fn names(tally: &VehicleTally) -> Vec<&str> {
        tally.boxes.iter().map(|b| b.class_name.as_str()).collect()
    }

    #[test]
    fn reference_scenario_counts_car_and_bus() {
        let tally = Aggregator::default().aggregate(&scenario_detections());

        assert_eq!(tally.small_count, 1);
        assert_eq!(tally.big_count, 1);
        assert_eq!(tally.total_count(), 2);
        assert_eq!(names(&tally), vec!["car", "bus"]);
        assert_eq!(tally.boxes[0].confidence, 0.91);
        assert_eq!(tally.boxes[1].confidence, 0.77);
        assert_eq!(tally.boxes[1].x2, 300.0);
    }

    #[test]
    fn empty_detections_give_empty_tally() {
        let tally = Aggregator::default().aggregate(&[]);
        assert_eq!(tally, VehicleTally::default());
        assert_eq!(tally.total_count(), 0);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(4)]
    #[case(6)]
    #[case(9)]
    #[case(1000)]
    fn unclassified_classes_never_count(#[case] class_id: usize) {
        let tally = Aggregator::default().aggregate(&[det(class_id, 0.9, (0.0, 0.0, 1.0, 1.0))]);
        assert_eq!(tally.small_count + tally.big_count, 0);
        assert!(tally.boxes.is_empty());
    }

    #[test]
    fn all_filter_surfaces_every_box_but_counts_vehicles_only() {
        let aggregator = Aggregator::new(CategoryTable::default(), BoxFilter::All);
        let tally = aggregator.aggregate(&[
            det(0, 0.8, (0.0, 0.0, 1.0, 1.0)),
            det(7, 0.6, (0.0, 0.0, 2.0, 2.0)),
            det(412, 0.55, (0.0, 0.0, 3.0, 3.0)),
        ]);
        assert_eq!(names(&tally), vec!["person", "truck", "unknown"]);
        assert_eq!((tally.small_count, tally.big_count, tally.total_count()), (0, 1, 1));
    }

    #[test]
    fn order_follows_input_not_confidence() {
        let tally = Aggregator::default().aggregate(&[
            det(3, 0.51, (0.0, 0.0, 1.0, 1.0)),
            det(7, 0.99, (0.0, 0.0, 1.0, 1.0)),
            det(2, 0.75, (0.0, 0.0, 1.0, 1.0)),
        ]);
        assert_eq!(names(&tally), vec!["motorcycle", "truck", "car"]);
        assert_eq!((tally.small_count, tally.big_count), (2, 1));
    }

    #[rstest]
    #[case(0.914, 0.91)]
    #[case(0.915_1, 0.92)]
    #[case(0.5, 0.5)]
    #[case(1.0, 1.0)]
    fn confidence_rounds_to_two_decimals(#[case] raw: f32, #[case] expected: f64) {
        let tally = Aggregator::default().aggregate(&[det(2, raw, (0.0, 0.0, 1.0, 1.0))]);
        assert_eq!(tally.boxes[0].confidence, expected);
    }
}
