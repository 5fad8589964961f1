//! Greedy overlap suppression for detector output

use crate::models::yolo::DetectedObject;

/// Greedy non-maximum suppression: keep the highest-confidence box per
/// overlapping cluster, suppress every remaining box whose IoU with a
/// kept box exceeds `iou_threshold`.
pub fn non_max_suppression(
    mut detections: Vec<DetectedObject>,
    iou_threshold: f32,
) -> Vec<DetectedObject> {
    if detections.is_empty() {
        return detections;
    }

    detections.retain(|d| d.confidence.is_finite() && d.confidence >= 0.0 && d.confidence <= 1.0);
    detections.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep = Vec::new();
    let mut suppressed = vec![false; detections.len()];

    for i in 0..detections.len() {
        if suppressed[i] {
            continue;
        }

        for j in (i + 1)..detections.len() {
            if suppressed[j] {
                continue;
            }

            if iou(&detections[i].bbox, &detections[j].bbox) > iou_threshold {
                suppressed[j] = true;
            }
        }

        keep.push(detections[i].clone());
    }

    keep
}

/// Intersection-over-union of two `(x, y, width, height)` boxes.
pub fn iou(bbox1: &(f32, f32, f32, f32), bbox2: &(f32, f32, f32, f32)) -> f32 {
    let (x1, y1, w1, h1) = bbox1;
    let (x2, y2, w2, h2) = bbox2;

    if !x1.is_finite() || !y1.is_finite() || !w1.is_finite() || !h1.is_finite()
        || !x2.is_finite() || !y2.is_finite() || !w2.is_finite() || !h2.is_finite()
    {
        return 0.0;
    }

    if *w1 < 0.0 || *h1 < 0.0 || *w2 < 0.0 || *h2 < 0.0 {
        return 0.0;
    }

    let inter_x_min = x1.max(*x2);
    let inter_y_min = y1.max(*y2);
    let inter_x_max = (x1 + w1).min(x2 + w2);
    let inter_y_max = (y1 + h1).min(y2 + h2);

    if inter_x_max <= inter_x_min || inter_y_max <= inter_y_min {
        return 0.0;
    }

    let inter_area = (inter_x_max - inter_x_min) * (inter_y_max - inter_y_min);
    let union_area = w1 * h1 + w2 * h2 - inter_area;

    if union_area <= 0.0 || !union_area.is_finite() {
        return 0.0;
    }

    let iou = inter_area / union_area;
    if iou.is_finite() && (0.0..=1.0).contains(&iou) {
        iou
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(confidence: f32, bbox: (f32, f32, f32, f32)) -> DetectedObject {
        DetectedObject {
            class_id: 0,
            class_name: "person".to_string(),
            confidence,
            bbox,
        }
    }

    #[test]
    fn test_iou_identical_boxes() {
        let a = (10.0, 10.0, 50.0, 50.0);
        assert!((iou(&a, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_iou_disjoint_boxes() {
        let a = (0.0, 0.0, 10.0, 10.0);
        let b = (100.0, 100.0, 10.0, 10.0);
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[test]
    fn test_iou_half_overlap() {
        let a = (0.0, 0.0, 10.0, 10.0);
        let b = (5.0, 0.0, 10.0, 10.0);
        // intersection 50, union 150
        assert!((iou(&a, &b) - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_iou_invalid_inputs() {
        let a = (0.0, 0.0, f32::NAN, 10.0);
        let b = (0.0, 0.0, 10.0, 10.0);
        assert_eq!(iou(&a, &b), 0.0);

        let c = (0.0, 0.0, -5.0, 10.0);
        assert_eq!(iou(&c, &b), 0.0);
    }

    #[test]
    fn test_nms_keeps_highest_confidence_per_cluster() {
        let detections = vec![
            det(0.6, (12.0, 12.0, 50.0, 50.0)),
            det(0.9, (10.0, 10.0, 50.0, 50.0)),
        ];
        let kept = non_max_suppression(detections, 0.4);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].confidence, 0.9);
    }

    #[test]
    fn test_nms_keeps_disjoint_boxes() {
        let detections = vec![
            det(0.9, (0.0, 0.0, 20.0, 20.0)),
            det(0.8, (200.0, 200.0, 20.0, 20.0)),
        ];
        let kept = non_max_suppression(detections, 0.4);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_nms_below_threshold_overlap_survives() {
        let a = det(0.9, (0.0, 0.0, 10.0, 10.0));
        let b = det(0.8, (9.0, 9.0, 10.0, 10.0)); // tiny corner overlap
        let kept = non_max_suppression(vec![a, b], 0.4);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_nms_drops_non_finite_confidence() {
        let detections = vec![det(f32::NAN, (0.0, 0.0, 10.0, 10.0))];
        assert!(non_max_suppression(detections, 0.4).is_empty());
    }

    #[test]
    fn test_nms_empty_input() {
        assert!(non_max_suppression(Vec::new(), 0.4).is_empty());
    }
}
