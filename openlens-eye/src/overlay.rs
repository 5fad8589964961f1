//! Detection overlay drawing

use crate::error::VisionError;
use crate::models::DetectedObject;
use opencv::core::{Mat, Point, Rect, Scalar};
use opencv::imgproc;

/// Draw each detection onto the frame: a green box with a
/// `"label confidence"` caption above it.
pub fn draw_detections(frame: &mut Mat, detections: &[DetectedObject]) -> Result<(), VisionError> {
    let color = Scalar::new(0.0, 255.0, 0.0, 0.0); // BGR green

    for detection in detections {
        let (x, y, w, h) = detection.bbox;
        let rect = Rect::new(x as i32, y as i32, w as i32, h as i32);
        imgproc::rectangle(frame, rect, color, 2, imgproc::LINE_8, 0)?;

        let caption = format!("{} {:.2}", detection.class_name, detection.confidence);
        let origin = Point::new(x as i32, (y as i32 - 10).max(10));
        imgproc::put_text(
            frame,
            &caption,
            origin,
            imgproc::FONT_HERSHEY_SIMPLEX,
            0.5,
            color,
            2,
            imgproc::LINE_8,
            false,
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Scalar, CV_8UC3};
    use opencv::prelude::*;

    #[test]
    fn test_draw_detections_on_blank_frame() {
        let mut frame =
            Mat::new_rows_cols_with_default(480, 640, CV_8UC3, Scalar::all(0.0)).unwrap();
        let detections = vec![DetectedObject {
            class_id: 0,
            class_name: "person".to_string(),
            confidence: 0.9,
            bbox: (100.0, 100.0, 80.0, 160.0),
        }];

        draw_detections(&mut frame, &detections).unwrap();

        // The box edge must have left green pixels behind
        let px: &opencv::core::Vec3b = frame.at_2d(100, 100).unwrap();
        assert_eq!(px[1], 255);
    }

    #[test]
    fn test_draw_no_detections_is_noop() {
        let mut frame =
            Mat::new_rows_cols_with_default(48, 64, CV_8UC3, Scalar::all(0.0)).unwrap();
        draw_detections(&mut frame, &[]).unwrap();
        let px: &opencv::core::Vec3b = frame.at_2d(10, 10).unwrap();
        assert_eq!(px[1], 0);
    }
}
