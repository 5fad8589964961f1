//! Utility functions for vision preprocessing

use crate::error::VisionError;
use opencv::core::{Size, Vec3b};
use opencv::imgproc;
use opencv::prelude::*;

/// Resize a BGR frame to `target_width` x `target_height`, convert to RGB,
/// normalize to [0, 1] and lay the pixels out in CHW order.
pub fn mat_to_chw_tensor(
    mat: &Mat,
    target_width: u32,
    target_height: u32,
) -> Result<Vec<f32>, VisionError> {
    if target_width == 0 || target_height == 0 {
        return Err(VisionError::Processing(
            "Target dimensions cannot be zero".to_string(),
        ));
    }

    if mat.empty() {
        return Err(VisionError::Processing("Empty input frame".to_string()));
    }

    let mut resized = Mat::default();
    imgproc::resize(
        mat,
        &mut resized,
        Size::new(target_width as i32, target_height as i32),
        0.0,
        0.0,
        imgproc::INTER_LINEAR,
    )?;

    let mut rgb = Mat::default();
    imgproc::cvt_color(&resized, &mut rgb, imgproc::COLOR_BGR2RGB, 0)?;

    let pixels: &[Vec3b] = rgb.data_typed()?;
    let (w, h) = (target_width as usize, target_height as usize);
    if pixels.len() != w * h {
        return Err(VisionError::Processing(format!(
            "Unexpected pixel count: {} for {}x{}",
            pixels.len(),
            w,
            h
        )));
    }

    let mut chw = vec![0.0f32; 3 * w * h];
    for (i, px) in pixels.iter().enumerate() {
        for c in 0..3 {
            chw[c * w * h + i] = px[c] as f32 / 255.0;
        }
    }

    Ok(chw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Scalar, CV_8UC3};

    #[test]
    fn test_tensor_shape_and_normalization() {
        let mat =
            Mat::new_rows_cols_with_default(4, 4, CV_8UC3, Scalar::new(255.0, 255.0, 255.0, 0.0))
                .unwrap();
        let tensor = mat_to_chw_tensor(&mat, 4, 4).unwrap();
        assert_eq!(tensor.len(), 3 * 4 * 4);
        for value in &tensor {
            assert!((value - 1.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_channel_order_is_rgb() {
        // Solid blue in BGR becomes (0, 0, 1) in RGB planes
        let mat =
            Mat::new_rows_cols_with_default(2, 2, CV_8UC3, Scalar::new(255.0, 0.0, 0.0, 0.0))
                .unwrap();
        let tensor = mat_to_chw_tensor(&mat, 2, 2).unwrap();
        let plane = 2 * 2;
        assert!(tensor[..plane].iter().all(|v| *v == 0.0)); // R
        assert!(tensor[plane..2 * plane].iter().all(|v| *v == 0.0)); // G
        assert!(tensor[2 * plane..].iter().all(|v| (*v - 1.0).abs() < f32::EPSILON)); // B
    }

    #[test]
    fn test_zero_target_dimension_rejected() {
        let mat =
            Mat::new_rows_cols_with_default(2, 2, CV_8UC3, Scalar::all(0.0)).unwrap();
        assert!(mat_to_chw_tensor(&mat, 0, 4).is_err());
    }

    #[test]
    fn test_empty_frame_rejected() {
        let mat = Mat::default();
        assert!(mat_to_chw_tensor(&mat, 4, 4).is_err());
    }
}
