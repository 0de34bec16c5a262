use crate::types::SlothAnnotation;

/// Bounding box with corners normalized to [0, 1] by the image dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedBox {
    pub xmin: f32,
    pub ymin: f32,
    pub xmax: f32,
    pub ymax: f32,
}

impl NormalizedBox {
    /// Normalize a pixel box against a `width` x `height` image.
    ///
    /// Sloth lets a box be drawn slightly past the image border, and the
    /// training framework rejects coordinates outside [0, 1], so every
    /// corner is cut at the image edges. Both dimensions must be non-zero.
    pub fn from_pixels(annotation: &SlothAnnotation, width: u32, height: u32) -> Self {
        let width = f64::from(width);
        let height = f64::from(height);

        let normalized = Self {
            xmin: bounds(annotation.x / width),
            ymin: bounds(annotation.y / height),
            xmax: bounds((annotation.x + annotation.width) / width),
            ymax: bounds((annotation.y + annotation.height) / height),
        };

        debug_assert!(
            normalized.is_valid(),
            "box outside [0, 1] after clamping: {:?}",
            normalized
        );
        normalized
    }

    pub fn is_valid(&self) -> bool {
        [self.xmin, self.ymin, self.xmax, self.ymax]
            .iter()
            .all(|v| (0.0..=1.0).contains(v))
    }
}

// max(min(v, 1), 0); f64::min/max also map NaN into range where clamp would not
fn bounds(value: f64) -> f32 {
    value.min(1.0).max(0.0) as f32
}
