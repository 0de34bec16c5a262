use log::{debug, info};
use std::path::Path;

use crate::types::SlothImage;

/// Drop entries whose image file no longer exists under `base_dir`, and
/// remove annotations whose class is in `ignore_classes` from the rest.
///
/// Used after copying only part of a dataset so the copied images keep
/// their labels without being re-annotated.
pub fn remove_deleted(
    images: Vec<SlothImage>,
    base_dir: &Path,
    ignore_classes: &[String],
) -> Vec<SlothImage> {
    let total = images.len();
    let mut removed_annotations = 0;

    let kept: Vec<SlothImage> = images
        .into_iter()
        .filter(|image| {
            let exists = base_dir.join(&image.filename).exists();
            if !exists {
                debug!("Dropping {} since the image is gone", image.filename);
            }
            exists
        })
        .map(|mut image| {
            let before = image.annotations.len();
            image
                .annotations
                .retain(|annotation| !ignore_classes.contains(&annotation.class));
            removed_annotations += before - image.annotations.len();
            image
        })
        .collect();

    info!(
        "Kept {} of {} images, removed {} ignored annotations",
        kept.len(),
        total,
        removed_annotations
    );
    kept
}
