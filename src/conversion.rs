use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use log::{debug, info};
use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tfrecord::{Example, Feature};

use crate::config::LabelIndex;
use crate::error::{Result, SlothError};
use crate::geometry::NormalizedBox;
use crate::labels::LabelCatalog;
use crate::types::{LabeledEntry, SlothAnnotation};
use crate::utils::infer_image_format;

/// Settings shared by every image of a run
#[derive(Debug, Clone, Copy)]
pub struct EmitOptions<'a> {
    pub base_dir: &'a Path,
    pub catalog: &'a LabelCatalog,
    pub origin: LabelIndex,
    /// Longer side above which images are shrunk, `None` keeps every image as is
    pub resize_limit: Option<u32>,
}

/// Everything written for one image, before it is turned into an `Example`
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRecord {
    pub filename: String,
    pub width: u32,
    pub height: u32,
    pub format: &'static str,
    pub encoded: Vec<u8>,
    pub boxes: Vec<NormalizedBox>,
    pub classes_text: Vec<String>,
    pub classes: Vec<i64>,
    pub resized: bool,
}

/// Outcome of preparing a single image
#[derive(Debug, Clone, PartialEq)]
pub enum Prepared {
    Record(TrainingRecord),
    SkippedAlpha(PathBuf),
}

impl TrainingRecord {
    /// Build the `tf.train.Example` using the Object Detection API field names
    pub fn to_example(&self) -> Example {
        let filename = self.filename.as_bytes().to_vec();
        let classes_text: Vec<Vec<u8>> = self
            .classes_text
            .iter()
            .map(|text| text.as_bytes().to_vec())
            .collect();

        let features = vec![
            ("image/height", Feature::from_i64_list(vec![i64::from(self.height)])),
            ("image/width", Feature::from_i64_list(vec![i64::from(self.width)])),
            ("image/filename", Feature::from_bytes_list(vec![filename.clone()])),
            ("image/source_id", Feature::from_bytes_list(vec![filename])),
            ("image/encoded", Feature::from_bytes_list(vec![self.encoded.clone()])),
            (
                "image/format",
                Feature::from_bytes_list(vec![self.format.as_bytes().to_vec()]),
            ),
            (
                "image/object/bbox/xmin",
                Feature::from_f32_iter(self.boxes.iter().map(|b| b.xmin)),
            ),
            (
                "image/object/bbox/xmax",
                Feature::from_f32_iter(self.boxes.iter().map(|b| b.xmax)),
            ),
            (
                "image/object/bbox/ymin",
                Feature::from_f32_iter(self.boxes.iter().map(|b| b.ymin)),
            ),
            (
                "image/object/bbox/ymax",
                Feature::from_f32_iter(self.boxes.iter().map(|b| b.ymax)),
            ),
            ("image/object/class/text", Feature::from_bytes_list(classes_text)),
            (
                "image/object/class/label",
                Feature::from_i64_list(self.classes.as_slice()),
            ),
        ];

        features
            .into_iter()
            .map(|(key, feature)| (key.to_string(), feature))
            .collect()
    }
}

/// Fail when two different images would be shrunk into the same
/// `_resized.jpg` file, e.g. `a.png` and `a.jpg`
pub fn check_resize_targets(entries: &[LabeledEntry]) -> Result<()> {
    let mut targets: HashMap<String, &str> = HashMap::with_capacity(entries.len());
    for (filename, _) in entries {
        let target = resized_filename(filename);
        match targets.get(&target) {
            Some(first) if *first != filename.as_str() => {
                return Err(SlothError::ResizeConflict {
                    first: first.to_string(),
                    second: filename.clone(),
                    target,
                });
            }
            Some(_) => {}
            None => {
                targets.insert(target, filename);
            }
        }
    }
    Ok(())
}

/// Load one annotated image and turn it into a training record.
///
/// PNG and JPEG images with an alpha channel are skipped rather than failing
/// the run. Other formats are only accepted when they get shrunk, since the
/// shrunk copy is always a JPEG.
/// Boxes are normalized against the original dimensions since that is what
/// was annotated, while the record carries the dimensions of the (possibly
/// resized) image that is actually embedded.
pub fn prepare_record(
    filename: &str,
    annotations: &[SlothAnnotation],
    options: &EmitOptions,
) -> Result<Prepared> {
    let image_path = options.base_dir.join(filename);
    debug!("Preparing {}", image_path.display());

    let original_bytes = fs::read(&image_path).map_err(|e| SlothError::io(&image_path, e))?;
    let image = image::load_from_memory(&original_bytes)
        .map_err(|e| SlothError::image(&image_path, e))?;

    let (orig_width, orig_height) = (image.width(), image.height());
    if orig_width == 0 || orig_height == 0 {
        return Err(SlothError::EmptyImage { path: image_path });
    }

    let new_size = resized_dimensions(orig_width, orig_height, options.resize_limit);
    match infer_image_format(&original_bytes) {
        Some("jpeg" | "png") => {
            if image.color().has_alpha() {
                return Ok(Prepared::SkippedAlpha(image_path));
            }
        }
        other if new_size.is_none() => {
            return Err(SlothError::UnsupportedImageFormat {
                path: image_path,
                format: other.unwrap_or("unknown").to_string(),
            })
        }
        _ => {}
    }

    let (record_name, encoded, width, height, resized) = match new_size {
        Some((width, height)) => {
            let record_name = resized_filename(filename);
            let resized_path = options.base_dir.join(&record_name);
            let encoded = write_resized(&image, width, height, &resized_path)?;
            info!(
                "Shrinking {} since {} > {}, new size: {}x{}, new name: {}",
                image_path.display(),
                orig_width.max(orig_height),
                options.resize_limit.unwrap_or_default(),
                width,
                height,
                resized_path.display()
            );
            (record_name, encoded, width, height, true)
        }
        None => (
            filename.to_string(),
            original_bytes,
            orig_width,
            orig_height,
            false,
        ),
    };

    let format = match infer_image_format(&encoded) {
        Some(format @ ("jpeg" | "png")) => format,
        other => {
            return Err(SlothError::UnsupportedImageFormat {
                path: options.base_dir.join(&record_name),
                format: other.unwrap_or("unknown").to_string(),
            })
        }
    };

    let mut boxes = Vec::with_capacity(annotations.len());
    let mut classes_text = Vec::with_capacity(annotations.len());
    let mut classes = Vec::with_capacity(annotations.len());
    for annotation in annotations {
        let class_id = options.catalog.index_of(&annotation.class, options.origin)?;
        classes.push(class_id as i64);
        classes_text.push(annotation.class.clone());
        boxes.push(NormalizedBox::from_pixels(annotation, orig_width, orig_height));
    }

    Ok(Prepared::Record(TrainingRecord {
        filename: record_name,
        width,
        height,
        format,
        encoded,
        boxes,
        classes_text,
        classes,
        resized,
    }))
}

/// New dimensions when the longer side exceeds `limit`, keeping the aspect ratio
pub fn resized_dimensions(width: u32, height: u32, limit: Option<u32>) -> Option<(u32, u32)> {
    let limit = limit?;
    if width.max(height) <= limit {
        return None;
    }

    let scale = |short: u32, long: u32| {
        ((f64::from(limit) / f64::from(long)) * f64::from(short))
            .round()
            .max(1.0) as u32
    };

    if width > height {
        Some((limit, scale(height, width)))
    } else {
        Some((scale(width, height), limit))
    }
}

/// `dir/name.png` becomes `dir/name_resized.jpg`
pub fn resized_filename(filename: &str) -> String {
    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}_resized.jpg", stem))
        .to_string_lossy()
        .into_owned()
}

// Encode the shrunk image as JPEG, save it next to the original and return
// the encoded bytes
fn write_resized(image: &DynamicImage, width: u32, height: u32, path: &Path) -> Result<Vec<u8>> {
    let resized = DynamicImage::ImageRgb8(image.to_rgb8()).resize_exact(
        width,
        height,
        FilterType::Lanczos3,
    );
    let mut encoded = Cursor::new(Vec::new());
    resized
        .write_to(&mut encoded, ImageFormat::Jpeg)
        .map_err(|e| SlothError::image(path, e))?;
    let encoded = encoded.into_inner();
    fs::write(path, &encoded).map_err(|e| SlothError::io(path, e))?;
    Ok(encoded)
}
