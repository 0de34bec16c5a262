use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// A single labeled bounding box in pixel coordinates, anchored at its top-left corner
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SlothAnnotation {
    pub class: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Fields Sloth writes that the conversion does not use (e.g. `type`)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SlothAnnotation {
    pub fn new(class: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            class: class.into(),
            x,
            y,
            width,
            height,
            extra: Map::new(),
        }
    }
}

// One labeled image as exported by Sloth
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SlothImage {
    pub annotations: Vec<SlothAnnotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    pub filename: String,
}

impl SlothImage {
    pub fn new(filename: impl Into<String>, annotations: Vec<SlothAnnotation>) -> Self {
        Self {
            annotations,
            class: Some("image".to_string()),
            filename: filename.into(),
        }
    }
}

/// An image filename paired with its annotations, the unit the splitter works on
pub type LabeledEntry = (String, Vec<SlothAnnotation>);

// Struct to hold the split datasets for training, validation, and testing
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SplitData {
    pub train: Vec<LabeledEntry>,
    pub validate: Vec<LabeledEntry>,
    pub test: Vec<LabeledEntry>,
}

impl SplitData {
    pub fn len(&self) -> usize {
        self.train.len() + self.validate.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Struct to hold processing statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    pub total_images: usize,
    pub written_records: usize,
    pub resized_images: usize,
    pub skipped_alpha: usize,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_total(&mut self) {
        self.total_images += 1;
    }

    pub fn increment_written(&mut self) {
        self.written_records += 1;
    }

    pub fn increment_resized(&mut self) {
        self.resized_images += 1;
    }

    pub fn increment_skipped_alpha(&mut self) {
        self.skipped_alpha += 1;
    }

    pub fn merge(&mut self, other: &ProcessingStats) {
        self.total_images += other.total_images;
        self.written_records += other.written_records;
        self.resized_images += other.resized_images;
        self.skipped_alpha += other.skipped_alpha;
    }

    pub fn print_summary(&self) {
        log::info!("=== Processing Summary ===");
        log::info!("Total images: {}", self.total_images);
        log::info!("Records written: {}", self.written_records);
        log::info!("Images resized: {}", self.resized_images);
        if self.skipped_alpha > 0 {
            log::warn!(
                "Skipped {} of {} images with an alpha channel",
                self.skipped_alpha,
                self.total_images
            );
        }
    }
}
