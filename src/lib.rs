//! Sloth to TensorFlow Object Detection converter
//!
//! This library converts the JSON annotations produced by the Sloth labeling
//! tool into TFRecord files for object detection training, and provides the
//! small dataset chores around it: dropping stale Sloth entries and thinning
//! out captured images.

pub mod config;
pub mod conversion;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod io;
pub mod labels;
pub mod prune;
pub mod tf_dataset;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use config::{Args, FilterArgs, LabelIndex, PruneArgs};
pub use dataset::{labeled_entries, split_annotations, SplitConfig};
pub use error::{Result, SlothError};
pub use filter::remove_deleted;
pub use geometry::NormalizedBox;
pub use io::{read_sloth_json, write_sloth_json};
pub use labels::{write_label_map, LabelCatalog};
pub use prune::keep_nth_files;
pub use tf_dataset::process_dataset;
pub use types::{ProcessingStats, SlothAnnotation, SlothImage, SplitData};
