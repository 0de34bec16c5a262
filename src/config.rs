use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// Convert a Sloth JSON annotation file into TensorFlow Object Detection records.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Sloth JSON annotation file
    #[arg(short = 'j', long = "json", default_value = "sloth.json")]
    pub json: PathBuf,

    /// Folder the image filenames are relative to (defaults to the JSON file's folder)
    #[arg(short = 'b', long = "base_dir")]
    pub base_dir: Option<PathBuf>,

    /// Folder for tf_label_map.pbtxt and the record files (defaults to the JSON file's folder)
    #[arg(short = 'o', long = "output_dir")]
    pub output_dir: Option<PathBuf>,

    /// Proportion of the dataset to use for training
    #[arg(long = "train_size", default_value_t = 0.8, value_parser = validate_size)]
    pub train_size: f64,

    /// Proportion of the dataset to use for validation, the remainder goes to testing
    #[arg(long = "val_size", default_value_t = 0.2, value_parser = validate_size)]
    pub val_size: f64,

    /// Seed for random shuffling
    #[arg(long = "seed", default_value_t = 0)]
    pub seed: u64,

    /// Keep the order of the JSON file instead of shuffling
    #[arg(long = "no_shuffle")]
    pub no_shuffle: bool,

    /// Only consider the first N labeled images (after shuffling)
    #[arg(long = "limit")]
    pub limit: Option<usize>,

    /// Shrink images whose longer side exceeds this many pixels
    #[arg(long = "max_size", default_value_t = 600)]
    pub max_size: u32,

    /// Never resize images
    #[arg(long = "no_resize")]
    pub no_resize: bool,

    /// Id of the first label: `one` for TensorFlow, `zero` for YOLO-style ids
    #[arg(long = "label_index", value_enum, default_value = "one")]
    pub label_index: LabelIndex,

    /// Fixed, ordered label list; labels are discovered from the JSON file when empty
    #[arg(use_value_delimiter = true)]
    pub label_list: Vec<String>,
}

impl Args {
    /// Resize threshold, `None` when resizing is disabled
    pub fn resize_limit(&self) -> Option<u32> {
        if self.no_resize || self.max_size == 0 {
            None
        } else {
            Some(self.max_size)
        }
    }
}

/// Drop Sloth entries whose image no longer exists and print the remaining JSON.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct FilterArgs {
    /// Sloth JSON annotation file
    #[arg(short = 'j', long = "json", default_value = "sloth.json")]
    pub json: PathBuf,

    /// Folder the image filenames are relative to
    #[arg(short = 'b', long = "base_dir", default_value = ".")]
    pub base_dir: PathBuf,

    /// Classes whose annotations are removed
    #[arg(long = "ignore", use_value_delimiter = true)]
    pub ignore: Vec<String>,

    /// Write the filtered JSON here instead of stdout
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

/// Delete all but every Nth file in a capture folder.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct PruneArgs {
    /// Folder holding the captured files
    #[arg(short = 'd', long = "dir")]
    pub dir: PathBuf,

    /// Keep one file out of this many
    #[arg(short = 'n', long = "keep_every", default_value_t = 10)]
    pub keep_every: usize,

    /// Only report what would be deleted
    #[arg(long = "dry_run")]
    pub dry_run: bool,
}

// Origin of the integer class ids written to records and the label map
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum LabelIndex {
    /// First label gets id 0 (YOLO style)
    Zero,
    /// First label gets id 1 (TensorFlow reserves 0 for background)
    #[default]
    One,
}

impl LabelIndex {
    pub fn offset(self) -> usize {
        match self {
            LabelIndex::Zero => 0,
            LabelIndex::One => 1,
        }
    }
}

// Validate that the size is between 0.0 and 1.0
pub fn validate_size(s: &str) -> Result<f64, String> {
    match f64::from_str(s) {
        Ok(val) if (0.0..=1.0).contains(&val) => Ok(val),
        _ => Err("SIZE must be between 0.0 and 1.0".to_string()),
    }
}
