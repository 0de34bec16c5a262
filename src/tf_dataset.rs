use log::info;
use std::path::{Path, PathBuf};

use crate::config::Args;
use crate::conversion::{check_resize_targets, EmitOptions};
use crate::dataset::{labeled_entries, split_annotations, SplitConfig};
use crate::error::{Result, SlothError};
use crate::io::{read_sloth_json, write_record_file};
use crate::labels::{write_label_map, LabelCatalog};
use crate::types::ProcessingStats;
use crate::utils::create_output_directory;

pub const LABEL_MAP_FILE: &str = "tf_label_map.pbtxt";
pub const TRAIN_RECORD_FILE: &str = "tftrain.record";
pub const VALID_RECORD_FILE: &str = "tfvalid.record";
pub const TEST_RECORD_FILE: &str = "tftest.record";

/// Paths of everything a conversion run writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub label_map: PathBuf,
    pub train: PathBuf,
    pub validate: PathBuf,
    pub test: PathBuf,
}

impl OutputFiles {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            label_map: dir.join(LABEL_MAP_FILE),
            train: dir.join(TRAIN_RECORD_FILE),
            validate: dir.join(VALID_RECORD_FILE),
            test: dir.join(TEST_RECORD_FILE),
        }
    }
}

/// Sloth JSON to TFRecord pipeline: label catalog, label map, split, one
/// record file per split, summary
pub fn process_dataset(args: &Args) -> Result<ProcessingStats> {
    let json_dir = args
        .json
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let base_dir = args.base_dir.clone().unwrap_or_else(|| json_dir.clone());
    let output_dir = args.output_dir.clone().unwrap_or(json_dir);

    let split_config = SplitConfig::from_args(args);
    split_config.ensure_valid()?;

    let images = read_sloth_json(&args.json)?;

    let catalog = if args.label_list.is_empty() {
        LabelCatalog::from_images(&images)
    } else {
        LabelCatalog::from_list(args.label_list.clone())?
    };
    info!("Using {} labels: {:?}", catalog.len(), catalog.labels());

    create_output_directory(&output_dir).map_err(|e| SlothError::io(&output_dir, e))?;
    let outputs = OutputFiles::in_dir(&output_dir);
    write_label_map(&catalog, args.label_index, &outputs.label_map)?;
    info!("Saved label map to {}", outputs.label_map.display());

    let entries = labeled_entries(&images);
    if args.resize_limit().is_some() {
        check_resize_targets(&entries)?;
    }
    let split = split_annotations(entries, &split_config)?;

    let options = EmitOptions {
        base_dir: &base_dir,
        catalog: &catalog,
        origin: args.label_index,
        resize_limit: args.resize_limit(),
    };

    let mut stats = ProcessingStats::new();
    for (label, entries, path) in [
        ("Train", &split.train, &outputs.train),
        ("Valid", &split.validate, &outputs.validate),
        ("Test", &split.test, &outputs.test),
    ] {
        info!("Saving {} ({} images) to {}", label, entries.len(), path.display());
        let split_stats = write_record_file(path, entries, &options, label)?;
        stats.merge(&split_stats);
    }

    stats.print_summary();
    Ok(stats)
}
