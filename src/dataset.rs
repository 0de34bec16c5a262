use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::Args;
use crate::error::{Result, SlothError};
use crate::types::{LabeledEntry, SlothImage, SplitData};

// Allow decimal rounding when checking that the fractions sum to at most 1
const FRACTION_TOLERANCE: f64 = 1e-6;

/// How to partition labeled images into train/validate/test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitConfig {
    pub train: f64,
    pub validate: f64,
    pub shuffle: bool,
    pub limit: Option<usize>,
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            train: 0.8,
            validate: 0.2,
            shuffle: true,
            limit: None,
            seed: 0,
        }
    }
}

impl SplitConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            train: args.train_size,
            validate: args.val_size,
            shuffle: !args.no_shuffle,
            limit: args.limit,
            seed: args.seed,
        }
    }

    pub fn ensure_valid(&self) -> Result<()> {
        for (name, value) in [("train", self.train), ("validate", self.validate)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SlothError::InvalidSplit(format!(
                    "{} fraction {} is outside [0, 1]",
                    name, value
                )));
            }
        }
        if self.train + self.validate > 1.0 + FRACTION_TOLERANCE {
            return Err(SlothError::InvalidSplit(format!(
                "train ({}) + validate ({}) exceeds 1",
                self.train, self.validate
            )));
        }
        Ok(())
    }
}

/// Pair each image that has at least one annotation with its annotations,
/// keeping file order
pub fn labeled_entries(images: &[SlothImage]) -> Vec<LabeledEntry> {
    images
        .iter()
        .filter(|image| !image.annotations.is_empty())
        .map(|image| (image.filename.clone(), image.annotations.clone()))
        .collect()
}

/// Shuffle (optionally) and split the entries into training, validation,
/// and testing sets, e.g. 70% / 10% / remaining 20%
pub fn split_annotations(mut entries: Vec<LabeledEntry>, config: &SplitConfig) -> Result<SplitData> {
    config.ensure_valid()?;

    if config.shuffle {
        let mut rng = StdRng::seed_from_u64(config.seed);
        entries.shuffle(&mut rng);
    }

    if let Some(limit) = config.limit {
        entries.truncate(limit);
    }

    let n = entries.len();
    let train_end = fraction_len(config.train, n).min(n);
    let validate_end = (train_end + fraction_len(config.validate, n)).min(n);

    let test = entries.split_off(validate_end);
    let validate = entries.split_off(train_end);
    let train = entries;

    info!(
        "Split {} images into {} train, {} validate, {} test",
        n,
        train.len(),
        validate.len(),
        test.len()
    );

    Ok(SplitData {
        train,
        validate,
        test,
    })
}

fn fraction_len(fraction: f64, n: usize) -> usize {
    (fraction * n as f64).ceil() as usize
}
