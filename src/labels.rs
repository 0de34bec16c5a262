//! Label catalog: the ordered list of class names and their integer ids

use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::LabelIndex;
use crate::error::{Result, SlothError};
use crate::types::SlothImage;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelCatalog {
    labels: Vec<String>,
}

impl LabelCatalog {
    /// Collect every class used by any annotation, sorted so ids don't depend
    /// on the order annotations appear in the file
    pub fn from_images(images: &[SlothImage]) -> Self {
        let labels: BTreeSet<&str> = images
            .iter()
            .flat_map(|image| image.annotations.iter())
            .map(|annotation| annotation.class.as_str())
            .collect();

        Self {
            labels: labels.into_iter().map(str::to_string).collect(),
        }
    }

    /// Use a fixed label list as given, e.g. to train on one dataset and
    /// evaluate on a subset of its classes in another
    pub fn from_list(labels: Vec<String>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(labels.len());
        for label in &labels {
            if !seen.insert(label.as_str()) {
                return Err(SlothError::DuplicateLabel {
                    label: label.clone(),
                });
            }
        }
        Ok(Self { labels })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Integer id of `label`, e.g. `c` in `[a, b, c]` is 3 when one-indexed
    pub fn index_of(&self, label: &str, origin: LabelIndex) -> Result<usize> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|pos| pos + origin.offset())
            .ok_or_else(|| SlothError::MissingLabel {
                label: label.to_string(),
            })
    }

    /// Render the catalog in the `label_map.pbtxt` block format
    pub fn to_label_map(&self, origin: LabelIndex) -> String {
        let mut content = String::with_capacity(self.labels.len() * 32);
        for (i, label) in self.labels.iter().enumerate() {
            content.push_str(&format!(
                "item {{\n  id: {}\n  name: '{}'\n}}\n",
                i + origin.offset(),
                label
            ));
        }
        content
    }
}

/// Write the label/integer mapping used by the training pipeline
pub fn write_label_map(catalog: &LabelCatalog, origin: LabelIndex, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| SlothError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(catalog.to_label_map(origin).as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| SlothError::io(path, e))
}
