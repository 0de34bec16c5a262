use log::{error, info, warn};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use tfrecord::ExampleWriter;

use crate::conversion::{prepare_record, EmitOptions, Prepared};
use crate::error::{Result, SlothError};
use crate::types::{LabeledEntry, ProcessingStats, SlothImage};
use crate::utils::create_progress_bar;

// Images prepared in parallel before their records are written in order;
// bounds how many encoded images are held in memory at once
const PREPARE_CHUNK_SIZE: usize = 32;

/// Read a Sloth JSON file, validating every record at the boundary so a
/// missing field is reported with the record it belongs to
pub fn read_sloth_json(path: &Path) -> Result<Vec<SlothImage>> {
    let file = File::open(path).map_err(|e| SlothError::io(path, e))?;
    let values: Vec<Value> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| SlothError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    let images = parse_sloth_images(values)?;
    info!("Loaded {} images from {}", images.len(), path.display());
    Ok(images)
}

/// Convert loosely-typed JSON records into `SlothImage`s
pub fn parse_sloth_images(values: Vec<Value>) -> Result<Vec<SlothImage>> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let filename = value
                .get("filename")
                .and_then(Value::as_str)
                .unwrap_or("<no filename>")
                .to_string();
            serde_json::from_value(value).map_err(|source| SlothError::MalformedRecord {
                index,
                filename,
                source,
            })
        })
        .collect()
}

/// Write Sloth JSON indented by four spaces
pub fn write_sloth_json<W: Write>(images: &[SlothImage], writer: W) -> serde_json::Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    images.serialize(&mut serializer)
}

/// Write one TFRecord file holding a record per usable image of `entries`.
///
/// Records keep the order of `entries`. A fatal error on any image aborts
/// the whole split.
pub fn write_record_file(
    path: &Path,
    entries: &[LabeledEntry],
    options: &EmitOptions,
    label: &str,
) -> Result<ProcessingStats> {
    let record_error = |source: tfrecord::Error| SlothError::Record {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = ExampleWriter::create(path).map_err(record_error)?;

    let mut stats = ProcessingStats::new();
    let pb = create_progress_bar(entries.len() as u64, label);

    for chunk in entries.chunks(PREPARE_CHUNK_SIZE) {
        let prepared: Vec<Result<Prepared>> = chunk
            .par_iter()
            .map(|(filename, annotations)| prepare_record(filename, annotations, options))
            .collect();

        for result in prepared {
            stats.increment_total();
            match result {
                Ok(Prepared::Record(record)) => {
                    if record.resized {
                        stats.increment_resized();
                    }
                    writer.send(record.to_example()).map_err(record_error)?;
                    stats.increment_written();
                }
                Ok(Prepared::SkippedAlpha(image_path)) => {
                    warn!("Skipping {} since it has an alpha channel", image_path.display());
                    stats.increment_skipped_alpha();
                }
                Err(e) => {
                    pb.abandon();
                    error!("Aborting {} split: {}", label, e);
                    return Err(e);
                }
            }
            pb.inc(1);
        }
    }

    writer.flush().map_err(record_error)?;
    pb.finish_with_message(format!("{} processing complete", label));
    Ok(stats)
}
