use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SlothError>;

/// Errors raised while reading Sloth annotations or writing training records
#[derive(Debug, Error)]
pub enum SlothError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("json parse error at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed record #{index} ({filename}): {source}")]
    MalformedRecord {
        index: usize,
        filename: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("label '{label}' is not in the label catalog")]
    MissingLabel { label: String },
    #[error("label '{label}' appears more than once in the label list")]
    DuplicateLabel { label: String },
    #[error("unsupported image format {format} for {path}, only PNG and JPEG can be recorded")]
    UnsupportedImageFormat { path: PathBuf, format: String },
    #[error("image error at {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("{first} and {second} would both be resized to {target}")]
    ResizeConflict {
        first: String,
        second: String,
        target: String,
    },
    #[error("image {path} has a zero dimension")]
    EmptyImage { path: PathBuf },
    #[error("failed to write record file {path}: {source}")]
    Record {
        path: PathBuf,
        #[source]
        source: tfrecord::Error,
    },
    #[error("invalid split: {0}")]
    InvalidSplit(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl SlothError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SlothError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        SlothError::Image {
            path: path.into(),
            source,
        }
    }
}
