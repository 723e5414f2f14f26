use std::path::PathBuf;
use thiserror::Error;

/// The main error type for labelscope operations.
#[derive(Debug, Error)]
pub enum LabelscopeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("Failed while listing {}: {source}", path.display())]
    DirectoryWalk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Split '{split}' not found: expected directory {}", path.display())]
    SplitNotFound { split: String, path: PathBuf },

    #[error("Failed to parse class manifest {}: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(
        "Class manifest {} declares nc={declared} but lists {found} name(s)",
        path.display()
    )]
    ClassCountMismatch {
        path: PathBuf,
        declared: usize,
        found: usize,
    },

    #[error("Class manifest {} lists class '{name}' more than once", path.display())]
    DuplicateClassName { path: PathBuf, name: String },

    #[error("Malformed label line {}:{line}: {message} (line: '{content}')", path.display())]
    MalformedLabelLine {
        path: PathBuf,
        line: usize,
        content: String,
        message: String,
    },

    #[error("Class index {index} is out of range for {class_count} class(es) ({context})")]
    ClassIndexOutOfRange {
        index: i64,
        class_count: usize,
        context: String,
    },

    #[error("Class '{class}' is missing from a per-split count map")]
    MissingClassKey { class: String },

    #[error("Failed to read image {}: {source}", path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write image {}: {source}", path.display())]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Cannot derive dataset paths from {}: {message}", path.display())]
    LayoutInvalid { path: PathBuf, message: String },

    #[error(
        "Validation failed: {images_without_label} image(s) without label, \
         {labels_without_image} label(s) without image"
    )]
    ValidationFailed {
        images_without_label: usize,
        labels_without_image: usize,
    },

    #[error("Unsupported output format: {0}")]
    UnsupportedOutput(String),

    #[error("Failed to serialize report: {0}")]
    ReportSerialize(#[from] serde_json::Error),
}
