use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Custom error types for the photo-catalog library.
///
/// Variants fall into two groups that callers are expected to treat
/// differently. Contract violations (`InvalidArgument`, `FolderNotRegistered`,
/// `FileNotFound`, `DirectoryNotFound`, `TargetIsDirectory`) abort the current
/// operation. Expected absences (missing source file during creation,
/// duplicate-by-identity, disabled video analysis, read-only destination) are
/// not errors at all and surface as `Ok(None)` / `Ok(false)` from the services.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding/encoding error
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// A required argument was empty or missing. The parameter name is kept
    /// because sync results embed this text verbatim.
    #[error("Value cannot be null. (Parameter '{0}')")]
    InvalidArgument(&'static str),

    /// The folder was never registered with the repository
    #[error("Folder not registered in the catalog: {0}")]
    FolderNotRegistered(PathBuf),

    /// File not found error
    #[error("File does not exist: {0}")]
    FileNotFound(PathBuf),

    /// A directory component of the path does not exist
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// The destination of a file operation is an existing directory
    #[error("Target is a directory, not a file: {0}")]
    TargetIsDirectory(PathBuf),

    /// Arithmetic overflow during thumbnail scaling
    #[error("Overflow during processing: {0}")]
    Overflow(String),

    /// Object-list table (de)serialization error
    #[error("Catalog storage error: {0}")]
    Json(#[from] serde_json::Error),

    /// Thumbnail blob (de)serialization error
    #[error("Blob storage error: {0}")]
    Blob(#[from] bincode::Error),

    /// Video frame extraction error
    #[error("Video processing error: {0}")]
    Video(String),
}
