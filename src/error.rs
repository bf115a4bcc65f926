/// Error type shared by the canonicalizer and the segment store

/// Everything that can go wrong in a store or URL operation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SegmentError {
    #[error("Stored segments are not valid JSON: {0}")]
    StorageRead(String),
    #[error("Failed to write segments: {0}")]
    StorageWrite(String),
    #[error("Storage is not available: {0}")]
    StorageUnavailable(String),
    #[error("Segment name must not be empty")]
    EmptyName,
    #[error("Segment name is {0} characters, the limit is 100")]
    NameTooLong(usize),
    #[error("No segment found for {0}")]
    NotFound(String),
    #[error("Invalid playback time: {0} seconds")]
    InvalidTime(f64),
    #[error("No video on this page")]
    NoVideo,
    #[error("Invalid URL {0}")]
    InvalidUrl(String),
    #[error("Failed to serialize segments: {0}")]
    Serialize(String),
}

pub type Result<T> = std::result::Result<T, SegmentError>;
