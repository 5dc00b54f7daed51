/// Failures raised by the tracking analysis.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TrackingError {
    /// Both captures share the same whole-second timestamp.
    #[error("Captures {first} and {last} have identical timestamps, drift rate is undefined")]
    DegenerateTimeDelta { first: usize, last: usize },

    /// A frame without any detected source.
    #[error("Frame {frame_index} has no detected sources")]
    InsufficientSources { frame_index: usize },

    /// The requested star finder is neither DAO nor IRAF.
    #[error("Unknown star finder: {0}")]
    UnknownDetector(String),

    /// The requested correspondence strategy does not exist.
    #[error("Unknown correspondence strategy: {0}")]
    UnknownCorrespondence(String),

    #[error("Invalid DATE-OBS timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Frame index {index} out of range for {num_frames} frames")]
    FrameIndexOutOfRange { index: usize, num_frames: usize },
}
