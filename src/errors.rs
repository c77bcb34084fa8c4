use thiserror::Error;

/// A set of custom errors for more informative error handling.
///
/// Every pipeline stage fails fast and hands its error to the immediate
/// caller; no stage substitutes an empty detection list on failure. None of
/// these are fatal to the process: a failed call leaves the inference session
/// usable for the next photo.
#[derive(Debug, Error)]
pub enum DetectionError {
    /// The source image cannot be preprocessed.
    #[error("invalid image dimensions {width}x{height}, both sides must be positive")]
    InvalidInput { width: u32, height: u32 },

    /// The native runtime rejected the input or failed internally.
    #[error("inference failed: {0}")]
    Inference(#[from] ort::Error),

    /// The raw output tensor does not match the channel/candidate contract.
    #[error("malformed model output: {reason}")]
    MalformedOutput { reason: String },
}
