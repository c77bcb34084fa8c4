use crate::errors::DetectionError;
use ndarray::Array4;
use ort::inputs;
use ort::session::Session;
use ort::value::TensorRef;
use std::path::Path;
use std::sync::Mutex;

/// The inference runtime's output for a single photo, exactly as returned.
///
/// Nothing about the structural shape is guaranteed by contract, only that the
/// buffer holds `num_channels * num_candidates` floats for one image. The
/// output normalizer is the sole consumer and validates the shape once, so
/// nothing downstream has to.
#[derive(Clone, Debug, PartialEq)]
pub struct RawTensor {
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

/// An onnxruntime inference session.
///
/// The detector is a wrapper around an ONNX inference session that handles
/// running the model on hardware. The session is constructed once, owned
/// explicitly by its caller, and released when dropped. The native execution
/// context is not assumed reentrant, so `run` serializes callers behind a
/// mutex.
pub struct OrtInferenceSession {
    session: Mutex<Session>,
}

impl OrtInferenceSession {
    pub fn new(model_path: &Path) -> Result<Self, DetectionError> {
        let session = Session::builder()?.commit_from_file(model_path)?;
        Ok(Self {
            session: Mutex::new(session),
        })
    }

    /// Executes one forward pass, blocking the calling thread.
    ///
    /// A failure surfaces exactly once to the caller and leaves the session
    /// usable for the next call; retrying is the caller's decision.
    pub fn run(&self, input: Array4<f32>) -> Result<RawTensor, DetectionError> {
        let mut session = self
            .session
            .lock()
            // A caller that panicked mid-inference must not take the session
            // down with it for every later photo.
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let input_tensor = TensorRef::from_array_view(input.view())?;
        let outputs = session.run(inputs!["images" => input_tensor])?;
        let (shape, data) = outputs["output0"].try_extract_tensor::<f32>()?;
        Ok(RawTensor {
            shape: shape.iter().map(|&d| d as usize).collect(),
            data: data.to_vec(),
        })
    }
}
