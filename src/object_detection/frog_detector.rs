use crate::annotations::detection::Detection;
use crate::annotations::label_table::LabelTable;
use crate::errors::DetectionError;
use crate::image_utils::preprocessing::preprocess_image;
use crate::object_detection::decoder::{GEOMETRY_CHANNELS, decode_candidates};
use crate::object_detection::ort_inference_session::OrtInferenceSession;
use crate::object_detection::output_normalizer::normalize_output;
use crate::object_detection::suppression::non_maximum_suppression;
use image::RgbImage;
use tracing::debug;

/// Detections scoring below this are discarded (inclusive threshold).
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.25;
/// Same-class boxes overlapping above this are treated as duplicates.
pub const DEFAULT_IOU_THRESHOLD: f32 = 0.45;
/// Input resolution of the deployed model.
pub const DEFAULT_INPUT_SIZE: u32 = 640;

/// The full photo-to-detections pipeline.
///
/// Owns the inference session, the label table and the tuning thresholds.
/// Each `detect` call is one synchronous pass: preprocess, run the model,
/// canonicalize the raw output, decode candidates, suppress duplicates.
/// There is no internal retry and no caching of results; a failed call
/// leaves the session usable for the next one.
pub struct FrogDetector {
    session: OrtInferenceSession,
    labels: LabelTable,
    input_size: u32,
    confidence_threshold: f32,
    iou_threshold: f32,
}

impl FrogDetector {
    pub fn new(
        session: OrtInferenceSession,
        labels: LabelTable,
        input_size: u32,
        confidence_threshold: f32,
        iou_threshold: f32,
    ) -> Self {
        FrogDetector {
            session,
            labels,
            input_size,
            confidence_threshold,
            iou_threshold,
        }
    }

    /// A detector with the deployment defaults.
    pub fn with_defaults(session: OrtInferenceSession, labels: LabelTable) -> Self {
        FrogDetector::new(
            session,
            labels,
            DEFAULT_INPUT_SIZE,
            DEFAULT_CONFIDENCE_THRESHOLD,
            DEFAULT_IOU_THRESHOLD,
        )
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Runs the whole pipeline on one photo.
    pub fn detect(&self, image: &RgbImage) -> Result<Vec<Detection>, DetectionError> {
        let (orig_width, orig_height) = image.dimensions();
        let input = preprocess_image(image, self.input_size)?;
        let raw = self.session.run(input)?;
        let matrix = normalize_output(&raw, GEOMETRY_CHANNELS + self.labels.len())?;
        let candidates = decode_candidates(
            &matrix,
            orig_width,
            orig_height,
            self.input_size,
            self.confidence_threshold,
        );
        let detections = non_maximum_suppression(candidates, self.iou_threshold, &self.labels);
        debug!(
            detections = detections.len(),
            width = orig_width,
            height = orig_height,
            "finished detection pass"
        );
        Ok(detections)
    }
}
