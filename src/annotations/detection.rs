use crate::annotations::bounding_box::BoundingBox;
use serde::{Deserialize, Serialize};

/// One decoded detection guess, before non-maximum suppression.
///
/// Candidates still carry the raw class index so suppression can partition
/// them per class; the box is already in original-image pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub class_index: usize,
    pub score: f32,
    pub bbox: BoundingBox,
}

/// A detection is what is produced as output from an object detection model.
///
/// A detection is a bounding box combined with a resolved class label and a
/// confidence score: a probability value that encodes the model's belief that
/// the detection is true. Detections are what the app draws over the photo
/// and what gets stored next to it, so they serialize.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Detection {
    pub label: String,
    pub score: f32,
    pub bbox: BoundingBox,
}
