use crate::annotations::bounding_box::BoundingBox;
use crate::annotations::detection::Candidate;
use crate::object_detection::output_normalizer::ChannelMatrix;
use tracing::debug;

/// Channels 0-3 hold box geometry; class scores start after them.
pub const GEOMETRY_CHANNELS: usize = 4;

/// Boxes this thin after clamping carry no usable signal.
const MIN_BOX_SIDE: f32 = 1.0;

/// Decodes every candidate column of a [`ChannelMatrix`] into original-image
/// pixel space.
///
/// Channels 0-3 hold center-x, center-y, width and height in the model's
/// fixed input coordinate space. Every remaining channel is one class score;
/// this model family has no separate objectness channel, so the best class
/// score is the detection confidence. The confidence threshold is inclusive,
/// and an exact score tie between two classes resolves to the lower class
/// index. Surviving geometry is rescaled with an independent linear factor
/// per axis (which inverts the preprocessor's non-aspect-preserving stretch),
/// clamped to the image, and dropped entirely if thinner than one pixel.
pub fn decode_candidates(
    matrix: &ChannelMatrix,
    orig_width: u32,
    orig_height: u32,
    input_size: u32,
    confidence_threshold: f32,
) -> Vec<Candidate> {
    let scale_x = orig_width as f32 / input_size as f32;
    let scale_y = orig_height as f32 / input_size as f32;
    let num_classes = matrix.num_channels() - GEOMETRY_CHANNELS;

    let center_xs = matrix.channel(0);
    let center_ys = matrix.channel(1);
    let widths = matrix.channel(2);
    let heights = matrix.channel(3);

    let mut candidates: Vec<Candidate> = Vec::new();
    for i in 0..matrix.num_candidates() {
        let mut best_class = 0;
        let mut best_score = f32::NEG_INFINITY;
        for class_index in 0..num_classes {
            let score = matrix.channel(GEOMETRY_CHANNELS + class_index)[i];
            if score > best_score {
                best_class = class_index;
                best_score = score;
            }
        }
        if best_score < confidence_threshold {
            continue;
        }

        let cx = center_xs[i];
        let cy = center_ys[i];
        let w = widths[i];
        let h = heights[i];
        let left = cx - (w / 2.0);
        let top = cy - (h / 2.0);
        let right = left + w;
        let bottom = top + h;

        let bbox = BoundingBox::new(
            (left * scale_x).clamp(0.0, orig_width as f32),
            (top * scale_y).clamp(0.0, orig_height as f32),
            (right * scale_x).clamp(0.0, orig_width as f32),
            (bottom * scale_y).clamp(0.0, orig_height as f32),
        );
        // A negative model width flips the corners; such boxes are as
        // degenerate as sub-pixel ones and are dropped the same way.
        let Ok(bbox) = bbox else {
            continue;
        };
        if bbox.width() <= MIN_BOX_SIDE || bbox.height() <= MIN_BOX_SIDE {
            continue;
        }
        candidates.push(Candidate {
            class_index: best_class,
            score: best_score,
            bbox,
        });
    }
    debug!(
        candidates = candidates.len(),
        columns = matrix.num_candidates(),
        "decoded candidates above the confidence threshold"
    );
    candidates
}
