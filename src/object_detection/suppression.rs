use crate::annotations::detection::{Candidate, Detection};
use crate::annotations::label_table::LabelTable;
use itertools::Itertools;
use tracing::debug;

/// Non maximum suppression is a way of removing duplicate detections.
///
/// Candidates are partitioned by class and suppressed independently per
/// partition; two different species may legitimately overlap, so cross-class
/// overlap is never suppressed. Within a class the highest scoring candidate
/// is kept and every remaining candidate overlapping it by more than
/// `iou_threshold` is removed, repeating until the partition is empty. Ties
/// in score keep their decode order, and the final list is grouped by
/// ascending class index, so identical input always yields identical output.
pub fn non_maximum_suppression(
    candidates: Vec<Candidate>,
    iou_threshold: f32,
    labels: &LabelTable,
) -> Vec<Detection> {
    let total = candidates.len();
    let per_class = candidates
        .into_iter()
        .into_group_map_by(|candidate| candidate.class_index);

    let mut detections: Vec<Detection> = Vec::new();
    for (class_index, mut class_candidates) in
        per_class.into_iter().sorted_by_key(|entry| entry.0)
    {
        class_candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        let mut suppressed = vec![false; class_candidates.len()];
        for current in 0..class_candidates.len() {
            if suppressed[current] {
                continue;
            }
            let kept = &class_candidates[current];
            detections.push(Detection {
                label: labels.resolve(class_index),
                score: kept.score,
                bbox: kept.bbox,
            });
            for other in current + 1..class_candidates.len() {
                if suppressed[other] {
                    continue;
                }
                let iou = kept
                    .bbox
                    .intersection_over_union(&class_candidates[other].bbox);
                if iou > iou_threshold {
                    suppressed[other] = true;
                }
            }
        }
    }
    debug!(
        kept = detections.len(),
        candidates = total,
        "suppressed duplicate detections"
    );
    detections
}
