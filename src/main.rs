mod annotations;
mod errors;
mod image_utils;
mod object_detection;

use annotations::label_table::LabelTable;
use image_utils::image_io::read_image_as_rgb8;
use object_detection::frog_detector::FrogDetector;
use object_detection::ort_inference_session::OrtInferenceSession;
use serde_json::json;
use std::error::Error;
use std::path::Path;
use tracing::{info, warn};
use walkdir::WalkDir;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let model_path = Path::new("./data/models/frogfinder.onnx");
    let classes_path = Path::new("./data/model_metadata/frog-classes.txt");
    let photos_dir = Path::new("./data/photos");

    if !model_path.exists() {
        return Err(
            format!("Model path does not exist, or cannot be read: {:?}", model_path).into()
        );
    }
    let labels = if classes_path.exists() {
        LabelTable::from_classes_txt_file(classes_path)?
    } else {
        LabelTable::frog_species()
    };
    let session = OrtInferenceSession::new(model_path)?;
    let detector = FrogDetector::with_defaults(session, labels);
    info!(classes = detector.labels().len(), "detector ready");

    for entry in WalkDir::new(photos_dir).into_iter().filter_map(Result::ok) {
        let path = entry.path();
        let is_photo = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("jpg") | Some("jpeg") | Some("png")
        );
        if !is_photo {
            continue;
        }
        let image = match read_image_as_rgb8(path) {
            Ok(image) => image,
            Err(err) => {
                warn!(photo = %path.display(), %err, "skipping unreadable photo");
                continue;
            }
        };
        let detections = match detector.detect(&image) {
            Ok(detections) => detections,
            Err(err) => {
                warn!(photo = %path.display(), %err, "detection failed");
                continue;
            }
        };
        // The app stores the best-scoring hit with the photo and its location;
        // here it just goes to the log.
        match detections.iter().max_by(|a, b| a.score.total_cmp(&b.score)) {
            Some(best) => info!(
                photo = %path.display(),
                label = %best.label,
                score = best.score,
                left = best.bbox.left(),
                top = best.bbox.top(),
                right = best.bbox.right(),
                bottom = best.bbox.bottom(),
                "best detection"
            ),
            None => info!(photo = %path.display(), "no detections"),
        }
        println!(
            "{}",
            json!({
                "photo": path.display().to_string(),
                "detections": detections,
            })
        );
    }
    Ok(())
}
