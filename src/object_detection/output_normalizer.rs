use crate::errors::DetectionError;
use crate::object_detection::ort_inference_session::RawTensor;
use ndarray::{Array2, ArrayView1};

/// Canonical channel-major form of one model output: `[channel][candidate]`.
///
/// Holds `4 + num_classes` channels of equal length, geometry first. Built
/// exactly once per inference call by [`normalize_output`]; downstream code
/// indexes it with no further shape or type checking.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelMatrix {
    channels: Array2<f32>,
}

impl ChannelMatrix {
    pub fn num_channels(&self) -> usize {
        self.channels.nrows()
    }

    pub fn num_candidates(&self) -> usize {
        self.channels.ncols()
    }

    /// All values of one channel, indexed by candidate.
    pub fn channel(&self, index: usize) -> ArrayView1<'_, f32> {
        self.channels.row(index)
    }
}

/// Reshapes and validates a raw runtime tensor into a [`ChannelMatrix`].
///
/// Different runtimes wrap the same `num_channels x num_candidates` payload in
/// different structural shapes; this function is the one place that variance
/// is absorbed. Leading batch dimensions of size 1 are stripped, the channel
/// count is checked against `expected_channels`, and the buffer length must
/// match the advertised shape exactly. Anything else fails with
/// `MalformedOutput` and produces no partial result.
pub fn normalize_output(
    raw: &RawTensor,
    expected_channels: usize,
) -> Result<ChannelMatrix, DetectionError> {
    let mut dims: &[usize] = &raw.shape;
    while dims.len() > 2 && dims[0] == 1 {
        dims = &dims[1..];
    }
    let (num_channels, num_candidates) = match dims {
        [channels, candidates] => (*channels, *candidates),
        _ => {
            return Err(DetectionError::MalformedOutput {
                reason: format!(
                    "expected a batch of one channel/candidate matrix, got shape {:?}",
                    raw.shape
                ),
            });
        }
    };
    if num_channels != expected_channels {
        return Err(DetectionError::MalformedOutput {
            reason: format!(
                "expected {} channels, got {} (shape {:?})",
                expected_channels, num_channels, raw.shape
            ),
        });
    }
    if raw.data.len() != num_channels * num_candidates {
        return Err(DetectionError::MalformedOutput {
            reason: format!(
                "shape {:?} advertises {} values, buffer holds {}",
                raw.shape,
                num_channels * num_candidates,
                raw.data.len()
            ),
        });
    }
    let channels = Array2::from_shape_vec((num_channels, num_candidates), raw.data.clone())
        .map_err(|err| DetectionError::MalformedOutput {
            reason: err.to_string(),
        })?;
    Ok(ChannelMatrix { channels })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_the_batch_dimension() {
        let raw = RawTensor {
            shape: vec![1, 5, 2],
            data: (0..10).map(|v| v as f32).collect(),
        };
        let matrix = normalize_output(&raw, 5).unwrap();
        assert_eq!(matrix.num_channels(), 5);
        assert_eq!(matrix.num_candidates(), 2);
        assert_eq!(matrix.channel(0).to_vec(), vec![0.0, 1.0]);
        assert_eq!(matrix.channel(4).to_vec(), vec![8.0, 9.0]);
    }

    #[test]
    fn accepts_an_unbatched_matrix() {
        let raw = RawTensor {
            shape: vec![5, 2],
            data: vec![0.0; 10],
        };
        assert!(normalize_output(&raw, 5).is_ok());
    }

    #[test]
    fn rejects_a_channel_count_mismatch() {
        let raw = RawTensor {
            shape: vec![1, 8, 4],
            data: vec![0.0; 32],
        };
        assert!(matches!(
            normalize_output(&raw, 10),
            Err(DetectionError::MalformedOutput { .. })
        ));
    }

    #[test]
    fn rejects_a_buffer_shorter_than_the_shape() {
        let raw = RawTensor {
            shape: vec![5, 2],
            data: vec![0.0; 9],
        };
        assert!(matches!(
            normalize_output(&raw, 5),
            Err(DetectionError::MalformedOutput { .. })
        ));
    }

    #[test]
    fn rejects_shapes_that_are_not_one_matrix() {
        let flat = RawTensor {
            shape: vec![10],
            data: vec![0.0; 10],
        };
        assert!(matches!(
            normalize_output(&flat, 10),
            Err(DetectionError::MalformedOutput { .. })
        ));

        let batch_of_two = RawTensor {
            shape: vec![2, 5, 2],
            data: vec![0.0; 20],
        };
        assert!(matches!(
            normalize_output(&batch_of_two, 5),
            Err(DetectionError::MalformedOutput { .. })
        ));
    }
}
