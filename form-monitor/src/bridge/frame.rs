//! Flat landmark buffers from JavaScript
//!
//! MediaPipe results arrive as one Float32Array of 33 × 4 values
//! (x, y, z, visibility per landmark).

use crate::error::AnalysisError;
use crate::pose::{Landmark, LANDMARK_COUNT};

/// Values per landmark in a flat buffer
pub const LANDMARK_STRIDE: usize = 4;

/// Length of a complete flat pose frame
pub const FRAME_LEN: usize = LANDMARK_COUNT * LANDMARK_STRIDE;

/// Unpack a flat buffer into landmarks
///
/// Any whole number of landmarks is accepted here; the analyzer decides
/// whether the count is right for a pose frame.
pub fn landmarks_from_flat(data: &[f32]) -> Result<Vec<Landmark>, AnalysisError> {
    if data.len() % LANDMARK_STRIDE != 0 {
        return Err(AnalysisError::MalformedBuffer {
            len: data.len(),
            stride: LANDMARK_STRIDE,
        });
    }

    Ok(data
        .chunks_exact(LANDMARK_STRIDE)
        .map(|v| Landmark::new(v[0], v[1], v[2], v[3]))
        .collect())
}
