//! Pure postprocessing stages: score reduction, greedy non-max
//! suppression, and normalized-to-pixel box decoding.
//!
//! Everything here is deterministic CPU arithmetic with no dependency on
//! the inference backend, so identical inputs always produce identical
//! outputs regardless of where the forward pass ran.

mod decode;
mod nms;
mod scores;

pub use decode::decode;
pub use nms::{
    suppress, SuppressionSettings, DEFAULT_IOU_THRESHOLD, DEFAULT_MAX_OUTPUTS,
    DEFAULT_SCORE_THRESHOLD,
};
pub use scores::reduce_scores;
