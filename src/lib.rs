//! Object-detection inference pipeline for wireframe component sketches.
//!
//! The crate turns a decoded image into a ranked, deduplicated list of
//! labeled bounding boxes. One pretrained single-stage detection graph is
//! loaded per `Detector` lifetime, together with its sibling label table;
//! each `detect` call then runs:
//!
//! 1. preprocess: batch the surface's pixels into a graph input tensor
//! 2. forward pass: execute the graph on a blocking worker, yielding raw
//!    per-box class scores and normalized box coordinates
//! 3. score reduction: collapse each box's class row to its best class
//! 4. non-max suppression: greedy overlap-based filtering
//! 5. decode: map surviving normalized boxes to pixel rectangles
//!
//! # Module Structure
//!
//! - `detector`: the façade owning the loaded model and the pipeline lock
//! - `graph`: the `InferenceGraph`/`GraphLoader` capability traits and the
//!   tract and stub backends
//! - `postprocess`: pure score-reduction, suppression, and decoding stages
//! - `surface`, `labels`, `result`, `config`, `error`: input surface,
//!   label table, result records, runtime config, error taxonomy

pub mod config;
pub mod detector;
pub mod error;
pub mod graph;
pub mod labels;
pub mod postprocess;
pub mod result;
pub mod surface;

pub use config::DetectorConfig;
pub use detector::{Detector, LABEL_FILE};
pub use error::DetectError;
pub use graph::{GraphLoader, InferenceGraph, RawInferenceOutput, StubGraph, StubLoader};
pub use labels::LabelTable;
pub use postprocess::{decode, reduce_scores, suppress, SuppressionSettings};
pub use result::{BoundingBox, Detection};
pub use surface::{ImageSurface, ImageTensor};

#[cfg(feature = "backend-tract")]
pub use graph::{TractGraph, TractLoader};
