use std::path::Path;
use std::sync::Arc;

use crate::error::DetectError;
use crate::graph::output::RawInferenceOutput;
use crate::surface::ImageTensor;

/// One loaded detection graph: opaque weights and topology behind a single
/// forward-pass operation.
///
/// # Contract
///
/// Implementations take ownership of the input tensor and must release it
/// and every intermediate buffer before returning, on success and on error
/// alike. Nothing from one call may leak into the next.
///
/// A forward pass may take seconds of wall clock. The trait is synchronous;
/// the `Detector` façade moves calls onto a blocking worker so async
/// callers are never stalled. Concurrent forward passes on one graph are
/// not assumed safe; the façade serializes them.
pub trait InferenceGraph: Send + Sync {
    /// Backend identifier.
    fn name(&self) -> &'static str;

    /// Run one forward pass over a batched image tensor, returning the raw
    /// score and box buffers with their shape metadata.
    fn run_forward(&self, input: ImageTensor) -> Result<RawInferenceOutput, DetectError>;
}

/// Builds an `InferenceGraph` from a model artifact directory.
///
/// Invoked at most once per detector lifetime, on a blocking worker. Any
/// failure surfaces as a load error and leaves the detector unloaded.
pub trait GraphLoader: Send + Sync {
    fn load(&self, artifact_dir: &Path) -> Result<Arc<dyn InferenceGraph>, DetectError>;
}
