use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::anyhow;

use crate::error::DetectError;
use crate::graph::backend::{GraphLoader, InferenceGraph};
use crate::graph::output::RawInferenceOutput;
use crate::surface::ImageTensor;

/// Fixed-output graph for tests and development without a model artifact.
///
/// Every forward pass returns a clone of the configured output and bumps a
/// call counter.
pub struct StubGraph {
    output: RawInferenceOutput,
    calls: AtomicUsize,
}

impl StubGraph {
    pub fn new(output: RawInferenceOutput) -> Self {
        Self {
            output,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of forward passes run so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl InferenceGraph for StubGraph {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn run_forward(&self, _input: ImageTensor) -> Result<RawInferenceOutput, DetectError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.output.clone())
    }
}

/// Loader that hands out one pre-built stub graph and counts invocations,
/// so tests can observe single-flight load behavior.
pub struct StubLoader {
    graph: Arc<StubGraph>,
    fail: bool,
    loads: AtomicUsize,
}

impl StubLoader {
    pub fn new(output: RawInferenceOutput) -> Self {
        Self {
            graph: Arc::new(StubGraph::new(output)),
            fail: false,
            loads: AtomicUsize::new(0),
        }
    }

    /// Loader whose every `load` fails, for load-error paths.
    pub fn failing() -> Self {
        Self {
            graph: Arc::new(StubGraph::new(RawInferenceOutput::default())),
            fail: true,
            loads: AtomicUsize::new(0),
        }
    }

    /// Number of `load` invocations so far.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// The graph instance this loader hands out.
    pub fn graph(&self) -> Arc<StubGraph> {
        Arc::clone(&self.graph)
    }
}

impl GraphLoader for StubLoader {
    fn load(&self, artifact_dir: &Path) -> Result<Arc<dyn InferenceGraph>, DetectError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DetectError::Load {
                path: artifact_dir.to_path_buf(),
                source: anyhow!("stub loader configured to fail"),
            });
        }
        Ok(Arc::clone(&self.graph) as Arc<dyn InferenceGraph>)
    }
}
