//! Detector façade: one-time model load, serialized detection pipeline.
//!
//! The façade owns the loaded graph and label table and composes the five
//! pipeline stages behind a single `detect` operation: preprocess, forward
//! pass, score reduction, suppression, decode.
//!
//! Two states exist, unloaded and loaded. `load` transitions exactly once
//! and is single-flight: concurrent callers await the same in-flight load
//! instead of issuing a second one. `detect` holds one lock across the
//! whole pipeline, so calls issued while another is in flight queue behind
//! it rather than racing the shared graph.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::anyhow;
use tokio::sync::{Mutex, OnceCell};

use crate::error::DetectError;
use crate::graph::{GraphLoader, InferenceGraph};
use crate::labels::LabelTable;
use crate::postprocess::{decode, reduce_scores, suppress, SuppressionSettings};
use crate::result::Detection;
use crate::surface::ImageSurface;

/// File name of the label table inside the artifact directory.
pub const LABEL_FILE: &str = "labels.json";

struct LoadedModel {
    graph: Arc<dyn InferenceGraph>,
    labels: LabelTable,
    artifact_dir: PathBuf,
}

/// Object-detection façade over one pretrained graph.
pub struct Detector {
    loader: Arc<dyn GraphLoader>,
    suppression: SuppressionSettings,
    model: OnceCell<Arc<LoadedModel>>,
    pipeline: Mutex<()>,
}

impl Detector {
    /// Detector wired to the tract ONNX backend.
    #[cfg(feature = "backend-tract")]
    pub fn new(config: &crate::config::DetectorConfig) -> Self {
        Self::with_loader(Arc::new(crate::graph::TractLoader), config.suppression)
    }

    /// Detector with an injected graph loader. Tests use the stub loader;
    /// embedders can bring any `GraphLoader`.
    pub fn with_loader(loader: Arc<dyn GraphLoader>, suppression: SuppressionSettings) -> Self {
        Self {
            loader,
            suppression,
            model: OnceCell::new(),
            pipeline: Mutex::new(()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.initialized()
    }

    /// Load the model artifact (graph plus sibling label table) from
    /// `artifact_dir`.
    ///
    /// Single-flight: while a load is in flight, further callers await its
    /// outcome. Once loaded, re-loading the same directory is a no-op and a
    /// different directory is a usage error. A failed load leaves the
    /// detector unloaded; retrying is up to the caller.
    pub async fn load(&self, artifact_dir: impl AsRef<Path>) -> Result<(), DetectError> {
        let requested = artifact_dir.as_ref().to_path_buf();

        let model = self
            .model
            .get_or_try_init(|| {
                let dir = requested.clone();
                let loader = Arc::clone(&self.loader);
                async move {
                    log::info!("loading model artifact from {}", dir.display());
                    let worker_dir = dir.clone();
                    let loaded = tokio::task::spawn_blocking(move || {
                        let labels = LabelTable::from_path(&worker_dir.join(LABEL_FILE))?;
                        let graph = loader.load(&worker_dir)?;
                        Ok::<_, DetectError>(LoadedModel {
                            graph,
                            labels,
                            artifact_dir: worker_dir,
                        })
                    })
                    .await
                    .map_err(|err| DetectError::Load {
                        path: dir,
                        source: anyhow!("load worker failed: {err}"),
                    })??;
                    log::info!(
                        "model loaded: backend {}, {} labels",
                        loaded.graph.name(),
                        loaded.labels.len()
                    );
                    Ok(Arc::new(loaded))
                }
            })
            .await?;

        if model.artifact_dir != requested {
            return Err(DetectError::AlreadyLoaded {
                loaded: model.artifact_dir.clone(),
                requested,
            });
        }
        Ok(())
    }

    /// Run detection on a decoded image surface.
    ///
    /// Valid only once loaded. The full pipeline runs under the detector's
    /// lock; a call issued while another is in flight queues behind it.
    /// Zero boxes clearing the score threshold is the normal empty
    /// outcome, not an error.
    pub async fn detect(&self, surface: &ImageSurface) -> Result<Vec<Detection>, DetectError> {
        let model = self.model.get().cloned().ok_or(DetectError::NotLoaded)?;
        let _guard = self.pipeline.lock().await;

        let tensor = surface.to_tensor();
        let graph = Arc::clone(&model.graph);
        let raw = tokio::task::spawn_blocking(move || graph.run_forward(tensor))
            .await
            .map_err(|err| DetectError::Inference(anyhow!("inference worker failed: {err}")))??;
        raw.validate()?;

        let (max_scores, classes) = reduce_scores(&raw.scores, raw.num_boxes, raw.num_classes);
        let kept = suppress(&raw.boxes, &max_scores, &self.suppression);
        log::debug!(
            "{} of {} raw boxes survive suppression",
            kept.len(),
            raw.num_boxes
        );

        let mut detections = Vec::with_capacity(kept.len());
        for index in kept {
            let class = model.labels.name(classes[index]).ok_or_else(|| {
                DetectError::Inference(anyhow!(
                    "class index {} outside label table of {} entries",
                    classes[index],
                    model.labels.len()
                ))
            })?;
            detections.push(Detection {
                class: class.to_string(),
                score: max_scores[index],
                bounding_box: decode(raw.box_at(index), surface.width(), surface.height()),
            });
        }
        Ok(detections)
    }
}
