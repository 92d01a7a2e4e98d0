#![cfg(feature = "backend-tract")]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context};
use tract_onnx::prelude::*;

use crate::error::DetectError;
use crate::graph::backend::{GraphLoader, InferenceGraph};
use crate::graph::output::RawInferenceOutput;
use crate::surface::ImageTensor;

/// File name of the serialized graph inside the artifact directory.
pub const MODEL_FILE: &str = "model.onnx";

type Plan = TypedRunnableModel<TypedModel>;

/// Tract-based detection graph.
///
/// The ONNX model is parsed once at load time. Input images arrive with
/// arbitrary pixel dimensions, so the typed, optimized execution plan is
/// built per input shape and cached; repeated calls at one resolution pay
/// the optimization cost once.
pub struct TractGraph {
    model: InferenceModel,
    plans: Mutex<HashMap<(u32, u32), Arc<Plan>>>,
}

impl TractGraph {
    fn plan_for(&self, width: u32, height: u32) -> Result<Arc<Plan>, DetectError> {
        let mut plans = self
            .plans
            .lock()
            .map_err(|_| DetectError::Inference(anyhow!("plan cache lock poisoned")))?;
        if let Some(plan) = plans.get(&(width, height)) {
            return Ok(Arc::clone(plan));
        }

        let plan = self
            .model
            .clone()
            .with_input_fact(
                0,
                InferenceFact::dt_shape(
                    u8::datum_type(),
                    tvec!(1, height as usize, width as usize, 3),
                ),
            )
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .with_context(|| format!("failed to build execution plan for {}x{}", width, height))
            .map_err(DetectError::Inference)?;

        let plan = Arc::new(plan);
        plans.insert((width, height), Arc::clone(&plan));
        Ok(plan)
    }

    fn extract_output(
        outputs: TVec<TValue>,
        width: u32,
        height: u32,
    ) -> Result<RawInferenceOutput, DetectError> {
        if outputs.len() < 2 {
            return Err(DetectError::Inference(anyhow!(
                "graph produced {} outputs, expected scores and boxes",
                outputs.len()
            )));
        }

        let score_shape = outputs[0].shape().to_vec();
        if score_shape.len() != 3 || score_shape[0] != 1 {
            return Err(DetectError::Inference(anyhow!(
                "score tensor has shape {:?}, expected [1, boxes, classes] for {}x{} input",
                score_shape,
                width,
                height
            )));
        }
        let num_boxes = score_shape[1];
        let num_classes = score_shape[2];

        let scores = outputs[0]
            .to_array_view::<f32>()
            .context("score tensor is not f32")
            .map_err(DetectError::Inference)?
            .iter()
            .copied()
            .collect();
        let boxes = outputs[1]
            .to_array_view::<f32>()
            .context("box tensor is not f32")
            .map_err(DetectError::Inference)?
            .iter()
            .copied()
            .collect();

        let output = RawInferenceOutput {
            scores,
            boxes,
            num_boxes,
            num_classes,
        };
        output.validate()?;
        Ok(output)
    }
}

impl InferenceGraph for TractGraph {
    fn name(&self) -> &'static str {
        "tract"
    }

    fn run_forward(&self, input: ImageTensor) -> Result<RawInferenceOutput, DetectError> {
        let width = input.width();
        let height = input.height();
        let plan = self.plan_for(width, height)?;

        let batched = tract_ndarray::Array4::from_shape_vec(
            (1, height as usize, width as usize, 3),
            input.into_data(),
        )
        .context("image buffer does not fill the batched tensor")
        .map_err(DetectError::Inference)?
        .into_tensor();

        let outputs = plan
            .run(tvec!(batched.into()))
            .context("forward pass failed")
            .map_err(DetectError::Inference)?;

        Self::extract_output(outputs, width, height)
    }
}

/// Loads `model.onnx` from the artifact directory into a `TractGraph`.
pub struct TractLoader;

impl GraphLoader for TractLoader {
    fn load(&self, artifact_dir: &Path) -> Result<Arc<dyn InferenceGraph>, DetectError> {
        let model_path = artifact_dir.join(MODEL_FILE);
        let model = tract_onnx::onnx()
            .model_for_path(&model_path)
            .with_context(|| format!("failed to parse ONNX graph {}", model_path.display()))
            .map_err(|source| DetectError::Load {
                path: artifact_dir.to_path_buf(),
                source,
            })?;

        log::debug!(
            "parsed ONNX graph {} ({} nodes)",
            model_path.display(),
            model.nodes.len()
        );

        Ok(Arc::new(TractGraph {
            model,
            plans: Mutex::new(HashMap::new()),
        }))
    }
}
