use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::postprocess::SuppressionSettings;

const DEFAULT_MODEL_DIR: &str = "model";

#[derive(Debug, Deserialize, Default)]
struct DetectorConfigFile {
    model_dir: Option<PathBuf>,
    suppression: Option<SuppressionConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
struct SuppressionConfigFile {
    max_outputs: Option<usize>,
    score_threshold: Option<f32>,
    iou_threshold: Option<f32>,
}

/// Runtime configuration for the CLI and embedders that want file/env
/// driven settings. Library callers can also construct `Detector` directly
/// with `SuppressionSettings`.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Directory holding `model.onnx` and `labels.json`.
    pub model_dir: PathBuf,
    pub suppression: SuppressionSettings,
}

impl DetectorConfig {
    /// Load configuration: optional JSON file named by `WFDETECT_CONFIG`,
    /// then environment overrides, then validation.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("WFDETECT_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: DetectorConfigFile) -> Self {
        let defaults = SuppressionSettings::default();
        let suppression = match file.suppression {
            Some(s) => SuppressionSettings {
                max_outputs: s.max_outputs.unwrap_or(defaults.max_outputs),
                score_threshold: s.score_threshold.unwrap_or(defaults.score_threshold),
                iou_threshold: s.iou_threshold.unwrap_or(defaults.iou_threshold),
            },
            None => defaults,
        };
        Self {
            model_dir: file
                .model_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_DIR)),
            suppression,
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(dir) = std::env::var("WFDETECT_MODEL_DIR") {
            if !dir.trim().is_empty() {
                self.model_dir = PathBuf::from(dir);
            }
        }
        if let Ok(value) = std::env::var("WFDETECT_MAX_OUTPUTS") {
            self.suppression.max_outputs = value
                .parse()
                .map_err(|_| anyhow!("WFDETECT_MAX_OUTPUTS must be an integer"))?;
        }
        if let Ok(value) = std::env::var("WFDETECT_SCORE_THRESHOLD") {
            self.suppression.score_threshold = value
                .parse()
                .map_err(|_| anyhow!("WFDETECT_SCORE_THRESHOLD must be a number"))?;
        }
        if let Ok(value) = std::env::var("WFDETECT_IOU_THRESHOLD") {
            self.suppression.iou_threshold = value
                .parse()
                .map_err(|_| anyhow!("WFDETECT_IOU_THRESHOLD must be a number"))?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.suppression.max_outputs == 0 {
            return Err(anyhow!("suppression.max_outputs must be at least 1"));
        }
        for (name, value) in [
            ("score_threshold", self.suppression.score_threshold),
            ("iou_threshold", self.suppression.iou_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(anyhow!("suppression.{} must be within [0, 1]", name));
            }
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> Result<DetectorConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}
