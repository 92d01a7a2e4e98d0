use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the detection pipeline.
///
/// Three failing conditions exist: artifact load failures, caller-contract
/// violations (usage), and forward-pass failures (inference). A detection
/// run that clears nothing past the score threshold is not an error; it
/// returns an empty list.
#[derive(Debug, Error)]
pub enum DetectError {
    /// Fetching or parsing the model artifact failed. The detector stays
    /// unloaded; retrying is the caller's responsibility.
    #[error("failed to load model artifact from {}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// `detect` was called before a load completed.
    #[error("detector is not loaded")]
    NotLoaded,

    /// `load` was called with a different artifact directory after a load
    /// already succeeded. The loaded state is terminal for the detector's
    /// lifetime.
    #[error("detector already loaded from {}, refusing {}", .loaded.display(), .requested.display())]
    AlreadyLoaded {
        loaded: PathBuf,
        requested: PathBuf,
    },

    /// The input image violates the caller contract (zero-sized or an
    /// inconsistent pixel buffer). Rejected before any inference work.
    #[error("invalid input image: {0}")]
    InvalidImage(String),

    /// The forward pass failed, or the graph produced outputs that do not
    /// match the declared box/score shapes. No partial detection list is
    /// returned on this path.
    #[error("inference failed")]
    Inference(#[source] anyhow::Error),
}

impl DetectError {
    /// True for caller mistakes rejected synchronously, as opposed to load
    /// or inference failures.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            DetectError::NotLoaded
                | DetectError::AlreadyLoaded { .. }
                | DetectError::InvalidImage(_)
        )
    }
}
