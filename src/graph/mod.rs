mod backend;
mod backends;
mod output;

pub use backend::{GraphLoader, InferenceGraph};
pub use backends::{StubGraph, StubLoader};
pub use output::RawInferenceOutput;

#[cfg(feature = "backend-tract")]
pub use backends::{TractGraph, TractLoader};
