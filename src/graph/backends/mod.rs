pub mod stub;

#[cfg(feature = "backend-tract")]
pub mod tract;

pub use stub::{StubGraph, StubLoader};

#[cfg(feature = "backend-tract")]
pub use tract::{TractGraph, TractLoader};
