pub use builder::{EngineBuilder, MIN_CONTIG_LENGTH};
pub use engine::Engine;

mod builder;
#[allow(clippy::module_inception)]
mod engine;
