pub use engine::{Engine, EngineBuilder, MIN_CONTIG_LENGTH};
pub use naive::naive_prophages;
pub use prophage::Prophage;
pub use resolve::{Config, Resolution, Resolver};

mod engine;
pub mod homology;
pub mod kmer;
mod naive;
mod prophage;
pub mod resolve;
