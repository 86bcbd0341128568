pub use aligner::{Aligner, Alignment, Blastn, Precomputed};
pub use mapper::{map_references, ReferenceMap};

mod aligner;
mod mapper;
