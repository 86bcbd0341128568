pub mod fasta;
pub mod tabular;
mod traits;

pub use traits::{ReadRecord, WriteRecord};
