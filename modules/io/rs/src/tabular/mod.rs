//! Tabular alignment output (BLAST `-outfmt 6`) restricted to the columns the refinement engine
//! requests: `sseqid sstart send qstart qend evalue`.
mod hit;
mod reader;

pub use hit::{Hit, COLUMNS};
pub use reader::Reader;
