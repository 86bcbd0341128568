pub use contig::Contig;
pub use feature::{Feature, FeatureKind, Qualifiers};

mod contig;
mod feature;
