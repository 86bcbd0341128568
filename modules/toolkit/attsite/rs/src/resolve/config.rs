#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result};

/// Attachment site resolution parameters.
///
/// * `extension`: length of the flanking windows taken from each end of a candidate;
/// * `min_kmer_score`: minimal length of a reference overlap or an exact k-mer anchor.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, PartialEq, Eq, Hash, Debug, Dissolve, Getters)]
pub struct Config {
    pub extension: usize,
    pub min_kmer_score: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extension: 20_000,
            min_kmer_score: 5,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_extension(&mut self, extension: usize) -> &mut Self {
        self.extension = extension;
        self
    }

    pub fn set_min_kmer_score(&mut self, min_kmer_score: usize) -> &mut Self {
        self.min_kmer_score = min_kmer_score;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.extension > 0, "Extension must be positive");
        ensure!(self.min_kmer_score > 0, "Minimum k-mer score must be positive");
        Ok(())
    }
}
