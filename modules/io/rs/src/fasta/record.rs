#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};
use derive_more::Into;
use eyre::{ensure, Result};

/// A single FASTA record with the following guarantees:
/// - The ID is non-empty and can't contain whitespace (aligners cut IDs at the first space).
/// - The sequence is non-empty and contains only ASCII alphabetic characters.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Dissolve, Getters, Into)]
pub struct Record {
    id: String,
    seq: Vec<u8>,
}

impl TryFrom<(&str, &str)> for Record {
    type Error = eyre::Report;

    fn try_from(value: (&str, &str)) -> Result<Self> {
        Self::new(value.0.to_string(), value.1.as_bytes().to_vec())
    }
}

impl Record {
    pub fn new(id: String, seq: Vec<u8>) -> Result<Self> {
        Self::validate(&id, &seq)?;
        Ok(Self { id, seq })
    }

    pub fn validate_id(id: &str) -> Result<()> {
        ensure!(!id.is_empty(), "FASTA ID cannot be empty");
        ensure!(
            !id.contains(char::is_whitespace),
            "Whitespace characters are not allowed in the FASTA ID: {id:?}"
        );
        Ok(())
    }

    pub fn validate_seq(seq: &[u8]) -> Result<()> {
        ensure!(!seq.is_empty(), "FASTA sequence cannot be empty");
        for (i, &x) in seq.iter().enumerate() {
            ensure!(
                x.is_ascii_alphabetic(),
                "Non-alphabetic character at index {i} = {x:?}"
            );
        }
        Ok(())
    }

    pub fn validate(id: &str, seq: &[u8]) -> Result<()> {
        Self::validate_id(id)?;
        Self::validate_seq(seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_record() -> Result<()> {
        for (id, seq) in [
            ("prophiNC_000962-1_L_extension", "ACGTACGT"),
            ("id", "a"),
            ("contig|region_0", "NNNNACGT"),
        ] {
            let record: Record = (id, seq).try_into()?;
            assert_eq!(record.id(), id);
            assert_eq!(record.seq(), seq.as_bytes());
        }
        Ok(())
    }

    #[test]
    fn test_invalid_records() {
        for (id, seq) in [
            ("", "ACGT"),
            ("id\n", "ACGT"),
            ("with space", "ACGT"),
            ("id", ""),
            ("id", "ACGT1"),
            ("id", "ACG T"),
        ] {
            let record: Result<Record> = (id, seq).try_into();
            assert!(record.is_err(), "Record: {:?}", record);
        }
    }
}
