use std::fmt::Display;

#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use eyre::{eyre, Report};

#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[repr(i8)]
pub enum Strand {
    /// The forward strand, also known as the positive strand or Watson strand.
    #[default]
    Forward = 1,
    /// The reverse strand, also known as the negative strand or Crick strand.
    Reverse = -1,
}

impl Strand {
    /// New strand that is the opposite of the current one.
    pub fn flipped(&self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }

    /// Get the symbolic representation of the strand.
    pub fn symbol(&self) -> char {
        match self {
            Self::Forward => '+',
            Self::Reverse => '-',
        }
    }

    /// Numeric representation used by GenBank-like annotations: +1 or -1.
    pub fn sign(&self) -> i8 {
        *self as i8
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<char> for Strand {
    type Error = Report;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '+' => Ok(Self::Forward),
            '-' => Ok(Self::Reverse),
            _ => Err(eyre!("Unknown strand symbol: {value:?}")),
        }
    }
}

impl TryFrom<&str> for Strand {
    type Error = Report;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "+" | "1" | "+1" => Ok(Self::Forward),
            "-" | "-1" => Ok(Self::Reverse),
            _ => Err(eyre!("Unknown strand: {value:?}")),
        }
    }
}

impl TryFrom<i8> for Strand {
    type Error = Report;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Forward),
            -1 => Ok(Self::Reverse),
            _ => Err(eyre!("Strand must be +1 or -1, got {value}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strand_flipped() {
        assert_eq!(Strand::Forward.flipped(), Strand::Reverse);
        assert_eq!(Strand::Reverse.flipped(), Strand::Forward);
    }

    #[test]
    fn test_strand_display() {
        assert_eq!(format!("{}", Strand::Forward), "+");
        assert_eq!(format!("{}", Strand::Reverse), "-");
    }

    #[test]
    fn test_strand_sign() {
        assert_eq!(Strand::Forward.sign(), 1);
        assert_eq!(Strand::Reverse.sign(), -1);
    }

    #[test]
    fn test_strand_try_from() {
        assert_eq!(Strand::try_from('+').unwrap(), Strand::Forward);
        assert_eq!(Strand::try_from("-1").unwrap(), Strand::Reverse);
        assert_eq!(Strand::try_from(-1i8).unwrap(), Strand::Reverse);
        assert!(Strand::try_from('x').is_err());
        assert!(Strand::try_from(0i8).is_err());
    }
}
