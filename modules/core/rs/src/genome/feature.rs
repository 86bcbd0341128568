use std::collections::BTreeMap;
use std::fmt::Display;

#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

use crate::loc::{Interval, Strand};

/// Type tag of an annotated feature. Only gene-like kinds contribute to the gene density signal.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub enum FeatureKind {
    #[default]
    Cds,
    Trna,
    Tmrna,
    Rna,
    Other(String),
}

impl FeatureKind {
    pub fn is_gene(&self) -> bool {
        !matches!(self, FeatureKind::Other(_))
    }
}

impl From<&str> for FeatureKind {
    fn from(value: &str) -> Self {
        match value {
            "CDS" => FeatureKind::Cds,
            "tRNA" => FeatureKind::Trna,
            "tmRNA" => FeatureKind::Tmrna,
            "rRNA" | "ncRNA" | "RNA" => FeatureKind::Rna,
            other => FeatureKind::Other(other.to_string()),
        }
    }
}

impl Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureKind::Cds => write!(f, "CDS"),
            FeatureKind::Trna => write!(f, "tRNA"),
            FeatureKind::Tmrna => write!(f, "tmRNA"),
            FeatureKind::Rna => write!(f, "RNA"),
            FeatureKind::Other(x) => write!(f, "{x}"),
        }
    }
}

/// Annotation attached to a feature. Fields the pipeline reads are typed, everything else is
/// carried through untouched in `extra`.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, PartialEq, Eq, Debug, Default, Getters, Dissolve)]
pub struct Qualifiers {
    locus_tag: Option<String>,
    product: Option<String>,
    translation: Option<String>,
    extra: BTreeMap<String, Vec<String>>,
}

impl Qualifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_locus_tag(&mut self, locus_tag: impl Into<String>) -> &mut Self {
        self.locus_tag = Some(locus_tag.into());
        self
    }

    pub fn set_product(&mut self, product: impl Into<String>) -> &mut Self {
        self.product = Some(product.into());
        self
    }

    pub fn set_translation(&mut self, translation: impl Into<String>) -> &mut Self {
        self.translation = Some(translation.into());
        self
    }

    pub fn push_extra(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.extra.entry(key.into()).or_default().push(value.into());
        self
    }
}

/// Annotated feature on a contig, coordinates are 0-based half-open.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, PartialEq, Eq, Debug, Constructor, Getters, Dissolve)]
pub struct Feature {
    interval: Interval<usize>,
    strand: Strand,
    kind: FeatureKind,
    qualifiers: Qualifiers,
}

impl Feature {
    /// Project the feature into the local frame of `region`.
    /// Features that are not fully inside the region are dropped (None).
    pub fn relocated(&self, region: &Interval<usize>) -> Option<Self> {
        self.interval.relocated(region).map(|interval| Self {
            interval,
            strand: self.strand,
            kind: self.kind.clone(),
            qualifiers: self.qualifiers.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loc::IntervalOp;

    #[test]
    fn test_feature_kind() {
        assert_eq!(FeatureKind::from("CDS"), FeatureKind::Cds);
        assert_eq!(FeatureKind::from("tmRNA"), FeatureKind::Tmrna);
        assert_eq!(
            FeatureKind::from("source"),
            FeatureKind::Other("source".to_string())
        );
        assert!(FeatureKind::Trna.is_gene());
        assert!(!FeatureKind::from("gap").is_gene());
        assert_eq!(FeatureKind::Tmrna.to_string(), "tmRNA");
    }

    #[test]
    fn test_relocated_feature_keeps_annotation() -> eyre::Result<()> {
        let mut qualifiers = Qualifiers::new();
        qualifiers
            .set_product("integrase")
            .push_extra("note", "phage-like");
        let feature = Feature::new(
            Interval::new(150, 900)?,
            Strand::Reverse,
            FeatureKind::Cds,
            qualifiers,
        );

        let local = feature.relocated(&Interval::new(100, 1_000)?).unwrap();
        assert_eq!(local.interval().start(), 50);
        assert_eq!(local.interval().end(), 800);
        assert_eq!(local.strand(), &Strand::Reverse);
        assert_eq!(local.qualifiers().product().as_deref(), Some("integrase"));
        assert_eq!(
            local.qualifiers().extra().get("note"),
            Some(&vec!["phage-like".to_string()])
        );

        assert!(feature.relocated(&Interval::new(200, 1_000)?).is_none());
        Ok(())
    }
}
