use std::path::Path;

use ahash::HashMap;
use eyre::{Result, WrapErr};

use prophi_io_rs::fasta::{Record, Writer};
use prophi_io_rs::tabular::Hit;
use prophi_io_rs::WriteRecord;

use super::aligner::{Aligner, Alignment};

/// Best hit per reference (subject id) for a single query.
pub type ReferenceMap = HashMap<String, Hit>;

/// Align `sequence` against the reference database and keep the first reported hit per reference.
///
/// The query is written to `<workdir>/<label>.fasta`. Aligners report hits by descending
/// significance, so the first hit seen for a reference is the best one. No significant
/// alignment results in an empty map.
pub fn map_references(
    sequence: &[u8],
    label: &str,
    database: &Path,
    workdir: &Path,
    aligner: &impl Aligner,
) -> Result<ReferenceMap> {
    let query = workdir.join(format!("{label}.fasta"));
    let record = Record::new(label.to_string(), sequence.to_vec())
        .wrap_err_with(|| format!("Invalid query sequence {label}"))?;

    let mut writer = Writer::from_path(&query)?;
    writer.write_record(&record)?;
    writer.flush()?;
    drop(writer);

    let hits = match aligner.align(&query, database, workdir)? {
        Alignment::Hits(hits) => hits,
        Alignment::NoSignificantAlignment => {
            log::debug!("{label}: no significant alignments");
            return Ok(ReferenceMap::default());
        }
    };

    let total = hits.len();
    let mut map = ReferenceMap::default();
    for hit in hits {
        map.entry(hit.subject().clone()).or_insert(hit);
    }
    log::debug!("{label}: {total} hit(s) to {} reference(s)", map.len());
    Ok(map)
}
