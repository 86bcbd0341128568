use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;
use eyre::{ensure, eyre, Result, WrapErr};

/// Output columns requested from the aligner, in order.
pub const COLUMNS: &str = "sseqid sstart send qstart qend evalue";

/// One alignment of a query against a reference (subject) sequence.
///
/// Coordinates are kept exactly as reported by the aligner: 1-based, inclusive, and for hits on
/// the reverse strand of the subject `subject_start > subject_end`. Query coordinates are always
/// ascending.
#[derive(Clone, PartialEq, Debug, Default, Constructor, Getters, Dissolve)]
pub struct Hit {
    subject: String,
    subject_start: usize,
    subject_end: usize,
    query_start: usize,
    query_end: usize,
    evalue: f64,
}

impl Hit {
    /// Parse a single tab-separated line with the [COLUMNS] layout. Extra columns are ignored.
    pub fn parse_line(line: &str) -> Result<Self> {
        let mut hit = Self::default();
        hit.parse_into(line)?;
        Ok(hit)
    }

    pub(crate) fn parse_into(&mut self, line: &str) -> Result<()> {
        let mut fields = line.trim_end_matches(['\r', '\n']).split('\t');
        let mut next = |name: &str| {
            fields
                .next()
                .filter(|x| !x.is_empty())
                .ok_or_else(|| eyre!("Missing column '{name}' in the alignment line: {line:?}"))
        };

        let subject = next("sseqid")?;
        let subject_start = next("sstart")?;
        let subject_end = next("send")?;
        let query_start = next("qstart")?;
        let query_end = next("qend")?;
        let evalue = next("evalue")?;

        self.subject.clear();
        self.subject.push_str(subject);
        self.subject_start = subject_start
            .parse()
            .wrap_err_with(|| format!("Invalid subject start: {subject_start:?}"))?;
        self.subject_end = subject_end
            .parse()
            .wrap_err_with(|| format!("Invalid subject end: {subject_end:?}"))?;
        self.query_start = query_start
            .parse()
            .wrap_err_with(|| format!("Invalid query start: {query_start:?}"))?;
        self.query_end = query_end
            .parse()
            .wrap_err_with(|| format!("Invalid query end: {query_end:?}"))?;
        self.evalue = evalue
            .parse()
            .wrap_err_with(|| format!("Invalid e-value: {evalue:?}"))?;

        ensure!(
            self.query_start <= self.query_end,
            "Query coordinates must be ascending, got {}..{}",
            self.query_start,
            self.query_end
        );
        ensure!(
            self.evalue >= 0.0,
            "E-value must be non-negative, got {}",
            self.evalue
        );
        Ok(())
    }

    /// True if the query aligns to the forward strand of the subject.
    pub fn is_forward(&self) -> bool {
        self.subject_start <= self.subject_end
    }
}
