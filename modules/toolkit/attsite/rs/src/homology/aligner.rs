use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;

use ahash::HashMap;
use derive_getters::{Dissolve, Getters};
use eyre::{bail, eyre, Result, WrapErr};
use impl_tools::autoimpl;

use prophi_io_rs::tabular::{self, Hit, COLUMNS};
use prophi_io_rs::ReadRecord;

/// Outcome of a successful aligner run.
#[derive(Clone, PartialEq, Debug)]
pub enum Alignment {
    /// Hits in the aligner output order, i.e. sorted by descending significance.
    Hits(Vec<Hit>),
    NoSignificantAlignment,
}

impl Alignment {
    pub fn from_hits(hits: Vec<Hit>) -> Self {
        if hits.is_empty() {
            Alignment::NoSignificantAlignment
        } else {
            Alignment::Hits(hits)
        }
    }
}

/// External sequence aligner. Implementations must be usable from many threads at once, each
/// call gets its own working directory.
#[autoimpl(for <T: trait + ?Sized> &T, Arc<T>)]
pub trait Aligner {
    /// Align the query FASTA against the database. Output files, if any, must be placed inside
    /// `workdir`. Failures to run the aligner are errors, absence of hits is not.
    fn align(&self, query: &Path, database: &Path, workdir: &Path) -> Result<Alignment>;
}

/// NCBI blastn invoked as an external process.
#[derive(Clone, PartialEq, Debug, Dissolve, Getters)]
pub struct Blastn {
    executable: PathBuf,
    evalue: f64,
    args: Vec<String>,
}

impl Default for Blastn {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("blastn"),
            evalue: 1e-3,
            args: Vec::new(),
        }
    }
}

impl Blastn {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_executable(&mut self, executable: impl Into<PathBuf>) -> &mut Self {
        self.executable = executable.into();
        self
    }

    pub fn set_evalue(&mut self, evalue: f64) -> &mut Self {
        self.evalue = evalue;
        self
    }

    /// Extra arguments appended to every invocation, e.g. `["-num_threads", "2"]`.
    pub fn set_args(&mut self, args: Vec<String>) -> &mut Self {
        self.args = args;
        self
    }

    fn collect(table: &Path) -> Result<Alignment> {
        let mut hits = Vec::new();
        tabular::Reader::from_path(table)?
            .read_to_end(&mut hits)
            .wrap_err_with(|| format!("Failed to parse blastn output {}", table.display()))?;
        Ok(Alignment::from_hits(hits))
    }
}

impl Aligner for Blastn {
    fn align(&self, query: &Path, database: &Path, workdir: &Path) -> Result<Alignment> {
        let stem = query
            .file_stem()
            .ok_or_else(|| eyre!("Query path has no file name: {}", query.display()))?;
        let table = workdir.join(format!("{}.tsv", stem.to_string_lossy()));

        let output = Command::new(&self.executable)
            .arg("-query")
            .arg(query)
            .arg("-db")
            .arg(database)
            .arg("-outfmt")
            .arg(format!("6 {COLUMNS}"))
            .arg("-evalue")
            .arg(self.evalue.to_string())
            .arg("-out")
            .arg(&table)
            .args(&self.args)
            .stdout(Stdio::null())
            .output()
            .wrap_err_with(|| format!("Failed to run {}", self.executable.display()))?;

        if !output.status.success() {
            bail!(
                "{} failed for {} ({}): {}",
                self.executable.display(),
                query.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Self::collect(&table)
    }
}

/// Aligner replaying precomputed hits, keyed by the query label (file stem of the query FASTA).
/// Labels without hits report no significant alignment.
#[derive(Clone, PartialEq, Debug, Default, Dissolve)]
pub struct Precomputed {
    hits: HashMap<String, Vec<Hit>>,
}

impl Precomputed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_hits(&mut self, label: impl Into<String>, hits: impl IntoIterator<Item = Hit>) -> &mut Self {
        self.hits.entry(label.into()).or_default().extend(hits);
        self
    }

    /// Load hits for a label from a tabular file with the blastn columns.
    pub fn add_table(&mut self, label: impl Into<String>, table: impl AsRef<Path>) -> Result<&mut Self> {
        let mut hits = Vec::new();
        tabular::Reader::from_path(table)?.read_to_end(&mut hits)?;
        Ok(self.add_hits(label, hits))
    }
}

impl Aligner for Precomputed {
    fn align(&self, query: &Path, _database: &Path, workdir: &Path) -> Result<Alignment> {
        if !query.starts_with(workdir) || !query.is_file() {
            bail!(
                "Query {} is not a file inside the working directory {}",
                query.display(),
                workdir.display()
            );
        }
        let label = query
            .file_stem()
            .and_then(|x| x.to_str())
            .ok_or_else(|| eyre!("Query path has no valid file name: {}", query.display()))?;
        Ok(Alignment::from_hits(
            self.hits.get(label).cloned().unwrap_or_default(),
        ))
    }
}
