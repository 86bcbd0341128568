use std::path::PathBuf;

use eyre::{eyre, Result, WrapErr};
use rayon::{ThreadPool, ThreadPoolBuilder};

use prophi_core_rs::parallelism;

use super::Engine;
use crate::homology::Aligner;
use crate::resolve::{Config, Resolver};

/// Contigs shorter than this are not refined.
pub const MIN_CONTIG_LENGTH: usize = 20_000;

pub struct EngineBuilder<A> {
    config: Config,
    aligner: Option<A>,
    database: Option<PathBuf>,
    scratch: Option<PathBuf>,
    min_contig_length: usize,
    thread_pool: Option<ThreadPool>,
}

impl<A> Default for EngineBuilder<A> {
    fn default() -> Self {
        Self {
            config: Config::default(),
            aligner: None,
            database: None,
            scratch: None,
            min_contig_length: MIN_CONTIG_LENGTH,
            thread_pool: None,
        }
    }
}

impl<A: Aligner + Send + Sync> EngineBuilder<A> {
    pub fn set_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn set_aligner(mut self, aligner: A) -> Self {
        self.aligner = Some(aligner);
        self
    }

    pub fn set_database(mut self, database: impl Into<PathBuf>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Directory for the per-prophage working directories. Defaults to the system temp directory.
    pub fn set_scratch(mut self, scratch: impl Into<PathBuf>) -> Self {
        self.scratch = Some(scratch.into());
        self
    }

    pub fn set_min_contig_length(mut self, min_contig_length: usize) -> Self {
        self.min_contig_length = min_contig_length;
        self
    }

    pub fn set_thread_pool(mut self, pool: ThreadPool) -> Self {
        self.thread_pool = Some(pool);
        self
    }

    /// Run on a dedicated pool. Negative values are relative to the available cores,
    /// e.g. -1 uses all of them.
    pub fn set_threads(self, threads: isize) -> Result<Self> {
        let threads = parallelism::threads(threads)?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads.get())
            .thread_name(|ind| format!("attsite-{ind}"))
            .build()?;
        log::debug!("Refining prophages with {threads} thread(s)");
        Ok(self.set_thread_pool(pool))
    }

    pub fn build(self) -> Result<Engine<A>> {
        let aligner = self
            .aligner
            .ok_or_else(|| eyre!("Aligner must be set before building the engine"))?;
        let database = self
            .database
            .ok_or_else(|| eyre!("Reference database must be set before building the engine"))?;

        let scratch = self.scratch.unwrap_or_else(std::env::temp_dir);
        std::fs::create_dir_all(&scratch).wrap_err_with(|| {
            format!("Failed to create the scratch directory {}", scratch.display())
        })?;

        let resolver = Resolver::new(self.config, aligner, database)?;
        Ok(Engine::new(
            resolver,
            scratch,
            self.min_contig_length,
            self.thread_pool,
        ))
    }
}
