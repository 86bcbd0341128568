use std::path::PathBuf;

use derive_getters::Getters;
use derive_more::Constructor;
use eyre::{Result, WrapErr};
use rayon::prelude::*;
use rayon::ThreadPool;

use prophi_core_rs::loc::Interval;

use super::EngineBuilder;
use crate::homology::Aligner;
use crate::prophage::Prophage;
use crate::resolve::{Resolution, Resolver};

/// Batch attachment site refinement.
///
/// Prophages are refined in parallel, each one inside its own temporary working directory that is
/// removed once the prophage is done. A failure affects only the prophage that caused it.
#[derive(Constructor, Getters)]
pub struct Engine<A> {
    resolver: Resolver<A>,
    scratch: PathBuf,
    min_contig_length: usize,
    #[getter(skip)]
    thread_pool: Option<ThreadPool>,
}

impl<A: Aligner + Send + Sync> Engine<A> {
    pub fn builder() -> EngineBuilder<A> {
        EngineBuilder::default()
    }

    /// Refine all prophages in place. Results are reported per prophage in the input order.
    pub fn run(&mut self, prophages: &mut [Prophage]) -> Vec<Result<Interval<usize>>> {
        match self.thread_pool.take() {
            Some(pool) => {
                let result = pool.install(|| self._run(prophages));
                self.thread_pool = Some(pool);
                result
            }
            None => self._run(prophages),
        }
    }

    fn _run(&self, prophages: &mut [Prophage]) -> Vec<Result<Interval<usize>>> {
        let results: Vec<_> = prophages.par_iter_mut().map(|x| self.refine(x)).collect();

        let failed = results.iter().filter(|x| x.is_err()).count();
        log::info!(
            "Refined {} prophage(s), {} failure(s)",
            results.len() - failed,
            failed
        );
        results
    }

    fn refine(&self, prophage: &mut Prophage) -> Result<Interval<usize>> {
        let contig = prophage.contig();
        if contig.len() < self.min_contig_length {
            log::warn!(
                "Skipping {}: contig {} is shorter than {} bases",
                prophage.id(),
                contig.id(),
                self.min_contig_length
            );
            let coarse = *prophage.coarse();
            prophage.set_resolution(coarse, Resolution::Unresolved);
            return Ok(coarse);
        }

        let result = tempfile::Builder::new()
            .prefix(&format!("{}-", prophage.id()))
            .tempdir_in(&self.scratch)
            .wrap_err_with(|| {
                format!(
                    "Failed to create a working directory for {} in {}",
                    prophage.id(),
                    self.scratch.display()
                )
            })
            .and_then(|workdir| self.resolver.resolve(prophage, workdir.path()));

        if let Err(err) = &result {
            log::error!("Attachment site refinement failed: {:?}", err);
        }
        result
    }
}
