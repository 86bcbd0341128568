use std::num::NonZeroUsize;
use std::thread::available_parallelism;

use eyre::Result;

/// Resolve a requested number of threads against `max` available ones:
/// * positive values are capped by `max`;
/// * zero means a single thread;
/// * negative values mean "all but |n| - 1" threads, e.g. -1 = all of them.
fn resolve(requested: isize, max: NonZeroUsize) -> NonZeroUsize {
    let max = max.get() as isize;
    let threads = if requested > 0 {
        requested.min(max)
    } else if requested == 0 {
        1
    } else {
        (max + requested + 1).max(1)
    };
    NonZeroUsize::new(threads as usize).unwrap_or(NonZeroUsize::MIN)
}

pub fn threads(requested: isize) -> Result<NonZeroUsize> {
    Ok(resolve(requested, available_parallelism()?))
}
