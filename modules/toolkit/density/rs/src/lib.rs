pub use config::Config;
pub use density::{density, Sample};
pub use extract::{extract, Region};
pub use regions::{dense_regions, RegionContig, Thresholds};
pub use scanner::Scanner;

mod config;
mod density;
mod extract;
mod regions;
mod scanner;
