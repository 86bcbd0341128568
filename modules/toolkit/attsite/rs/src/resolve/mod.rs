pub use config::Config;
pub use resolver::{Resolution, Resolver};

mod config;
mod resolver;
