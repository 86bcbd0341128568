mod record;
mod writer;

pub use record::Record;
pub use writer::Writer;
