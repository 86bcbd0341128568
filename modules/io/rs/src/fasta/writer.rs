use super::record::Record;
use crate::traits::WriteRecord;
use derive_getters::Dissolve;
use eyre::{Result, WrapErr};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::num::NonZeroUsize;
use std::path::Path;

pub const DEFAULT_LINE_WIDTH: NonZeroUsize = match NonZeroUsize::new(80) {
    Some(x) => x,
    None => unreachable!(),
};

#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Dissolve)]
pub struct Writer<W> {
    writer: W,
    line_width: NonZeroUsize,
}

impl<W> Writer<W> {
    pub fn new(writer: W, line_width: NonZeroUsize) -> Self {
        Self { writer, line_width }
    }
}

impl Writer<BufWriter<File>> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .wrap_err_with(|| format!("Failed to create FASTA file {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file), DEFAULT_LINE_WIDTH))
    }
}

impl<W: Write> WriteRecord for Writer<W> {
    type Record = Record;

    fn write_record(&mut self, record: &Self::Record) -> Result<()> {
        self.writer.write_all(b">")?;
        self.writer.write_all(record.id().as_bytes())?;
        self.writer.write_all(b"\n")?;

        record
            .seq()
            .chunks(self.line_width.get())
            .try_for_each(|c| -> Result<()> {
                self.writer.write_all(c)?;
                self.writer.write_all(b"\n")?;
                Ok(())
            })
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
