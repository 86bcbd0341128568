use eyre::Result;

/// A trait for reading structured records. Modeled after the `Read` trait in the std.
pub trait ReadRecord {
    /// The type of the records that will be read.
    type Record;

    /// Read a single record from the input into the provided buffer.
    /// Returns `true` if a record was read and `false` if the end of the input was reached.
    fn read_record(&mut self, into: &mut Self::Record) -> Result<bool>;

    /// Read all remaining records and append them to the provided buffer.
    /// Returns the number of records read.
    fn read_to_end(&mut self, into: &mut Vec<Self::Record>) -> Result<usize>
    where
        Self::Record: Default,
    {
        let mut total = 0;
        loop {
            let mut record = Self::Record::default();
            if !self.read_record(&mut record)? {
                return Ok(total);
            }
            into.push(record);
            total += 1;
        }
    }
}

/// A trait for writing structured records. Modeled after the `Write` trait in the std.
pub trait WriteRecord {
    type Record;

    /// Write a single record.
    fn write_record(&mut self, record: &Self::Record) -> Result<()>;

    /// Write a slice of records.
    fn write_records(&mut self, records: &[Self::Record]) -> Result<()> {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Flush the output.
    fn flush(&mut self) -> Result<()>;
}
