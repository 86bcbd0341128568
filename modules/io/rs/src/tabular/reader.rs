use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use derive_getters::Dissolve;
use eyre::{Result, WrapErr};

use super::hit::Hit;
use crate::traits::ReadRecord;

/// Line-by-line reader of tabular alignment output. Empty lines and `#` comments are skipped.
#[derive(Debug, Dissolve)]
pub struct Reader<R> {
    reader: R,
    line: String,
    lineno: usize,
}

impl Reader<BufReader<File>> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .wrap_err_with(|| format!("Failed to open alignment table {}", path.display()))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Reader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            lineno: 0,
        }
    }
}

impl<R: BufRead> ReadRecord for Reader<R> {
    type Record = Hit;

    fn read_record(&mut self, into: &mut Self::Record) -> Result<bool> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(false);
            }
            self.lineno += 1;

            let line = self.line.trim_end_matches(['\r', '\n']);
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            into.parse_into(line)
                .wrap_err_with(|| format!("Malformed alignment record at line {}", self.lineno))?;
            return Ok(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_to_end() -> Result<()> {
        let content = "# BLASTN 2.14.0+\n\
                       refA\t10\t60\t1\t51\t1e-20\n\
                       \n\
                       refB\t500\t450\t100\t150\t0.003\r\n";
        let mut hits = Vec::new();
        let total = Reader::new(Cursor::new(content)).read_to_end(&mut hits)?;

        assert_eq!(total, 2);
        assert_eq!(hits[0], Hit::new("refA".to_string(), 10, 60, 1, 51, 1e-20));
        assert_eq!(hits[1], Hit::new("refB".to_string(), 500, 450, 100, 150, 0.003));
        Ok(())
    }

    #[test]
    fn test_error_reports_line() {
        let content = "refA\t10\t60\t1\t51\t1e-20\nrefB\t10\n";
        let mut hits = Vec::new();
        let err = Reader::new(Cursor::new(content))
            .read_to_end(&mut hits)
            .unwrap_err();
        assert!(format!("{err:?}").contains("line 2"));
    }

    #[test]
    fn test_empty_input() -> Result<()> {
        let mut hits = Vec::new();
        assert_eq!(Reader::new(Cursor::new("")).read_to_end(&mut hits)?, 0);
        assert!(hits.is_empty());
        Ok(())
    }
}
