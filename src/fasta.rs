//! Minimal FASTA reader for the CLI. Not part of the alignment core: the
//! core only ever sees plain sequences, never file formats.

use std::io::{BufRead, BufReader};
use std::path::Path;

/// One FASTA record: the header line (without the leading `>`) and its
/// sequence, with whitespace stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    /// Header line, with the leading `>` removed.
    pub header: String,
    /// Concatenated sequence lines.
    pub sequence: String,
}

/// Parse every record out of a FASTA file.
pub fn read_records(path: impl AsRef<Path>) -> std::io::Result<Vec<FastaRecord>> {
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();
    let mut current: Option<FastaRecord> = None;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end();
        if let Some(header) = line.strip_prefix('>') {
            if let Some(record) = current.take() {
                records.push(record);
            }
            current = Some(FastaRecord {
                header: header.to_string(),
                sequence: String::new(),
            });
        } else if let Some(record) = current.as_mut() {
            record.sequence.push_str(line.trim());
        }
    }
    if let Some(record) = current.take() {
        records.push(record);
    }
    Ok(records)
}

/// Read a FASTA file and return the first record's sequence.
pub fn read_single_sequence(path: impl AsRef<Path>) -> std::io::Result<String> {
    let records = read_records(path)?;
    records
        .into_iter()
        .next()
        .map(|r| r.sequence)
        .ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, "FASTA file has no records")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_single_record() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ">seq1 description\nACGT\nACGT").unwrap();
        let records = read_records(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].header, "seq1 description");
        assert_eq!(records[0].sequence, "ACGTACGT");
    }

    #[test]
    fn parses_multiple_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ">a\nAC\n>b\nGT").unwrap();
        let records = read_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].sequence, "GT");
    }
}
