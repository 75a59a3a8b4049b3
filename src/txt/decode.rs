use super::consts::*;
use crate::{Field, Record, RecordStore};
use std::io::BufRead;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Why decoding stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeEnd {
    /// The input ended between two records (or was empty).
    EndOfInput,
    /// The input ended after `lines` of the four lines of a record. The
    /// partial record is discarded.
    PartialRecord { lines: usize },
    /// The store is full and input remains unread.
    CapacityReached,
}

#[derive(Debug)]
pub struct DecodedFile {
    pub records: RecordStore,
    pub end: DecodeEnd,
}

pub fn decode_file(data: &[u8]) -> Result<DecodedFile, DecodeError> {
    Reader::new(data).read_all()
}

/// Result of reading a single record.
#[derive(Debug, PartialEq, Eq)]
pub enum ReadRecord {
    Record(Record),
    PartialRecord { lines: usize },
    EndOfInput,
}

pub struct Reader<R: BufRead> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> Reader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: inner,
            buf: Vec::new(),
        }
    }

    /// Reads records until the input ends or the store is full.
    pub fn read_all(&mut self) -> Result<DecodedFile, DecodeError> {
        let mut records = RecordStore::new();

        let end = loop {
            if records.is_full() {
                break if self.at_end()? {
                    DecodeEnd::EndOfInput
                } else {
                    DecodeEnd::CapacityReached
                };
            }

            match self.read_record()? {
                ReadRecord::Record(record) => {
                    if records.push(record).is_err() {
                        break DecodeEnd::CapacityReached;
                    }
                }
                ReadRecord::PartialRecord { lines } => break DecodeEnd::PartialRecord { lines },
                ReadRecord::EndOfInput => break DecodeEnd::EndOfInput,
            }
        };

        debug!(count = records.len(), ?end, "decoded records");
        Ok(DecodedFile { records, end })
    }

    /// Reads the next record, skipping blank lines in front of its name.
    pub fn read_record(&mut self) -> Result<ReadRecord, DecodeError> {
        let name = loop {
            match self.read_line()? {
                None => return Ok(ReadRecord::EndOfInput),
                Some(line) if line.is_empty() => trace!("skipping blank line"),
                Some(line) => break line,
            }
        };

        let mut values = [name, String::new(), String::new(), String::new()];
        for (index, field) in Field::ALL.iter().enumerate().skip(1) {
            match self.read_line()? {
                Some(line) => values[index] = line,
                None => {
                    debug!(%field, lines = index, "input ended inside a record");
                    return Ok(ReadRecord::PartialRecord { lines: index });
                }
            }
        }

        let [name, cruise_speed, wingspan, description] = values;
        Ok(ReadRecord::Record(Record::new(
            &name,
            &cruise_speed,
            &wingspan,
            &description,
        )))
    }

    fn at_end(&mut self) -> Result<bool, DecodeError> {
        Ok(self.reader.fill_buf()?.is_empty())
    }

    /// Reads one line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>, DecodeError> {
        self.buf.clear();
        if self.reader.read_until(LINE_FEED, &mut self.buf)? == 0 {
            return Ok(None);
        }

        if self.buf.last() == Some(&LINE_FEED) {
            self.buf.pop();
            if self.buf.last() == Some(&CARRIAGE_RETURN) {
                self.buf.pop();
            }
        }

        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_debug_snapshot;

    fn names(file: &DecodedFile) -> Vec<&str> {
        file.records.iter().map(|r| r.name()).collect()
    }

    fn make_file(count: usize) -> String {
        (1..=count)
            .map(|i| format!("Plane {i}\n{i}00\n{i} m\nType {i}"))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    #[test]
    fn decoding_works_for_empty_file() {
        let result = decode_file(b"").unwrap();
        assert!(result.records.is_empty());
        assert_eq!(result.end, DecodeEnd::EndOfInput);
    }

    #[test]
    fn decoding_works_for_blank_lines_only() {
        let result = decode_file(b"\n\n\n").unwrap();
        assert!(result.records.is_empty());
        assert_eq!(result.end, DecodeEnd::EndOfInput);
    }

    #[test]
    fn decoding_works_for_single_record() {
        let result = decode_file(b"Boeing 747\n570\n224 ft\nWide-body airliner").unwrap();
        assert_eq!(result.end, DecodeEnd::EndOfInput);
        assert_debug_snapshot!(result.records.as_slice(), @r###"
        [
            Record {
                name: "Boeing 747",
                cruise_speed: "570",
                wingspan: "224 ft",
                description: "Wide-body airliner",
            },
        ]
        "###);
    }

    #[test]
    fn decoding_trims_fields() {
        let result = decode_file(b"  Boeing 747  \n\t570 \n 224 ft\n Wide-body \n").unwrap();
        let record = &result.records[0];
        assert_eq!(record.name(), "Boeing 747");
        assert_eq!(record.cruise_speed(), "570");
        assert_eq!(record.wingspan(), "224 ft");
        assert_eq!(record.description(), "Wide-body");
    }

    #[test]
    fn decoding_skips_extra_blank_lines_between_records() {
        let compact = decode_file(b"A\n1\n2\nx\n\nB\n3\n4\ny").unwrap();
        let padded = decode_file(b"\n\nA\n1\n2\nx\n\n\n\n\nB\n3\n4\ny\n\n").unwrap();
        assert_eq!(compact.records, padded.records);
        assert_eq!(names(&padded), vec!["A", "B"]);
    }

    #[test]
    fn decoding_keeps_blank_lines_inside_a_record() {
        let result = decode_file(b"A\n\n\nx").unwrap();
        let record = &result.records[0];
        assert_eq!(record.name(), "A");
        assert_eq!(record.cruise_speed(), "");
        assert_eq!(record.wingspan(), "");
        assert_eq!(record.description(), "x");
    }

    #[test]
    fn decoding_treats_whitespace_line_as_name() {
        let result = decode_file(b"   \n1\n2\nx").unwrap();
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].name(), "");
    }

    #[test]
    fn decoding_discards_partial_trailing_record() {
        let data = format!("{}\n\nPlane 4\n400", make_file(3));
        let result = decode_file(data.as_bytes()).unwrap();
        assert_eq!(names(&result), vec!["Plane 1", "Plane 2", "Plane 3"]);
        assert_eq!(result.end, DecodeEnd::PartialRecord { lines: 2 });
    }

    #[test]
    fn decoding_stops_at_capacity() {
        let data = make_file(15);
        let result = decode_file(data.as_bytes()).unwrap();
        assert_eq!(result.records.len(), 10);
        assert_eq!(result.records[9].name(), "Plane 10");
        assert_eq!(result.end, DecodeEnd::CapacityReached);
    }

    #[test]
    fn decoding_exactly_full_file_ends_normally() {
        let data = make_file(10);
        let result = decode_file(data.as_bytes()).unwrap();
        assert_eq!(result.records.len(), 10);
        assert_eq!(result.end, DecodeEnd::EndOfInput);
    }

    #[test]
    fn decoding_truncates_long_lines() {
        let data = format!(
            "{}\n{}\n{}\n{}",
            "N".repeat(60),
            "1234567890123",
            "W".repeat(25),
            "D".repeat(150)
        );
        let result = decode_file(data.as_bytes()).unwrap();
        let record = &result.records[0];
        assert_eq!(record.name().len(), 49);
        assert_eq!(record.cruise_speed(), "123456789");
        assert_eq!(record.wingspan().len(), 19);
        assert_eq!(record.description().len(), 99);
        assert_eq!(result.end, DecodeEnd::EndOfInput);
    }

    #[test]
    fn decoding_accepts_crlf_line_endings() {
        let result = decode_file(b"A\r\n1\r\n2\r\nx\r\n\r\nB\r\n3\r\n4\r\ny").unwrap();
        assert_eq!(names(&result), vec!["A", "B"]);
        assert_eq!(result.records[0].description(), "x");
    }

    #[test]
    fn decoding_replaces_invalid_utf8() {
        let result = decode_file(b"Pl\xFFne\n1\n2\nx").unwrap();
        assert_eq!(result.records[0].name(), "Pl\u{FFFD}ne");
    }

    #[test]
    fn reader_reads_one_record_at_a_time() {
        let mut reader = Reader::new(&b"A\n1\n2\nx\n\nB\n3"[..]);
        assert_eq!(
            reader.read_record().unwrap(),
            ReadRecord::Record(Record::new("A", "1", "2", "x"))
        );
        assert_eq!(
            reader.read_record().unwrap(),
            ReadRecord::PartialRecord { lines: 2 }
        );
        assert_eq!(reader.read_record().unwrap(), ReadRecord::EndOfInput);
    }
}
