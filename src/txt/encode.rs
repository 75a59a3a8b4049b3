use super::consts::*;
use crate::{Field, Record};
use std::io::{Cursor, Write};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub fn encode_file(records: &[Record]) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write(records)?;
    Ok(writer.into_inner().into_inner())
}

pub struct Writer<W: Write> {
    writer: W,
}

impl<W: Write> Writer<W> {
    pub fn new(inner: W) -> Self {
        Self { writer: inner }
    }

    pub fn write(&mut self, records: &[Record]) -> Result<(), EncodeError> {
        let last = records.len().saturating_sub(1);
        for (i, record) in records.iter().enumerate() {
            self.write_record(record, i == last)?;

            // no trailing newline after the last record
            if i != last {
                self.writer.write_all(RECORD_SEPARATOR)?;
            }
        }

        self.writer.flush()?;
        Ok(())
    }

    fn write_record(&mut self, record: &Record, is_last: bool) -> Result<(), EncodeError> {
        if record.name().is_empty() {
            warn!("writing record with empty name, it will be read back as a separator line");
        }
        if is_last && record.description().is_empty() {
            warn!(
                name = record.name(),
                "writing last record with empty description, it will be read back as a partial record"
            );
        }

        for field in [Field::Name, Field::CruiseSpeed, Field::Wingspan] {
            self.write_field(record.get(field))?;
            self.writer.write_all(&[LINE_FEED])?;
        }
        self.write_field(record.description())?;
        Ok(())
    }

    fn write_field(&mut self, value: &str) -> Result<(), EncodeError> {
        let line = value.split(LINE_BREAKS).next().unwrap_or_default();
        self.writer.write_all(line.as_bytes())?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::txt::{DecodeEnd, decode_file};

    fn make_records(count: usize) -> Vec<Record> {
        (1..=count)
            .map(|i| Record::new(&format!("Plane {i}"), &format!("{i}00"), "40 ft", "Prop"))
            .collect()
    }

    #[test]
    fn encoding_works_for_no_records() {
        assert_eq!(encode_file(&[]).unwrap(), b"");
    }

    #[test]
    fn encoding_single_record_has_no_trailing_newline() {
        let records = [Record::new("Boeing 747", "570", "224 ft", "Wide-body airliner")];
        let encoded = encode_file(&records).unwrap();
        assert_eq!(encoded, b"Boeing 747\n570\n224 ft\nWide-body airliner");
    }

    #[test]
    fn encoding_separates_records_with_one_blank_line() {
        let records = [
            Record::new("Boeing 747", "570", "224 ft", "Wide-body airliner"),
            Record::new("Cessna 172", "140", "36 ft", "Light trainer"),
        ];
        let encoded = encode_file(&records).unwrap();
        assert_eq!(
            String::from_utf8(encoded.clone()).unwrap(),
            "Boeing 747\n570\n224 ft\nWide-body airliner\n\nCessna 172\n140\n36 ft\nLight trainer"
        );

        let decoded = decode_file(&encoded).unwrap();
        assert_eq!(decoded.records.as_slice(), records.as_slice());
        assert_eq!(decoded.end, DecodeEnd::EndOfInput);
    }

    #[test]
    fn encoding_round_trips() {
        for count in 1..=10 {
            let records = make_records(count);
            let encoded = encode_file(&records).unwrap();
            let decoded = decode_file(&encoded).unwrap();
            assert_eq!(decoded.records.as_slice(), records.as_slice(), "{count} records");
        }
    }

    #[test]
    fn encoding_round_trips_empty_non_name_fields() {
        let records = [Record::new("Glider", "", "", ""), Record::new("Kite", "", "", "Kite")];
        let encoded = encode_file(&records).unwrap();
        assert_eq!(encoded, b"Glider\n\n\n\n\nKite\n\n\nKite");
        let decoded = decode_file(&encoded).unwrap();
        assert_eq!(decoded.records.as_slice(), records.as_slice());
        assert_eq!(decoded.end, DecodeEnd::EndOfInput);
    }

    #[test]
    fn empty_description_on_last_record_is_lost() {
        let records = [Record::new("Glider", "", "", "x"), Record::new("Kite", "", "", "")];
        let encoded = encode_file(&records).unwrap();
        assert_eq!(encoded, b"Glider\n\n\nx\n\nKite\n\n\n");
        let decoded = decode_file(&encoded).unwrap();
        assert_eq!(decoded.records.as_slice(), &records[..1]);
        assert_eq!(decoded.end, DecodeEnd::PartialRecord { lines: 3 });
    }

    #[test]
    fn encoding_truncates_long_fields() {
        let records = [Record::new(&"N".repeat(80), "1234567890123", "W", "D")];
        let encoded = encode_file(&records).unwrap();
        let decoded = decode_file(&encoded).unwrap();
        assert_eq!(decoded.records[0].name(), "N".repeat(49));
        assert_eq!(decoded.records[0].cruise_speed(), "123456789");
    }

    #[test]
    fn encoding_cuts_fields_at_line_breaks() {
        let records = [
            Record::new("Two\nLines", "1", "2", "first\r\nsecond"),
            Record::new("Next", "3", "4", "y"),
        ];
        let encoded = encode_file(&records).unwrap();
        assert_eq!(encoded, b"Two\n1\n2\nfirst\n\nNext\n3\n4\ny");
    }

    #[test]
    fn writer_writes_to_any_stream() {
        let mut writer = Writer::new(Vec::new());
        writer.write(&make_records(2)).unwrap();
        let bytes = writer.into_inner();
        assert!(bytes.ends_with(b"Prop"));
        assert_eq!(bytes.iter().filter(|&&b| b == b'\n').count(), 3 + 2 + 3);
    }
}
