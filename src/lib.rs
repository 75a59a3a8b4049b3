//! Decoder/Encoder for plain-text aircraft data files.
//!
//! A data file holds up to [MAX_RECORDS] aircraft, four lines each, with a
//! blank line between consecutive records and no newline after the last
//! one. See the [txt] module for the file format and [store] for loading
//! and saving a file by path.

use std::fmt;

pub mod menu;
mod normalize;
pub mod session;
pub mod store;
pub mod txt;

#[cfg(feature = "cli")]
pub mod logging;

pub use normalize::normalize;
pub use store::{MAX_RECORDS, RecordStore, StoreError, StoreFull, load_store, save_store};

/// One of the four fields of a [Record].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    CruiseSpeed,
    Wingspan,
    Description,
}

impl Field {
    /// All fields in file order.
    pub const ALL: [Field; 4] = [
        Field::Name,
        Field::CruiseSpeed,
        Field::Wingspan,
        Field::Description,
    ];

    /// Buffer length of the field, including one slot for a terminator.
    ///
    /// A stored value holds at most `buffer_len() - 1` characters.
    pub const fn buffer_len(self) -> usize {
        match self {
            Field::Name => 50,
            Field::CruiseSpeed => 10,
            Field::Wingspan => 20,
            Field::Description => 100,
        }
    }

    /// Maximum number of characters a stored value can hold.
    pub const fn max_chars(self) -> usize {
        self.buffer_len() - 1
    }

    pub const fn label(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::CruiseSpeed => "cruise speed",
            Field::Wingspan => "wingspan",
            Field::Description => "description",
        }
    }

    /// Normalizes `raw` to the stored form for this field.
    pub fn normalize(self, raw: &str) -> String {
        normalize(raw, self.buffer_len())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single aircraft entry.
///
/// Every value is kept in normalized form: trimmed and capped to
/// [Field::max_chars].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    name: String,
    cruise_speed: String,
    wingspan: String,
    description: String,
}

impl Record {
    pub fn new(name: &str, cruise_speed: &str, wingspan: &str, description: &str) -> Self {
        Self {
            name: Field::Name.normalize(name),
            cruise_speed: Field::CruiseSpeed.normalize(cruise_speed),
            wingspan: Field::Wingspan.normalize(wingspan),
            description: Field::Description.normalize(description),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cruise_speed(&self) -> &str {
        &self.cruise_speed
    }

    pub fn wingspan(&self) -> &str {
        &self.wingspan
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::CruiseSpeed => &self.cruise_speed,
            Field::Wingspan => &self.wingspan,
            Field::Description => &self.description,
        }
    }

    /// Replaces one field with the normalized form of `value`.
    pub fn edit_field(&mut self, field: Field, value: &str) -> &Self {
        let normalized = field.normalize(value);
        match field {
            Field::Name => self.name = normalized,
            Field::CruiseSpeed => self.cruise_speed = normalized,
            Field::Wingspan => self.wingspan = normalized,
            Field::Description => self.description = normalized,
        }
        self
    }

    /// Consuming variant of [Record::edit_field].
    pub fn with_field(mut self, field: Field, value: &str) -> Self {
        self.edit_field(field, value);
        self
    }

    /// Multi-line human readable form of the record, as shown by the
    /// interactive session. This is not the on-disk format.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name:     {}", self.name)?;
        writeln!(f, "Speed:    {} mph", self.cruise_speed)?;
        writeln!(f, "Wingspan: {}", self.wingspan)?;
        writeln!(f, "Type:     {}", self.description)?;
        writeln!(f, "----------------------------------")
    }
}
