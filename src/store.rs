//! Bounded in-memory record collection and its file storage.

use crate::Record;
use crate::txt::{self, DecodeError, DecodedFile, EncodeError};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Maximum number of records a data file holds.
pub const MAX_RECORDS: usize = 10;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("record store is full")]
pub struct StoreFull;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("could not open {path} for reading")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not open {path} for writing")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Ordered collection of at most [MAX_RECORDS] records.
///
/// Records keep their insertion order. They can be edited in place but
/// not removed or reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            records: Vec::with_capacity(MAX_RECORDS),
        }
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= MAX_RECORDS
    }

    /// Appends a record, leaving the store untouched if it is full.
    pub fn push(&mut self, record: Record) -> Result<(), StoreFull> {
        if self.is_full() {
            return Err(StoreFull);
        }
        self.records.push(record);
        Ok(())
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Record> {
        self.records.get_mut(index)
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }
}

impl Deref for RecordStore {
    type Target = [Record];

    fn deref(&self) -> &[Record] {
        &self.records
    }
}

impl TryFrom<Vec<Record>> for RecordStore {
    type Error = StoreFull;

    fn try_from(records: Vec<Record>) -> Result<Self, StoreFull> {
        if records.len() > MAX_RECORDS {
            return Err(StoreFull);
        }
        Ok(Self { records })
    }
}

/// Reads the data file at `path`.
///
/// A missing or unreadable file is an error. An empty file is not: it
/// yields an empty store.
pub fn load_store(path: impl AsRef<Path>) -> Result<DecodedFile, StoreError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| StoreError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoded = txt::Reader::new(BufReader::new(file)).read_all()?;
    info!(path = %path.display(), count = decoded.records.len(), "loaded records");
    Ok(decoded)
}

/// Replaces the data file at `path` with the contents of `store`.
pub fn save_store(store: &RecordStore, path: impl AsRef<Path>) -> Result<(), StoreError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| StoreError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    txt::Writer::new(BufWriter::new(file)).write(store)?;
    info!(path = %path.display(), count = store.len(), "saved records");
    Ok(())
}
