//! The record read loop.

use mournhold_common::BinaryReader;
use tracing::{debug, warn};

use crate::field::Payload;
use crate::header::RecordHeader;
use crate::record::Record;
use crate::{Diagnostic, Error, LoadOptions, RecordKind, Result};

/// Loader state: more bytes to read, or the source is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    Reading,
    Done,
}

/// Output of a successful read pass.
pub(crate) struct RecordStream {
    /// One slot per record; `None` where the tag had no decoder.
    pub records: Vec<Option<Record>>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Drives the header → factory → decoder loop over a byte source.
pub(crate) struct Loader<'a> {
    reader: BinaryReader<'a>,
    options: &'a LoadOptions,
    records: Vec<Option<Record>>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Loader<'a> {
    pub fn new(data: &'a [u8], options: &'a LoadOptions) -> Self {
        Self {
            reader: BinaryReader::new(data),
            options,
            records: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Read every record until the source is exhausted.
    pub fn run(mut self) -> Result<RecordStream> {
        let mut state = self.next_state();
        while state == LoadState::Reading {
            self.step()?;
            state = self.next_state();
        }

        debug!(
            source = self.options.name(),
            records = self.records.len(),
            skipped = self.records.iter().filter(|r| r.is_none()).count(),
            diagnostics = self.diagnostics.len(),
            "finished reading records"
        );

        Ok(RecordStream {
            records: self.records,
            diagnostics: self.diagnostics,
        })
    }

    fn next_state(&self) -> LoadState {
        if self.reader.is_empty() {
            LoadState::Done
        } else {
            LoadState::Reading
        }
    }

    /// Read one record: header, then decoded or skipped payload.
    fn step(&mut self) -> Result<()> {
        let offset = self.reader.position();

        if self.reader.remaining() < RecordHeader::SIZE {
            return Err(Error::TruncatedFile {
                offset,
                remaining: self.reader.remaining(),
            });
        }

        let header: RecordHeader = self.reader.read_struct()?;
        let size = header.payload_size(offset)?;
        let tag = header.tag;

        // The payload must be present in full before any decoding starts.
        self.reader.peek_bytes(size)?;

        match RecordKind::from_tag(tag) {
            Some(kind) => {
                let start = self.reader.position();
                let payload = Payload {
                    header,
                    offset,
                    size,
                };
                let record = (kind.decoder())(&mut self.reader, &payload, &mut self.diagnostics)?;

                let consumed = self.reader.position() - start;
                if consumed != size {
                    return Err(Error::RecordSizeMismatch {
                        tag,
                        offset,
                        expected: size,
                        actual: consumed,
                    });
                }

                self.records.push(Some(record));
            }
            None => {
                warn!(source = self.options.name(), %tag, offset, size, "unsupported record type");
                self.diagnostics
                    .push(Diagnostic::UnrecognizedRecordTag { tag, offset, size });
                self.reader.skip(size)?;
                self.records.push(None);
            }
        }

        Ok(())
    }
}
