//! Per-kind sub-record tables and the shared payload decoder.
//!
//! Each record body lists the sub-record tags it understands together with a
//! setter that decodes the sub-record's bytes into the body. The decoder walks
//! a record payload sub-record by sub-record and dispatches through that table.

use mournhold_common::{BinaryReader, Tag};
use tracing::warn;

use crate::header::{RecordHeader, SubRecordHeader};
use crate::record::{Record, RecordData};
use crate::{Diagnostic, Error, RecordKind, Result};

/// Decodes one sub-record's payload into a record body.
///
/// The reader is bounded to the sub-record's declared length and must be
/// consumed exactly.
pub type FieldDecoder<R> = fn(&mut R, &mut BinaryReader<'_>) -> mournhold_common::Result<()>;

/// One entry of a record kind's sub-record table.
pub struct Field<R> {
    /// Sub-record tag handled by this entry.
    pub tag: Tag,
    /// Setter for the sub-record's payload.
    pub decode: FieldDecoder<R>,
}

impl<R> Field<R> {
    /// Create a table entry.
    pub const fn new(tag: &[u8; 4], decode: FieldDecoder<R>) -> Self {
        Self {
            tag: Tag::new(tag),
            decode,
        }
    }
}

/// A concrete record kind's payload.
pub trait RecordBody: Default + Sized + 'static {
    /// The kind this body decodes.
    const KIND: RecordKind;

    /// Ordered sub-record table. Tags absent from it are reported as
    /// unrecognized and skipped.
    const FIELDS: &'static [Field<Self>];

    /// Wrap the body in the record enum.
    fn into_data(self) -> RecordData;

    /// Borrow the body back out of the record enum.
    fn from_data(data: &RecordData) -> Option<&Self>;

    /// The game-object identifier, for kinds indexed by one.
    fn id(&self) -> Option<&str> {
        None
    }

    /// Deletion marked inside the body, for kinds that list `DELE` in their
    /// own table.
    fn is_deleted(&self) -> bool {
        false
    }
}

/// Generic sub-record marking a record as deleted.
const DELE: Tag = Tag::new(b"DELE");

/// Location and size of a record payload in the stream.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Payload {
    pub header: RecordHeader,
    /// Offset of the record header.
    pub offset: usize,
    /// Declared payload size.
    pub size: usize,
}

/// Decoder entry point stored in the record registry.
pub(crate) type DecodeFn = fn(&mut BinaryReader<'_>, &Payload, &mut Vec<Diagnostic>) -> Result<Record>;

/// Decode a record payload positioned at the reader.
///
/// Sub-records are consumed until the declared size is exhausted. A trailing
/// fragment shorter than a sub-record header stops the loop; the caller checks
/// the final position against the declared size. A sub-record that runs past
/// the declared size fails with [`Error::RecordSizeMismatch`], reporting the
/// size the record would need to contain it.
pub(crate) fn decode_record<R: RecordBody>(
    reader: &mut BinaryReader<'_>,
    payload: &Payload,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Record> {
    let record_tag = payload.header.tag;
    let end = reader.position() + payload.size;
    let mut body = R::default();
    let mut deleted_marker = false;

    while reader.position() < end {
        if end - reader.position() < SubRecordHeader::SIZE {
            break;
        }

        let offset = reader.position();
        let sub_header: SubRecordHeader = reader.read_struct()?;
        let size = sub_header.payload_size(record_tag, offset)?;

        // A sub-record may not reach into the next record.
        if size > end - reader.position() {
            return Err(Error::RecordSizeMismatch {
                tag: record_tag,
                offset: payload.offset,
                expected: payload.size,
                actual: reader.position() + size - (end - payload.size),
            });
        }
        let bytes = reader.read_bytes(size)?;

        match R::FIELDS.iter().find(|field| field.tag == sub_header.tag) {
            Some(field) => {
                let mut sub = BinaryReader::new(bytes);
                (field.decode)(&mut body, &mut sub).map_err(|source| Error::InvalidField {
                    record: record_tag,
                    subrecord: sub_header.tag,
                    offset,
                    source,
                })?;

                if !sub.is_empty() {
                    return Err(Error::SubRecordSizeMismatch {
                        record: record_tag,
                        subrecord: sub_header.tag,
                        offset,
                        expected: size,
                        actual: sub.position(),
                    });
                }
            }
            None if sub_header.tag == DELE => deleted_marker = true,
            None => {
                warn!(record = %record_tag, subrecord = %sub_header.tag, offset, size, "unsupported sub-record");
                diagnostics.push(Diagnostic::UnrecognizedSubRecordTag {
                    record: record_tag,
                    subrecord: sub_header.tag,
                    offset,
                    size,
                });
            }
        }
    }

    Ok(Record::new(
        R::KIND,
        payload.header,
        payload.offset,
        deleted_marker,
        body.into_data(),
    ))
}

/// Collect the tags of a body's sub-record table.
pub(crate) fn field_tags<R: RecordBody>() -> Vec<Tag> {
    R::FIELDS.iter().map(|field| field.tag).collect()
}
