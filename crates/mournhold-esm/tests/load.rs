mod common;

use common::{file, named, sample, tes3, weapon, RecordBuilder};
use mournhold_common::Tag;
use mournhold_esm::records::{GlobalRecord, Tes3Record, WeaponRecord};
use mournhold_esm::{Diagnostic, EsmFile, Error, RecordFlags, RecordKind};
use quickcheck_macros::quickcheck;

#[test]
fn test_empty_buffer() {
    let esm = EsmFile::parse(&[]).unwrap();
    assert!(esm.is_empty());
    assert!(esm.diagnostics().is_empty());
    assert!(esm.header().is_none());
}

#[test]
fn test_header_only_file() {
    let data = file(&[tes3("Bethesda", "The main data file", &[])]);
    let esm = EsmFile::parse(&data).unwrap();

    assert_eq!(esm.len(), 1);
    let header = esm.header().and_then(|h| h.header.as_ref()).unwrap();
    assert_eq!(header.author, "Bethesda");
    assert_eq!(header.description, "The main data file");
    assert!(header.is_master());
    assert!(esm.objects().next().is_none());
}

#[test]
fn test_masters_pair_with_sizes() {
    let data = file(&[tes3(
        "",
        "",
        &[("Morrowind.esm", 79837557), ("Tribunal.esm", 4565686)],
    )]);
    let esm = EsmFile::parse(&data).unwrap();

    let header: &Tes3Record = esm.header().unwrap();
    let masters: Vec<_> = header
        .masters
        .iter()
        .map(|m| (m.name.as_str(), m.size))
        .collect();
    assert_eq!(
        masters,
        vec![("Morrowind.esm", 79837557), ("Tribunal.esm", 4565686)]
    );
}

#[test]
fn test_records_keep_stream_order_and_offsets() {
    let records = [
        tes3("", "", &[]),
        named(b"STAT", "in_lava_blacksquare"),
        weapon("iron dagger", 10),
    ];
    let data = file(&records);
    let esm = EsmFile::parse(&data).unwrap();

    let kinds: Vec<_> = esm.records().iter().flatten().map(|r| r.kind()).collect();
    assert_eq!(
        kinds,
        vec![RecordKind::Tes3, RecordKind::Static, RecordKind::Weapon]
    );

    let second = records[0].build().len();
    let third = second + records[1].build().len();
    let offsets: Vec<_> = esm.records().iter().flatten().map(|r| r.offset()).collect();
    assert_eq!(offsets, vec![0, second, third]);
}

#[test]
fn test_trailing_bytes_are_truncated_file() {
    let mut data = file(&[tes3("", "", &[])]);
    let end = data.len();
    data.extend_from_slice(&[0x53, 0x54, 0x41, 0x54]);

    match EsmFile::parse(&data) {
        Err(Error::TruncatedFile { offset, remaining }) => {
            assert_eq!(offset, end);
            assert_eq!(remaining, 4);
        }
        other => panic!("expected truncated file, got {:?}", other),
    }
}

#[test]
fn test_negative_size_is_rejected() {
    let data = named(b"STAT", "rock").build_with_size(-1);
    assert!(matches!(
        EsmFile::parse(&data),
        Err(Error::InvalidRecordSize { size: -1, .. })
    ));
}

#[test]
fn test_payload_past_end_of_stream() {
    let record = named(b"STAT", "rock");
    let data = record.build_with_size(record.payload_len() as i32 + 100);
    assert!(matches!(
        EsmFile::parse(&data),
        Err(Error::Common(mournhold_common::Error::UnexpectedEndOfStream { .. }))
    ));
}

#[test]
fn test_declared_size_one_short() {
    let record = weapon("iron dagger", 10);
    let size = record.payload_len();
    let mut data = record.build_with_size(size as i32 - 1);
    data.extend(named(b"STAT", "rock").build());

    match EsmFile::parse(&data) {
        Err(Error::RecordSizeMismatch {
            tag,
            offset,
            expected,
            actual,
        }) => {
            assert_eq!(tag, Tag::new(b"WEAP"));
            assert_eq!(offset, 0);
            assert_eq!(expected, size - 1);
            assert_eq!(actual, size);
        }
        other => panic!("expected size mismatch, got {:?}", other),
    }
}

#[test]
fn test_declared_size_one_long() {
    let record = weapon("iron dagger", 10).raw(&[0xAA]);
    let size = record.payload_len();
    let data = record.build();

    match EsmFile::parse(&data) {
        Err(Error::RecordSizeMismatch {
            expected, actual, ..
        }) => {
            assert_eq!(expected, size);
            assert_eq!(actual, size - 1);
        }
        other => panic!("expected size mismatch, got {:?}", other),
    }
}

#[test]
fn test_declared_size_off_by_one_for_every_kind() {
    for kind in RecordKind::ALL {
        let record = sample(kind);
        let size = record.payload_len();

        let mut short = record.build_with_size(size as i32 - 1);
        short.extend(named(b"STAT", "after").build());
        match EsmFile::parse(&short) {
            Err(Error::RecordSizeMismatch {
                tag,
                offset,
                expected,
                actual,
            }) => {
                assert_eq!(tag, kind.tag());
                assert_eq!(offset, 0);
                assert_eq!(expected, size - 1, "{}", kind);
                assert_eq!(actual, size, "{}", kind);
            }
            other => panic!("{}: expected size mismatch when short, got {:?}", kind, other),
        }

        let long = record.clone().raw(&[0xAA]).build();
        match EsmFile::parse(&long) {
            Err(Error::RecordSizeMismatch {
                tag,
                offset,
                expected,
                actual,
            }) => {
                assert_eq!(tag, kind.tag());
                assert_eq!(offset, 0);
                assert_eq!(expected, size + 1, "{}", kind);
                assert_eq!(actual, size, "{}", kind);
            }
            other => panic!("{}: expected size mismatch when long, got {:?}", kind, other),
        }
    }
}

/// A `GLOB` whose last `FLTV` declares 8 bytes with only 4 left in the record.
fn overlong_subrecord() -> RecordBuilder {
    named(b"GLOB", "g")
        .raw(b"FLTV")
        .raw(&8i32.to_le_bytes())
        .raw(&[0, 0, 0x40, 0x41])
}

#[test]
fn test_subrecord_past_record_end() {
    let record = overlong_subrecord();
    let size = record.payload_len();
    assert_eq!(size, 22);

    // followed by another record
    let mut data = file(&[tes3("", "", &[])]);
    let start = data.len();
    data.extend(record.build());
    data.extend(named(b"STAT", "rock").build());

    match EsmFile::parse(&data) {
        Err(Error::RecordSizeMismatch {
            tag,
            offset,
            expected,
            actual,
        }) => {
            assert_eq!(tag, Tag::new(b"GLOB"));
            assert_eq!(offset, start);
            assert_eq!(expected, size);
            assert_eq!(actual, size + 4);
        }
        other => panic!("expected size mismatch, got {:?}", other),
    }
}

#[test]
fn test_subrecord_past_end_of_stream() {
    let record = overlong_subrecord();
    let size = record.payload_len();

    match EsmFile::parse(&record.build()) {
        Err(Error::RecordSizeMismatch {
            tag,
            offset,
            expected,
            actual,
        }) => {
            assert_eq!(tag, Tag::new(b"GLOB"));
            assert_eq!(offset, 0);
            assert_eq!(expected, size);
            assert_eq!(actual, size + 4);
        }
        other => panic!("expected size mismatch, got {:?}", other),
    }
}

#[test]
fn test_subrecord_not_fully_consumed() {
    let data = file(&[named(b"GLOB", "GameHour").sub(b"FLTV", &[0, 0, 0x40, 0x41, 0])]);
    match EsmFile::parse(&data) {
        Err(Error::SubRecordSizeMismatch {
            record,
            subrecord,
            expected,
            actual,
            ..
        }) => {
            assert_eq!(record, Tag::new(b"GLOB"));
            assert_eq!(subrecord, Tag::new(b"FLTV"));
            assert_eq!(expected, 5);
            assert_eq!(actual, 4);
        }
        other => panic!("expected sub-record size mismatch, got {:?}", other),
    }
}

#[test]
fn test_subrecord_too_short_for_field() {
    let data = file(&[named(b"GLOB", "GameHour").sub(b"FLTV", &[0, 0])]);
    assert!(matches!(
        EsmFile::parse(&data),
        Err(Error::InvalidField { .. })
    ));
}

#[test]
fn test_unrecognized_record_is_skipped() {
    let data = file(&[
        tes3("", "", &[]),
        RecordBuilder::new(b"SSCR").string(b"DATA", "12345").string(b"NAME", "Startup"),
        named(b"STAT", "rock"),
    ]);
    let esm = EsmFile::parse(&data).unwrap();

    assert_eq!(esm.len(), 3);
    assert!(esm.records()[1].is_none());
    assert_eq!(esm.placeholder_count(), 1);
    assert_eq!(esm.records()[2].as_ref().map(|r| r.kind()), Some(RecordKind::Static));
    assert!(matches!(
        esm.diagnostics(),
        [Diagnostic::UnrecognizedRecordTag { tag, .. }] if *tag == Tag::new(b"SSCR")
    ));
}

#[test]
fn test_unrecognized_subrecord_is_skipped() {
    let data = file(&[named(b"GLOB", "GameHour")
        .sub(b"ZZZZ", &[1, 2, 3])
        .sub(b"FNAM", b"f")
        .f32(b"FLTV", 9.0)]);
    let esm = EsmFile::parse(&data).unwrap();

    let global = esm.records_of::<GlobalRecord>().next().unwrap();
    assert_eq!(global.value, 9.0);
    assert_eq!(global.value_type, b'f');
    assert!(matches!(
        esm.diagnostics(),
        [Diagnostic::UnrecognizedSubRecordTag { record, subrecord, size: 3, .. }]
            if *record == Tag::new(b"GLOB") && *subrecord == Tag::new(b"ZZZZ")
    ));
}

#[test]
fn test_deletion_markers() {
    let data = file(&[
        named(b"STAT", "by_flag").flags(RecordFlags::DELETED),
        named(b"STAT", "by_subrecord").u32(b"DELE", 0),
        named(b"STAT", "alive").flags(RecordFlags::PERSISTENT),
    ]);
    let esm = EsmFile::parse(&data).unwrap();

    let deleted: Vec<_> = esm
        .records_of_kind(RecordKind::Static)
        .map(|r| (r.id().unwrap_or_default(), r.is_deleted()))
        .collect();
    assert_eq!(
        deleted,
        vec![("by_flag", true), ("by_subrecord", true), ("alive", false)]
    );
    assert!(esm.diagnostics().is_empty());
}

#[test]
fn test_windows_1252_strings() {
    // 0x92 is a right single quote in Windows-1252
    let data = file(&[RecordBuilder::new(b"NPC_")
        .string(b"NAME", "ra'virr")
        .sub(b"FNAM", b"Ra\x92Virr\0")]);
    let esm = EsmFile::parse(&data).unwrap();
    let npc = esm
        .object_by_id("ra'virr")
        .and_then(|r| r.get::<mournhold_esm::records::NpcRecord>())
        .unwrap();
    assert_eq!(npc.name.as_deref(), Some("Ra\u{2019}Virr"));
}

#[test]
fn test_typed_access() {
    let data = file(&[weapon("iron dagger", 10)]);
    let esm = EsmFile::parse(&data).unwrap();

    let record = esm.object_by_id("iron dagger").unwrap();
    assert!(record.get::<GlobalRecord>().is_none());

    let weapon = record.get::<WeaponRecord>().unwrap();
    let stats = weapon.data.unwrap();
    assert_eq!({ stats.value }, 10);
    assert_eq!(weapon.name.as_deref(), Some("Iron Dagger"));
}

#[quickcheck]
fn unknown_records_never_desynchronize(payload: Vec<u8>) -> bool {
    let data = file(&[
        tes3("", "", &[]),
        RecordBuilder::new(b"XXXX").raw(&payload),
        named(b"STAT", "after"),
    ]);
    let Ok(esm) = EsmFile::parse(&data) else {
        return false;
    };

    esm.len() == 3
        && esm.records()[1].is_none()
        && esm.object_by_id("after").map(|r| r.kind()) == Some(RecordKind::Static)
        && esm.diagnostics().len() == 1
}
