//! Property-based tests for the codec and path validation.
//!
//! These tests use proptest to generate arbitrary keys, paths, and payloads
//! and check that the wire format and safety rules hold for all of them.

#![allow(clippy::expect_used)]

use std::io::Cursor;
use std::path::Path;

use proptest::prelude::*;
use xorpack_core::Key;
use xorpack_core::PackError;
use xorpack_core::SafePath;
use xorpack_core::copy::ChunkBuffer;
use xorpack_core::format::ArchiveReader;
use xorpack_core::format::ArchiveWriter;
use xorpack_core::format::wire::decode_u64;
use xorpack_core::format::wire::encode_u64;
use xorpack_core::format::wire::host_to_wire;
use xorpack_core::format::wire::wire_to_host;
use xorpack_core::test_utils::ArchiveBuilder;

fn component() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.-]{1,12}".prop_filter("not a dot segment", |s| s != "." && s != "..")
}

fn relative_path() -> impl Strategy<Value = String> {
    prop::collection::vec(component(), 1..5).prop_map(|parts| parts.join("/"))
}

proptest! {
    /// Records written by the writer decode to the same path and content.
    #[test]
    fn prop_record_round_trip(
        key in 1u8..=255,
        path in relative_path(),
        content in prop::collection::vec(any::<u8>(), 0..2048),
        chunk in 1usize..64,
    ) {
        let key = Key::new(key).expect("non-zero key");
        let safe = SafePath::validate(&path).expect("generated path is safe");
        let mut buffer = ChunkBuffer::new(chunk);

        let mut writer = ArchiveWriter::new(Vec::new());
        writer
            .write_record(key, &safe, &mut content.as_slice(), content.len() as u64, Path::new("src"), &mut buffer)
            .expect("write record");
        let bytes = writer.finish().expect("finish");
        prop_assert_eq!(bytes.len(), 17 + path.len() + content.len());
        prop_assert_eq!(bytes[0], key.get());

        let mut reader = ArchiveReader::new(Cursor::new(bytes)).expect("reader");
        let record = reader.next_header().expect("header").expect("one record");
        prop_assert_eq!(record.key, key);
        prop_assert_eq!(record.path.as_str(), path.as_str());
        prop_assert_eq!(record.content_len, content.len() as u64);

        let mut out = Vec::new();
        reader.copy_content_to(&mut out, Path::new("dst"), &mut buffer).expect("content");
        prop_assert_eq!(out, content);
        prop_assert!(reader.next_header().expect("end").is_none());
        reader.finish().expect("fully consumed");
    }

    /// Any path with a `..` segment is rejected at encode time.
    #[test]
    fn prop_parent_segment_rejected_on_encode(
        prefix in prop::collection::vec(component(), 0..4),
        suffix in prop::collection::vec(component(), 0..4),
    ) {
        let mut parts = prefix;
        parts.push("..".to_string());
        parts.extend(suffix);
        let path = parts.join("/");

        let result = SafePath::validate(&path);
        prop_assert!(
            matches!(result, Err(PackError::UnsafePath { .. })),
            "path {} should be rejected",
            path
        );
    }

    /// Any record whose path has a `..` segment is rejected at decode time,
    /// whatever the key.
    #[test]
    fn prop_parent_segment_rejected_on_decode(
        key in 1u8..=255,
        prefix in prop::collection::vec(component(), 0..4),
        separator in prop::sample::select(vec!["/", "\\"]),
        content in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let mut parts = prefix;
        parts.push("..".to_string());
        parts.push("escape".to_string());
        let path = parts.join(separator);

        let bytes = ArchiveBuilder::new().raw_path(key, path.as_bytes(), &content).build();
        let mut reader = ArchiveReader::new(Cursor::new(bytes)).expect("reader");
        let err = reader.next_header().expect_err("traversal must fail");
        prop_assert!(err.is_security_violation(), "unexpected error: {}", err);
    }

    /// Well-formed relative paths are accepted unchanged.
    #[test]
    fn prop_relative_paths_accepted(path in relative_path()) {
        let safe = SafePath::validate(&path).expect("valid path");
        prop_assert_eq!(safe.as_str(), path.as_str());
    }

    /// Length fields decode to the value they were encoded from, and the
    /// bytes are big-endian regardless of host order.
    #[test]
    fn prop_length_field_is_big_endian(value in any::<u64>()) {
        let bytes = encode_u64(value);
        prop_assert_eq!(bytes, value.to_be_bytes());
        prop_assert_eq!(decode_u64(bytes), value);
        // A big-endian reader and a little-endian reader agree on the bytes.
        prop_assert_eq!(u64::from_be_bytes(bytes), value);
        prop_assert_eq!(u64::from_le_bytes(bytes).swap_bytes(), value);
        prop_assert_eq!(host_to_wire(value).to_ne_bytes(), bytes);
        prop_assert_eq!(wire_to_host(u64::from_ne_bytes(bytes)), value);
    }

    /// Dropping any suffix of a valid archive is detected.
    #[test]
    fn prop_truncation_detected(
        key in 1u8..=255,
        content in prop::collection::vec(any::<u8>(), 0..256),
        cut in 1usize..64,
    ) {
        let full = ArchiveBuilder::new().file(key, "data.bin", &content).build();
        let cut = cut.min(full.len());
        let bytes = ArchiveBuilder::new().file(key, "data.bin", &content).truncate(cut).build();
        prop_assume!(!bytes.is_empty());

        let mut reader = ArchiveReader::new(Cursor::new(bytes)).expect("reader");
        let result = reader.next_header().and_then(|record| {
            if record.is_some() {
                reader.copy_content_to(&mut std::io::sink(), Path::new("dst"), &mut ChunkBuffer::new(32))?;
            }
            reader.finish()
        });
        prop_assert!(result.is_err(), "truncation by {} bytes went unnoticed", cut);
    }
}

#[test]
fn test_zero_key_is_never_drawn() {
    use xorpack_core::KeySource;
    use xorpack_core::RandomKeySource;

    let mut keys = RandomKeySource::seeded(42);
    for _ in 0..10_000 {
        assert_ne!(keys.next_key().get(), 0);
    }
}
