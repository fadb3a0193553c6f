//! The xorpack wire format.
//!
//! An archive is a plain concatenation of records with no header, footer, or
//! record count. Each record is self-delimiting through its two length
//! fields, and the archive length must equal the sum of its record lengths.
//! See [`record`] for the byte layout.

pub mod key;
pub mod reader;
pub mod record;
pub mod wire;
pub mod writer;

pub use key::Key;
pub use key::KeySource;
pub use key::RandomKeySource;
pub use key::SequenceKeySource;
pub use reader::ArchiveReader;
pub use record::RecordHeader;
pub use record::RecordMetadata;
pub use writer::ArchiveWriter;
