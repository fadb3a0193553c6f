//! Archive creation from filesystem inputs.

pub mod packer;
pub mod walker;

pub use packer::pack_archive;
pub use walker::EntryCollection;
pub use walker::PackEntry;
pub use walker::SkipReason;
pub use walker::SkippedEntry;
pub use walker::collect_entries;
