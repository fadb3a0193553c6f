//! Archive extraction into an output directory.

pub mod unpacker;

pub use unpacker::unpack_archive;
pub use unpacker::unpack_stream;
