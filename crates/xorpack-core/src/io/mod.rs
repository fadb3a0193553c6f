//! I/O wrappers shared by the archive writer and reader.

pub mod counting;
pub mod progress;

pub use counting::CountingWriter;
pub use progress::ProgressReader;
pub use progress::ProgressTracker;
pub use progress::ProgressWriter;
