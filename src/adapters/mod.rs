// Adapters layer: concrete byte sources behind the ByteSource port.

pub mod source;

pub use source::{LocalFileSource, MemorySource};
