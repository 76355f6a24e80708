pub mod cursor;
pub mod probe;
pub mod processors;
pub mod scan;
pub mod session;

pub use crate::domain::model::{ProbeReport, ProcessOutcome, ScanReport};
pub use crate::domain::ports::{ByteSource, Processor};
pub use crate::utils::error::Result;
