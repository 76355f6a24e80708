pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{Mode, Settings, TomlConfig};

pub use adapters::{LocalFileSource, MemorySource};
pub use crate::core::{
    cursor::PartialLoadCursor,
    probe::BigFileProbe,
    processors::{ProbeProcessor, ScanProcessor},
    scan::{RecordScanner, ScanOptions},
    session::Session,
};
pub use domain::model::{ProbeReport, ProcessOutcome, ScanReport};
pub use domain::ports::{ByteSource, Processor};
pub use utils::error::{BigFileError, Result};
