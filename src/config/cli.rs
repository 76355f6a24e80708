use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "bigfile")]
#[command(about = "Read large files through a bounded in-memory window")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    /// Window size in bytes (default 16 MiB)
    #[arg(long, global = true)]
    pub chunk_size: Option<u64>,

    /// Path to a TOML settings file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Print the report as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Log CPU and memory usage around processing
    #[arg(long, global = true)]
    pub monitor: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum Command {
    /// Seek to each of the first N offsets and load a window there
    Probe {
        file: String,

        #[arg(long)]
        offsets: Option<u64>,
    },
    /// Walk the file as little-endian length-prefixed records
    Scan {
        file: String,

        /// Records start with a u32 seconds + u32 nanoseconds timestamp
        #[arg(long)]
        timestamps: bool,

        /// Step over payloads instead of loading them
        #[arg(long)]
        skip_payloads: bool,

        /// Report a truncated final record instead of failing
        #[arg(long)]
        allow_trailing: bool,
    },
}

impl Command {
    pub fn file(&self) -> &str {
        match self {
            Command::Probe { file, .. } | Command::Scan { file, .. } => file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_probe() {
        let config =
            CliConfig::try_parse_from(["bigfile", "probe", "data.bag", "--offsets", "10"]).unwrap();
        assert!(matches!(
            config.command,
            Command::Probe {
                offsets: Some(10),
                ..
            }
        ));
        assert_eq!(config.command.file(), "data.bag");
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let config = CliConfig::try_parse_from([
            "bigfile",
            "scan",
            "data.bag",
            "--timestamps",
            "--chunk-size",
            "4096",
            "--json",
        ])
        .unwrap();
        assert_eq!(config.chunk_size, Some(4096));
        assert!(config.json);
        assert!(matches!(
            config.command,
            Command::Scan {
                timestamps: true,
                skip_payloads: false,
                ..
            }
        ));
    }

    #[test]
    fn test_file_is_required() {
        assert!(CliConfig::try_parse_from(["bigfile", "probe"]).is_err());
    }
}
