#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use toml_config::TomlConfig;

use crate::core::cursor::DEFAULT_CHUNK_SIZE;
use crate::core::probe::DEFAULT_PROBE_OFFSETS;
use crate::core::scan::ScanOptions;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

/// 1 GiB; a window is one contiguous allocation.
pub const MAX_CHUNK_SIZE: u64 = 1024 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Probe { offsets: u64 },
    Scan(ScanOptions),
}

/// Effective settings for one run: command line over TOML over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub file: String,
    pub chunk_size: u64,
    pub mode: Mode,
    pub json_output: bool,
    pub json_logs: bool,
    pub verbose: bool,
    pub monitor: bool,
}

impl Settings {
    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig, file_config: &TomlConfig) -> Self {
        let chunk_size = cli
            .chunk_size
            .or(file_config.cursor.chunk_size)
            .unwrap_or(DEFAULT_CHUNK_SIZE);

        let mode = match &cli.command {
            Command::Probe { offsets, .. } => Mode::Probe {
                offsets: offsets
                    .or(file_config.probe.offsets)
                    .unwrap_or(DEFAULT_PROBE_OFFSETS),
            },
            Command::Scan {
                timestamps,
                skip_payloads,
                allow_trailing,
                ..
            } => Mode::Scan(ScanOptions {
                chunk_size,
                timestamps: *timestamps || file_config.scan.timestamps.unwrap_or(false),
                skip_payloads: *skip_payloads || file_config.scan.skip_payloads.unwrap_or(false),
                allow_trailing: *allow_trailing
                    || file_config.scan.allow_trailing.unwrap_or(false),
            }),
        };

        Self {
            file: cli.command.file().to_string(),
            chunk_size,
            mode,
            json_output: cli.json,
            json_logs: file_config.json_logs(),
            verbose: cli.verbose,
            monitor: cli.monitor || file_config.monitoring.enabled.unwrap_or(false),
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("file", &self.file)?;
        validation::validate_range("chunk_size", self.chunk_size, 1, MAX_CHUNK_SIZE)?;
        if let Mode::Probe { offsets } = self.mode {
            validation::validate_positive_number("offsets", offsets, 1)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_overrides_toml() {
        let cli = CliConfig::try_parse_from(["bigfile", "probe", "f.bin", "--chunk-size", "64"])
            .unwrap();
        let file_config = TomlConfig::from_toml_str(
            "[cursor]\nchunk_size = 128\n[probe]\noffsets = 9\n[monitoring]\nenabled = true\n",
        )
        .unwrap();

        let settings = Settings::resolve(&cli, &file_config);
        assert_eq!(settings.chunk_size, 64);
        assert_eq!(settings.mode, Mode::Probe { offsets: 9 });
        assert!(settings.monitor);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_defaults_without_toml() {
        let cli = CliConfig::try_parse_from(["bigfile", "scan", "f.bin"]).unwrap();
        let settings = Settings::resolve(&cli, &TomlConfig::default());

        assert_eq!(settings.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(
            settings.mode,
            Mode::Scan(ScanOptions {
                chunk_size: DEFAULT_CHUNK_SIZE,
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let cli =
            CliConfig::try_parse_from(["bigfile", "probe", "f.bin", "--chunk-size", "0"]).unwrap();
        let settings = Settings::resolve(&cli, &TomlConfig::default());
        assert!(settings.validate().is_err());
    }
}
