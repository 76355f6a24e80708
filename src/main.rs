use bigfile::utils::error::BigFileError;
use bigfile::utils::monitor::SystemMonitor;
use bigfile::utils::{logger, validation::Validate};
use bigfile::{
    BigFileProbe, CliConfig, LocalFileSource, Mode, ProbeProcessor, ProcessOutcome, Processor,
    RecordScanner, ScanProcessor, Session, Settings, TomlConfig,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file_config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => TomlConfig::default(),
    };

    let settings = Settings::resolve(&cli, &file_config);

    if settings.json_logs {
        logger::init_json_logger(settings.verbose);
    } else {
        logger::init_cli_logger(settings.verbose);
    }

    tracing::info!("Starting bigfile");
    tracing::debug!("Settings: {:?}", settings);

    if let Err(e) = file_config.validate().and_then(|_| settings.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor = SystemMonitor::new(settings.monitor);
    if monitor.is_enabled() {
        tracing::info!("🔍 System monitoring enabled");
    }

    let result = match &settings.mode {
        Mode::Probe { offsets } => {
            let probe = BigFileProbe::new(*offsets, settings.chunk_size);
            run(Session::new(ProbeProcessor::new(probe)), &settings, &monitor).await
        }
        Mode::Scan(options) => {
            let scanner = RecordScanner::new(options.clone());
            run(Session::new(ScanProcessor::new(scanner)), &settings, &monitor).await
        }
    };

    match result {
        Ok(outcome) => {
            print_outcome(&outcome, settings.json_output)?;
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Processing failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.severity().exit_code());
        }
    }
}

async fn run<P: Processor>(
    session: Session<P>,
    settings: &Settings,
    monitor: &SystemMonitor,
) -> Result<ProcessOutcome, BigFileError> {
    session.init().await?;
    monitor.log_stats("Initialized");

    let source = LocalFileSource::open(&settings.file).await?;
    let outcome = session
        .select(Some(&source))
        .await?
        .ok_or_else(|| BigFileError::ProcessingError {
            message: format!("no result for {}", settings.file),
        })?;

    monitor.log_final_stats(outcome.bytes_read());
    Ok(outcome)
}

fn print_outcome(outcome: &ProcessOutcome, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    match outcome {
        ProcessOutcome::Probe(report) => {
            println!("✅ Probe finished");
            println!("   File size:      {} bytes", report.file_len);
            println!("   Offsets probed: {}", report.offsets_probed);
            println!("   Window loads:   {}", report.chunk_loads);
            println!("   Bytes loaded:   {}", report.bytes_loaded);
            println!("   Elapsed:        {} ms", report.elapsed_ms);
        }
        ProcessOutcome::Scan(report) => {
            println!("✅ Scan finished");
            println!("   File size:      {} bytes", report.file_len);
            println!("   Records:        {}", report.records);
            println!("   Payload bytes:  {}", report.payload_bytes);
            println!("   Largest record: {} bytes", report.largest_record);
            if let (Some(first), Some(last)) = (report.first_time(), report.last_time()) {
                println!("   First record:   {}", first.to_rfc3339());
                println!("   Last record:    {}", last.to_rfc3339());
            }
            if report.trailing_bytes > 0 {
                println!("   ⚠️ Trailing:     {} bytes", report.trailing_bytes);
            }
            println!("   Window loads:   {}", report.chunk_loads);
            println!("   Elapsed:        {} ms", report.elapsed_ms);
        }
    }
    Ok(())
}
