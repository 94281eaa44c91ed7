use clap::Parser;
use race_sheets::config::cli::discover_inputs;
use race_sheets::utils::monitor::SystemMonitor;
use race_sheets::utils::{logger, validation::Validate};
use race_sheets::{BatchRunner, CliConfig, LocalStorage, Settings, XlsxRenderer};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting race-sheets");
    tracing::debug!("CLI config: {:?}", cli);
    tracing::info!("📁 Loading configuration from: {}", cli.config);

    let settings = match Settings::from_file(&cli.config) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Make sure the file exists and is valid JSON (or TOML for .toml files)");
            std::process::exit(1);
        }
    };

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let inputs = if !cli.files.is_empty() {
        cli.files.clone()
    } else if settings.specify_input_file {
        settings.explicit_inputs()
    } else {
        discover_inputs(&cli.input_dir)?
    };

    if inputs.is_empty() {
        tracing::error!("❌ No CSV files found in {}", cli.input_dir);
        eprintln!("❌ No CSV files found in {}", cli.input_dir);
        std::process::exit(1);
    }
    tracing::info!("Processing {} file(s): {}", inputs.len(), inputs.join(", "));

    let renderer = match XlsxRenderer::from_settings(&settings) {
        Ok(renderer) => renderer,
        Err(e) => {
            tracing::error!("❌ Invalid style configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let monitor = Arc::new(SystemMonitor::new(cli.monitor));
    if monitor.is_enabled() {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(cli.input_dir.clone());
    let runner = BatchRunner::new(storage, renderer, settings).with_monitor(monitor);

    let worst = if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no spreadsheets will be written");
        let report = runner.preview(&inputs).await;
        for outcome in &report.outcomes {
            if let Ok(leaderboard) = &outcome.result {
                println!("{}", serde_json::to_string_pretty(leaderboard)?);
            }
        }
        report.worst_severity()
    } else {
        let report = runner.run(&inputs).await;
        for outcome in &report.outcomes {
            if let Ok(output) = &outcome.result {
                println!("✅ {} -> {}", outcome.input, output);
            }
        }
        tracing::info!(
            "Done! {} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        );
        report.worst_severity()
    };

    if let Some(severity) = worst {
        let exit_code = severity.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
