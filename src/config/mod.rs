pub mod cli;
pub mod settings;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "race-sheets")]
#[command(about = "Turns race-timing CSV exports into per-category results spreadsheets")]
pub struct CliConfig {
    /// Results exports to convert; overrides the files named in the config
    pub files: Vec<String>,

    #[arg(long, default_value = settings::DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Directory holding the exports; spreadsheets are written next to them
    #[arg(long, default_value = ".")]
    pub input_dir: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(long, help = "Decode the exports and print the leaderboards without writing spreadsheets")]
    pub dry_run: bool,
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["race-sheets"]);
        assert_eq!(config.config, "./config.json");
        assert_eq!(config.input_dir, ".");
        assert!(config.files.is_empty());
        assert!(!config.dry_run);
    }

    #[test]
    fn test_cli_files_and_flags() {
        let config = CliConfig::parse_from([
            "race-sheets",
            "--config",
            "season.toml",
            "--verbose",
            "round1.csv",
            "round2.csv",
        ]);
        assert_eq!(config.config, "season.toml");
        assert_eq!(config.files, vec!["round1.csv", "round2.csv"]);
        assert!(config.verbose);
    }
}
