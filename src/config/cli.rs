use super::toml_config::AppConfig;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "catch-report.toml";

#[derive(Debug, Clone, Parser)]
#[command(name = "catch-report")]
#[command(about = "Collect Kobe-area fishing catch reports and render a static report page")]
pub struct CliArgs {
    /// Path to TOML configuration file (built-in defaults when omitted and
    /// ./catch-report.toml does not exist)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the output directory
    #[arg(short, long)]
    pub output: Option<String>,

    /// Build the report as of this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Skip all sources and use seasonal patterns only
    #[arg(long)]
    pub offline: bool,

    /// Log process CPU and memory per phase
    #[arg(long)]
    pub monitor: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Show the effective settings without fetching or writing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// The config file to read, if any.
    pub fn config_path(&self) -> Option<PathBuf> {
        match &self.config {
            Some(path) => Some(path.clone()),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            }
        }
    }

    /// Command-line flags win over the file.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(output) = &self.output {
            config.report.output_dir = output.clone();
        }
        if self.offline {
            config.report.offline = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_flags() {
        let args = CliArgs::try_parse_from([
            "catch-report",
            "--config",
            "kobe.toml",
            "--output",
            "./out",
            "--date",
            "2026-10-16",
            "--offline",
            "--monitor",
            "--verbose",
            "--json-logs",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(args.config_path(), Some(PathBuf::from("kobe.toml")));
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2026, 10, 16));
        assert!(args.offline && args.monitor && args.verbose && args.json_logs && args.dry_run);
    }

    #[test]
    fn test_bad_date_is_rejected() {
        assert!(CliArgs::try_parse_from(["catch-report", "--date", "10/16"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let args = CliArgs::try_parse_from(["catch-report", "-o", "/tmp/site", "--offline"]).unwrap();
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.output_dir(), "/tmp/site");
        assert!(config.report.offline);
    }

    #[test]
    fn test_flags_absent_keep_config() {
        let args = CliArgs::try_parse_from(["catch-report"]).unwrap();
        let mut config = AppConfig::default();
        config.report.output_dir = "./from-file".to_string();
        args.apply(&mut config);

        assert_eq!(config.output_dir(), "./from-file");
        assert!(!config.report.offline);
    }
}
