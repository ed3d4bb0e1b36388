mod calc;
mod cmd;
mod data;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use data::{MapConfigBuilder, MapConfigDocument, Persistable};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(name = "geomap", about = "schedule-gated geolocation maps")]
struct Cli {
    /// Map configuration: inline JSON, or a path to a .json/.yaml file
    #[arg(long, env = "GEOLOC_OBJECTS", hide_env_values = true)]
    config: Option<String>,

    /// Directory that relative config paths are resolved against (default: .)
    #[arg(long, default_value = ".")]
    base_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether a map is currently open according to its schedule
    Status {
        /// Map name as configured in `mapName`
        map_name: String,
        /// Evaluate at this instant instead of now (RFC 3339, or YYYY-MM-DDTHH:MM on the map's clock)
        #[arg(long)]
        at: Option<String>,
    },
    /// List the French public holidays of a year
    Holidays {
        /// Year (default: current year)
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// List configured maps and their schedules
    Maps,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Holidays { year } => cmd::holidays::run(year),
        Commands::Status { map_name, at } => {
            let builder = load_builder(cli.config.as_deref(), &cli.base_dir)?;
            cmd::status::run(&builder, &map_name, at.as_deref())
        }
        Commands::Maps => {
            let builder = load_builder(cli.config.as_deref(), &cli.base_dir)?;
            cmd::maps::run(&builder)
        }
    }
}

/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geomap=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_builder(config: Option<&str>, base_dir: &Path) -> Result<MapConfigBuilder> {
    let base_dir = resolve_base_dir(base_dir)?;
    let document = MapConfigDocument::load_source(config.unwrap_or_default(), &base_dir)
        .context("failed to load map configuration")?;
    debug!(maps = document.maps.len(), "map configuration loaded");
    Ok(MapConfigBuilder::new(document))
}

/// Makes `dir` absolute so relative config paths do not depend on later cwd changes.
fn resolve_base_dir(dir: &Path) -> Result<PathBuf> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    Ok(std::env::current_dir()
        .context("failed to get current directory")?
        .join(dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_base_dir_keeps_absolute() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(resolve_base_dir(tmp.path()).unwrap(), tmp.path());
    }

    #[test]
    fn test_resolve_base_dir_makes_relative_absolute() {
        let resolved = resolve_base_dir(Path::new("conf")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("conf"));
    }

    #[test]
    fn test_load_builder_without_config_is_empty() {
        let tmp = TempDir::new().unwrap();
        let builder = load_builder(None, tmp.path()).unwrap();
        assert_eq!(builder.map_names().count(), 0);
    }

    #[test]
    fn test_load_builder_from_yaml_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("maps.yaml"),
            "- mapName: trams\n  time_ranges:\n    - days: [french_holidays]\n      startTime: closed\n",
        )
        .unwrap();
        let builder = load_builder(Some("maps.yaml"), tmp.path()).unwrap();
        let config = builder.build("trams").unwrap();
        assert_eq!(config.schedule.ranges().len(), 1);
    }

    #[test]
    fn test_load_builder_reports_bad_config() {
        let tmp = TempDir::new().unwrap();
        let err = load_builder(Some("{not json"), tmp.path()).unwrap_err();
        assert!(err.to_string().contains("failed to load map configuration"));
    }

    #[test]
    fn test_cli_parses_status_with_instant() {
        let cli = Cli::try_parse_from([
            "geomap",
            "--config",
            "[]",
            "status",
            "buses",
            "--at",
            "2025-07-14T11:00",
        ])
        .unwrap();
        match cli.command {
            Commands::Status { map_name, at } => {
                assert_eq!(map_name, "buses");
                assert_eq!(at.as_deref(), Some("2025-07-14T11:00"));
            }
            _ => panic!("expected status command"),
        }
    }

    #[test]
    fn test_cli_requires_a_command() {
        assert!(Cli::try_parse_from(["geomap"]).is_err());
    }
}
