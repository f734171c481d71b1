//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Redline using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Redline - PII detection and document redaction
#[derive(Parser, Debug)]
#[command(name = "redline")]
#[command(version, about, long_about = None)]
#[command(author = "Redline Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "redline.toml", env = "REDLINE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "REDLINE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a text file and print the matches
    Scan(commands::scan::ScanArgs),

    /// Detect and place PII on the pages of a layout document
    Locate(commands::locate::LocateArgs),

    /// Mask PII in a text file
    Mask(commands::mask::MaskArgs),

    /// Map a preview rectangle to a page and page coordinates
    MapRegion(commands::map_region::MapRegionArgs),

    /// Replace cells and columns of a workbook
    Cells(commands::cells::CellsArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_scan() {
        let cli = Cli::parse_from(["redline", "scan", "notes.txt"]);
        assert_eq!(cli.config, "redline.toml");
        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.file.to_string_lossy(), "notes.txt");
                assert!(args.report.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["redline", "--config", "custom.toml", "scan", "a.txt"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["redline", "--log-level", "debug", "scan", "a.txt"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_scan_report() {
        let cli = Cli::parse_from(["redline", "scan", "a.txt", "--report", "json"]);
        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.report, Some(commands::scan::ReportFormat::Json));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_locate_literals() {
        let cli = Cli::parse_from([
            "redline",
            "locate",
            "doc.json",
            "--literal",
            "Jane Roe",
            "--literal",
            "ACME",
            "--redact-out",
            "out.json",
        ]);
        match cli.command {
            Commands::Locate(args) => {
                assert_eq!(args.literals, vec!["Jane Roe", "ACME"]);
                assert!(args.redact_out.is_some());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_map_region() {
        let cli = Cli::parse_from([
            "redline",
            "map-region",
            "--page-heights",
            "792,792",
            "--rect",
            "10,900,50,20",
        ]);
        match cli.command {
            Commands::MapRegion(args) => {
                assert_eq!(args.rects, vec!["10,900,50,20"]);
                assert!(args.zoom.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_cells() {
        let cli = Cli::parse_from([
            "redline", "cells", "book.json", "--cell", "B7", "--column", "C", "-o", "out.json",
        ]);
        assert!(matches!(cli.command, Commands::Cells(_)));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["redline", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["redline", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
