//! CLI argument definitions using clap
//!
//! Commands:
//! - vsort sort [--config <path>] [--input <path>] [--by <field[:dir]>]... [--direction <dir>]
//! - vsort batch [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::sort::{Direction, SortSpec};

/// vsort - stable, multi-key sorting of JSON documents
#[derive(Parser, Debug)]
#[command(name = "vsort")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sort one JSON document and print it
    Sort {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Read the document from a file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,

        /// Field rule, highest priority first (e.g. `country`, `population:desc`)
        #[arg(long = "by", value_name = "FIELD[:asc|desc]")]
        by: Vec<SortSpec>,

        /// Final direction; `desc` reverses the whole output
        #[arg(long)]
        direction: Option<Direction>,
    },

    /// Read one sort request per stdin line and answer each on stdout
    Batch {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort_rules_in_order() {
        let cli = Cli::try_parse_from([
            "vsort",
            "sort",
            "--by",
            "country",
            "--by",
            "population:desc",
            "--direction",
            "desc",
        ])
        .unwrap();

        match cli.command {
            Command::Sort { by, direction, config, input } => {
                assert_eq!(by, vec![SortSpec::asc("country"), SortSpec::desc("population")]);
                assert_eq!(direction, Some(Direction::Descending));
                assert!(config.is_none());
                assert!(input.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_direction() {
        assert!(Cli::try_parse_from(["vsort", "sort", "--by", "name:up"]).is_err());
        assert!(Cli::try_parse_from(["vsort", "sort", "--direction", "sideways"]).is_err());
    }

    #[test]
    fn test_parse_batch() {
        let cli = Cli::try_parse_from(["vsort", "batch", "--config", "vsort.json"]).unwrap();
        match cli.command {
            Command::Batch { config } => assert_eq!(config, Some(PathBuf::from("vsort.json"))),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
