//! Command-line interface definitions for gazzettino_rss.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every option is optional: with no arguments the program runs with its
//! built-in settings and writes the feed next to the executable.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the feed generator.
///
/// # Examples
///
/// ```sh
/// # Built-in settings, feed written next to the binary
/// gazzettino_rss
///
/// # Override settings from a YAML file and choose the output location
/// gazzettino_rss -c ./gazzettino.yaml -o /var/www/feeds/nordest.xml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML file overriding the built-in settings
    #[arg(short, long, env = "GAZZETTINO_RSS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Where to write the RSS feed (takes precedence over the config file)
    #[arg(short, long, env = "GAZZETTINO_RSS_OUTPUT")]
    pub output: Option<PathBuf>,
}
