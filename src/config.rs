//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

use crate::sections::SectionSource;

/// Storefront endpoint serving the public home sections
pub const DEFAULT_SECTIONS_URL: &str = "http://127.0.0.1:5000/api/home-sections/public";

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "festival-countdown")]
#[command(about = "Live festival countdown banners for storefront home sections")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// URL of the public home sections endpoint
    #[arg(long, default_value = DEFAULT_SECTIONS_URL, conflicts_with = "sections_file")]
    pub sections_url: String,

    /// Read home sections from a local JSON file instead of the endpoint
    #[arg(long)]
    pub sections_file: Option<PathBuf>,

    /// Seconds between two refreshes of the home sections
    #[arg(short, long, default_value = "10")]
    pub refresh_secs: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Source the home sections are loaded from
    pub fn section_source(&self) -> SectionSource {
        match &self.sections_file {
            Some(path) => SectionSource::File { path: path.clone() },
            None => SectionSource::Http { url: self.sections_url.clone() },
        }
    }
}
