//! Configuration and CLI argument handling

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde_json::Value;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "simply-countdown")]
#[command(about = "Serve a page with countdowns to a fixed date")]
#[command(version = "1.3.2")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20553")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Selector the countdowns are started on
    #[arg(short, long, default_value = ".simply-countdown")]
    pub selector: String,

    /// Number of countdown containers on the hosted page
    #[arg(short, long, default_value = "1")]
    pub containers: usize,

    /// Countdown options as inline JSON, e.g. '{"year":2030,"inline":true}'
    #[arg(short, long)]
    pub options: Option<String>,

    /// JSON file with countdown options, applied before --options
    #[arg(long)]
    pub options_file: Option<PathBuf>,

    /// Read time from a monotonic clock anchored at startup
    #[arg(long)]
    pub monotonic: bool,

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

    /// Option layers in application order: the file first, then inline JSON
    pub fn option_layers(&self) -> anyhow::Result<Vec<Value>> {
        let mut layers = Vec::new();

        if let Some(path) = &self.options_file {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read options file {}", path.display()))?;
            let value: Value = serde_json::from_str(&raw)
                .with_context(|| format!("Options file {} is not valid JSON", path.display()))?;
            layers.push(value);
        }

        if let Some(inline) = &self.options {
            let value: Value = serde_json::from_str(inline).context("--options is not valid JSON")?;
            layers.push(value);
        }

        Ok(layers)
    }
}
