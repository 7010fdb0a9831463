use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use webreader_core::DEFAULT_ENDPOINT_BASE;
use webreader_engine::{ExportOptions, ReaderConfig, API_KEY_ENV, ENDPOINT_ENV};

#[derive(Debug, Parser)]
#[command(
    name = "webreader",
    version,
    about = "Extract article links from a saved page and convert the articles to Markdown"
)]
pub struct Cli {
    /// Log level: off, error, warn, info, debug or trace.
    #[arg(long, global = true, default_value = "info", value_parser = parse_level)]
    pub log_level: LevelFilter,

    /// Also write logs to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

fn parse_level(value: &str) -> Result<LevelFilter, String> {
    value
        .parse()
        .map_err(|_| format!("unknown log level {value:?}"))
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the extracted records as a JSON listing and a URL list.
    Extract(ExtractArgs),
    /// Extract records and convert every article to a Markdown file.
    Convert(ConvertArgs),
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Saved page containing `data-link`/`data-title` attributes.
    #[arg(short, long)]
    pub input: PathBuf,

    /// File name of the JSON listing (default: `<input stem>_extracted.json`).
    #[arg(short = 'j', long = "json")]
    pub json_name: Option<String>,

    /// File name of the URL list (default: `extracted_urls_<input stem>.txt`).
    #[arg(short = 'u', long = "url")]
    pub url_name: Option<String>,
}

impl InputArgs {
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions::for_input(&self.input)
            .with_listing_filename(self.json_name.clone())
            .with_url_filename(self.url_name.clone())
    }

    /// Directory holding the input file.
    pub fn input_dir(&self) -> PathBuf {
        match self.input.parent() {
            Some(parent) if parent != Path::new("") => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Directory for the listings (default: the input file's directory).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Directory for the Markdown files (default: `converted_files/<YYYYMMDD>`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for the listings (default: the input file's directory).
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Do not write the JSON listing and URL list.
    #[arg(long)]
    pub skip_export: bool,

    /// Reader API key.
    #[arg(long, env = API_KEY_ENV, default_value = "", hide_env_values = true, hide_default_value = true)]
    pub api_key: String,

    /// Reader endpoint base URL.
    #[arg(long, env = ENDPOINT_ENV, default_value = DEFAULT_ENDPOINT_BASE)]
    pub endpoint: String,

    /// Request timeout per article, in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Pause between two articles, in milliseconds.
    #[arg(long, default_value_t = 0)]
    pub delay_ms: u64,
}

impl ConvertArgs {
    pub fn reader_config(&self) -> ReaderConfig {
        let mut config = ReaderConfig::new(self.api_key.clone()).with_endpoint(self.endpoint.clone());
        config.fetch.request_timeout = Duration::from_secs(self.timeout_secs);
        config.delay_between = Duration::from_millis(self.delay_ms);
        config
    }
}
