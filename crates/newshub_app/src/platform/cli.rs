use std::time::Duration;

use clap::{Parser, ValueEnum};
use newshub_core::Category;
use newshub_engine::{SourceSettings, DEFAULT_BASE_URL};

use super::logging::LogDestination;

/// Browse breaking news by category, search and page through results.
#[derive(Debug, Parser)]
#[command(name = "newshub", version)]
pub struct Cli {
    /// API key for the news source.
    #[arg(long, env = "NEWSHUB_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Endpoint returning `{results, nextPage}` pages.
    #[arg(long, env = "NEWSHUB_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, env = "NEWSHUB_LANGUAGE", default_value = "en")]
    pub language: String,

    /// Category shown on start.
    #[arg(long, default_value = "top", value_parser = parse_category)]
    pub category: Category,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

impl Cli {
    pub fn source_settings(&self) -> SourceSettings {
        SourceSettings {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            language: self.language.clone(),
            request_timeout: Duration::from_secs(self.timeout_secs),
            ..SourceSettings::default()
        }
    }
}

fn parse_category(raw: &str) -> Result<Category, String> {
    raw.parse().map_err(|err: newshub_core::UnknownCategory| {
        let known: Vec<_> = Category::ALL.iter().map(|c| c.as_str()).collect();
        format!("{err}; expected one of {}", known.join(", "))
    })
}
