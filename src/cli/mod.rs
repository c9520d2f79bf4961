pub mod commands;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::{parse_interval, Config};
use crate::locale::Locale;

#[derive(Parser)]
#[command(name = "brooklet")]
#[command(about = "A reactive terminal RSS aggregator", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/brooklet/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Idle time between poll ticks (e.g. "5s", "2m")
    #[arg(short, long, global = true, value_parser = parse_interval)]
    pub interval: Option<Duration>,

    /// Poll once immediately instead of waiting one interval
    #[arg(long, global = true)]
    pub poll_on_start: bool,

    /// Language for user-facing messages (en, ru)
    #[arg(long, global = true)]
    pub locale: Option<Locale>,

    /// Number of parallel workers for fetching feeds
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    /// Fetch through an AllOrigins-style proxy endpoint
    #[arg(long, global = true)]
    pub proxy: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Flags win over values from the config file.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(interval) = self.interval {
            config.poll.interval = interval;
        }
        if self.poll_on_start {
            config.poll.poll_on_start = true;
        }
        if let Some(locale) = self.locale {
            config.ui.locale = locale;
        }
        if let Some(workers) = self.workers {
            config.poll.workers = workers;
        }
        if let Some(proxy) = &self.proxy {
            config.fetch.proxy = Some(proxy.clone());
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI
    Tui {
        /// Feeds to subscribe to on start
        urls: Vec<String>,
    },
    /// Subscribe to feeds and print new posts as they arrive
    Watch {
        #[arg(required = true)]
        urls: Vec<String>,

        /// Stop after this many poll ticks
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// Fetch and parse a feed once without subscribing
    Check {
        url: String,
    },
}
