use crate::catalog::CatalogItem;
use crate::fixtures::{self, LotSeed};
use crate::locale::Locale;
use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
    time::Duration,
};

const DEFAULT_LISTEN: &str = "127.0.0.1:3000";
const DEFAULT_TICK_MS: u64 = 1000;

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "auction-board",
    version,
    about = "mock auction board with live countdowns"
)]
pub struct Arguments {
    /// TOML file with settings and, optionally, the lots to seed
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub listen: Option<SocketAddr>,

    #[arg(long, value_enum)]
    pub locale: Option<Locale>,

    /// Countdown refresh interval
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Keep accepting bids on lots whose countdown has ended
    #[arg(long)]
    pub accept_bids_after_end: bool,
}

/// Shape of the `--config` file; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub listen: Option<SocketAddr>,
    pub locale: Option<Locale>,
    pub tick_ms: Option<u64>,
    pub accept_bids_after_end: Option<bool>,
    pub lots: Option<Vec<LotSeed>>,
    pub catalog: Option<Vec<CatalogItem>>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen: SocketAddr,
    pub locale: Locale,
    pub tick_interval: Duration,
    pub accept_bids_after_end: bool,
    pub lots: Vec<LotSeed>,
    pub catalog: Vec<CatalogItem>,
}

impl FileConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid config file")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let args = Arguments::parse();
        let file = match args.config.as_ref() {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(args, file)
    }

    /// Command line wins over the file, the file wins over defaults
    pub fn merge(args: Arguments, file: FileConfig) -> Result<Self> {
        let listen = match args.listen.or(file.listen) {
            Some(listen) => listen,
            None => DEFAULT_LISTEN.parse()?,
        };

        let tick_ms = args.tick_ms.or(file.tick_ms).unwrap_or(DEFAULT_TICK_MS);
        if tick_ms == 0 {
            bail!("tick interval must be positive");
        }

        Ok(Self {
            listen,
            locale: args.locale.or(file.locale).unwrap_or_default(),
            tick_interval: Duration::from_millis(tick_ms),
            accept_bids_after_end: args.accept_bids_after_end
                || file.accept_bids_after_end.unwrap_or(false),
            lots: file.lots.unwrap_or_else(fixtures::default_lot_seeds),
            catalog: file.catalog.unwrap_or_else(fixtures::default_catalog),
        })
    }
}
