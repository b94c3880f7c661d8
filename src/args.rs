use clap::{Parser, Subcommand};
use profile_crawl::{CrawlerConfig, Result};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "profile-crawl")]
#[command(about = "Crawls a people directory, caches the profiles and serves them")]
#[command(version)]
pub struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Name to start crawling from
    #[arg(short, long, global = true)]
    pub seed: Option<String>,

    /// Snapshot file to read and write
    #[arg(long, global = true)]
    pub snapshot: Option<String>,

    /// What to do (defaults to `show`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Crawl from the seed and replace the snapshot
    Crawl,

    /// Load or crawl, then go through every profile and its portrait
    Show {
        /// Write portraits into this directory
        #[arg(long)]
        portrait_dir: Option<String>,

        /// Show each portrait in a desktop window
        #[arg(long)]
        window: bool,

        /// Milliseconds each portrait stays in the window
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Load or crawl, then serve the profiles over HTTP
    Serve {
        /// Address to listen on
        #[arg(short, long)]
        bind: Option<String>,
    },
}

impl Args {
    /// Configuration from the file (if any) with command-line overrides applied
    pub fn build_config(&self) -> Result<CrawlerConfig> {
        let mut config = match &self.config {
            Some(path) => CrawlerConfig::from_file(path)?,
            None => CrawlerConfig::default(),
        }
        .with_env_overrides();

        if let Some(seed) = &self.seed {
            config.seed = seed.clone();
        }
        if let Some(snapshot) = &self.snapshot {
            config.snapshot_path = snapshot.clone();
        }
        match &self.command {
            Some(Command::Show {
                portrait_dir,
                window,
                delay_ms,
            }) => {
                if let Some(dir) = portrait_dir {
                    config.portrait_dir = Some(dir.clone());
                }
                if *window {
                    config.show_window = true;
                }
                if let Some(delay_ms) = delay_ms {
                    config.portrait_delay_ms = *delay_ms;
                }
            }
            Some(Command::Serve { bind: Some(bind) }) => config.bind = bind.clone(),
            _ => {}
        }
        config.validate()?;
        Ok(config)
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Show {
            portrait_dir: None,
            window: false,
            delay_ms: None,
        })
    }
}
