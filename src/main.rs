use clap::Parser;
use profile_crawl::config::Backend;
use profile_crawl::{Crawl, Result, server, viewer};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

mod args;
use args::{Args, Command};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ::log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<()> {
    let config = args.build_config()?;

    if config.backend == Backend::WebDriver {
        println!("Note: the webdriver backend requires a WebDriver server (e.g., ChromeDriver).");
        println!(
            "Set WEBDRIVER_URL environment variable if not using {}",
            config.webdriver_url
        );
    }

    let crawl = Crawl::new(config);
    match args.command() {
        Command::Crawl => {
            let start_time = std::time::Instant::now();
            let snapshot = crawl.run().await?;
            ::log::info!(
                "Crawled {} profiles in {:.2} seconds",
                snapshot.len(),
                start_time.elapsed().as_secs_f64()
            );
        }
        Command::Show { .. } => {
            let snapshot = crawl.load_or_run().await?;
            let portrait_dir = crawl.config().portrait_dir.as_deref().map(Path::new);
            let mut stdout = std::io::stdout().lock();
            let summary = viewer::show_all(&snapshot, &mut stdout, portrait_dir)?;
            ::log::info!(
                "Showed {} profiles ({} portraits decoded)",
                summary.profiles,
                summary.portraits_decoded
            );

            if crawl.config().show_window {
                let delay = Duration::from_millis(crawl.config().portrait_delay_ms);
                tokio::task::block_in_place(|| viewer::show_window(&snapshot, delay))?;
            }
        }
        Command::Serve { .. } => {
            let snapshot = Arc::new(crawl.load_or_run().await?);
            let bind = crawl.config().bind.clone();
            tokio::task::block_in_place(move || server::serve(snapshot, &bind))?;
        }
    }
    Ok(())
}
