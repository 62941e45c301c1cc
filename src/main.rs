use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use mediapopup::app::{self, SessionOptions};
use mediapopup::config::Config;
use mediapopup::HttpMediaSource;

/// Browse a paginated media library the way the editor's image popup does.
#[derive(Debug, Parser)]
#[command(name = "mediapopup", version)]
struct Cli {
    /// Media library endpoint, e.g. https://cms.example.com/api/media
    #[arg(long)]
    path: Option<String>,

    /// Access token forwarded with every request
    #[arg(long)]
    token: Option<String>,

    /// Config file (defaults to the XDG config directory)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Stop after this many pages (the first page always loads)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    max_pages: Option<u32>,

    /// Retry activations allowed after failed fetches
    #[arg(long, default_value_t = 0)]
    retries: u32,

    /// Insert the entry at this index when done
    #[arg(long, value_name = "INDEX")]
    select: Option<usize>,

    /// Height of the list container
    #[arg(long)]
    viewport_height: Option<f64>,

    /// Height of one list row
    #[arg(long)]
    row_height: Option<f64>,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.path {
            config.media.path = Some(path.clone());
        }
        if let Some(token) = &self.token {
            config.media.token = Some(token.clone());
        }
        if let Some(height) = self.viewport_height {
            config.viewport.height = height;
        }
        if let Some(row_height) = self.row_height {
            config.viewport.row_height = row_height;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mediapopup=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env(|key| std::env::var(key).ok());
    cli.apply(&mut config);

    let (path, token) = config.endpoint()?;
    let source = HttpMediaSource::new(path, token)?;

    let mut options = SessionOptions::new(&config.viewport);
    options.max_pages = cli.max_pages;
    options.retries = cli.retries;
    options.select = cli.select;

    let mut stdout = std::io::stdout().lock();
    let report = app::run(source, options, &mut stdout).await?;

    info!(
        items = report.items,
        pages = report.pages,
        all_loaded = report.all_loaded,
        inserted = report.commands.len(),
        "Session finished"
    );
    if report.gave_up {
        drop(stdout);
        std::process::exit(1);
    }
    Ok(())
}
