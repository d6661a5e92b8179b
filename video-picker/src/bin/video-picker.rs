use clap::Parser;
use jiff::Timestamp;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use video_picker::config::{DEFAULT_SEARCH_PERIOD_DAYS, PickerConfig, Settings};

/// Find the most promising recently published YouTube videos for some search terms.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// The terms to query. Can be multiple.
    #[arg(required = true)]
    search_terms: Vec<String>,

    /// The number of days to search for.
    #[arg(long, default_value_t = DEFAULT_SEARCH_PERIOD_DAYS)]
    search_period: u32,

    /// YAML file holding the `api_key`.
    #[arg(long, default_value = "./config.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // stdout is reserved for the leaderboard
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    let settings = Settings::load_or_default(&cli.config);
    let config = PickerConfig::new(cli.search_terms, cli.search_period, settings)?;
    tracing::debug!(?config, "resolved configuration");

    let mut stdout = std::io::stdout().lock();
    video_picker::run(config, Timestamp::now(), &mut stdout).await?;

    Ok(())
}
