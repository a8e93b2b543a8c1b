use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use livecast::api::http::HttpMatchApi;
use livecast::api::MatchApi;
use livecast::config::{Cli, Command};
use livecast::error::Result;
use livecast::execution::{Pipeline, PlaylistBuilder, RunOutcome};
use livecast::writer::PlaylistWriter;

#[tokio::main(flavor = "current_thread")]
pub async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("livecast=info")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.config()?;
    let api = HttpMatchApi::new(config.base_url.as_str(), config.timeout)?;

    if let Some(Command::Streams { source, match_id }) = cli.command {
        let streams = api.streams(&source, &match_id).await;
        println!("Found {} streams for {source}/{match_id}", streams.len());
        for stream in streams {
            println!("{stream}");
        }
        return Ok(());
    }

    let pipeline = Pipeline::new(
        api,
        PlaylistBuilder::new(config.base_url.as_str()),
        PlaylistWriter::new(&config.output_path).with_atomic(config.atomic),
    );

    println!("Fetching live matches from {}...", config.base_url);
    match pipeline.run().await? {
        RunOutcome::NoMatches => println!("No live matches available."),
        RunOutcome::Written {
            matches,
            entries,
            path,
        } => println!(
            "Wrote {entries} of {matches} live matches to {}",
            path.display()
        ),
    }

    Ok(())
}
