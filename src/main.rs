mod cli;
mod io;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lumen_core::AdjustmentParameters;
use lumen_session::{EditorSession, RunOutcome, SessionConfig};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    let (session, _events) = EditorSession::new(&config, config.pipeline())?;

    let input = cli.input.clone();
    let original = tokio::task::spawn_blocking(move || io::load_rgba(&input)).await??;
    session.load_image(original).await?;

    if let Some(path) = &cli.params {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read parameters: {}", path.display()))?;
        let params: AdjustmentParameters = serde_json::from_str(&text)
            .with_context(|| format!("invalid parameters: {}", path.display()))?;
        session.set_parameters(params)?;
    }
    for &(adjustment, value) in &cli.controls {
        session.set_control(adjustment, value);
    }

    match session.render_now().await? {
        RunOutcome::Rendered => {}
        other => bail!("render did not complete: {other:?}"),
    }

    let rendered = session.rendered().context("no rendered image")?;
    let output = cli.output.clone();
    tokio::task::spawn_blocking(move || io::save_rgba(&output, &rendered)).await??;

    if cli.histogram {
        match session.histogram() {
            Some(histogram) => println!("{}", serde_json::to_string_pretty(&*histogram)?),
            None => warn!("no histogram available"),
        }
    }
    if cli.stats {
        println!("{}", serde_json::to_string_pretty(&session.stats())?);
    }

    let active: Vec<String> = session
        .parameters()
        .active()
        .map(|(adjustment, value)| format!("{adjustment}={value}"))
        .collect();
    info!(active = %active.join(" "), "done");
    Ok(())
}
