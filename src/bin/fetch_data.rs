//! Downloads the boundary and case datasets into `assets/`.
//!
//! The viewer embeds (release) or reads (debug) these files at startup, so
//! run this once before the first build and again whenever the data should
//! be refreshed.

use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use outbreak_map::{BOUNDARIES_ASSET, CASES_ASSET};
use std::path::{Path, PathBuf};
use tokio::fs as tokio_fs;

/// US state boundaries as a GeoJSON FeatureCollection.
const DEFAULT_BOUNDARIES_URL: &str =
    "https://raw.githubusercontent.com/PublicaMundi/MappingAPI/master/data/geojson/us-states.json";

const USER_AGENT: &str = "outbreak-map";

/// Fetch the datasets the viewer loads from `assets/`.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// URL of the case-count CSV. The file must have a header row with
    /// `county`, `state`, `long`, `lat`, `cases` and `deaths` columns.
    #[arg(long)]
    cases_url: String,

    /// URL of the boundary GeoJSON (FeatureCollection of polygons).
    #[arg(long, default_value = DEFAULT_BOUNDARIES_URL)]
    boundaries_url: String,

    /// Output directory, relative to the working directory.
    #[arg(long, default_value = "assets")]
    out_dir: PathBuf,

    /// Re-download files that already exist.
    #[arg(long)]
    force: bool,
}

async fn download(client: &reqwest::Client, url: &str, path: &Path, force: bool) -> Result<()> {
    if !force && tokio_fs::try_exists(path).await.unwrap_or(false) {
        println!("{} already exists, skipping (use --force to refresh)", path.display());
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        tokio_fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await
        .with_context(|| format!("requesting {url}"))?;

    if !response.status().is_success() {
        bail!("failed to fetch {}: {}", url, response.status());
    }

    let progress = match response.content_length() {
        Some(length) => ProgressBar::new(length).with_style(
            ProgressStyle::with_template("{msg} {bytes}/{total_bytes} [{bar:30}]")
                .context("invalid progress template")?,
        ),
        None => ProgressBar::new_spinner(),
    };
    progress.set_message(path.display().to_string());

    let mut body = Vec::new();
    let mut response = response;
    while let Some(chunk) = response.chunk().await? {
        body.extend_from_slice(&chunk);
        progress.inc(chunk.len() as u64);
    }
    progress.finish();

    tokio_fs::write(path, &body)
        .await
        .with_context(|| format!("writing {}", path.display()))?;
    println!("wrote {} ({} bytes)", path.display(), body.len());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let client = reqwest::Client::new();

    // Both files or nothing: the viewer refuses to start with partial data.
    let boundaries_path = args.out_dir.join(BOUNDARIES_ASSET);
    let cases_path = args.out_dir.join(CASES_ASSET);
    tokio::try_join!(
        download(
            &client,
            &args.boundaries_url,
            &boundaries_path,
            args.force,
        ),
        download(
            &client,
            &args.cases_url,
            &cases_path,
            args.force,
        ),
    )?;

    println!("Done. Release builds embed the files; rebuild to pick up changes.");
    Ok(())
}
