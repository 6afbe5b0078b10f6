use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::app::{AppContext, FeedloomError, Result};
use crate::config::OutputFormat;
use crate::detect::detect_format;
use crate::domain::Feed;
use crate::jsonfeed::{self, generate::generate_feed};

pub async fn detect(ctx: &AppContext, path: &Path) -> Result<()> {
    let body = ctx.loader.load(path).await?;
    let text = std::str::from_utf8(&body)?;

    match detect_format(text) {
        Some(format) => println!("{}", format),
        None => println!("unknown"),
    }

    Ok(())
}

pub async fn parse(ctx: &AppContext, path: &Path) -> Result<()> {
    let body = ctx.loader.load(path).await?;
    let feed = ctx.normalizer.normalize(&body)?;

    println!("{}", render(ctx, &feed)?);
    Ok(())
}

pub async fn batch(ctx: &AppContext, paths: Vec<PathBuf>) -> Result<()> {
    println!("Normalizing {} documents...", paths.len());

    let results = ctx.batch.normalize_all(paths, &ctx.normalizer).await;

    let mut total_entries = 0;
    let mut errors = 0;

    for (path, result) in results {
        match result {
            Ok(feed) => {
                total_entries += feed.entries.len();
                println!(
                    "  {} entries from {} ({})",
                    feed.entries.len(),
                    feed.display_title(),
                    path.display()
                );
            }
            Err(e) => {
                errors += 1;
                eprintln!("  Error normalizing {}: {}", path.display(), e);
            }
        }
    }

    println!(
        "Batch complete: {} entries, {} errors",
        total_entries, errors
    );
    Ok(())
}

/// JSON text for `feed` in the configured output format.
pub fn render(ctx: &AppContext, feed: &Feed) -> Result<String> {
    let value = match ctx.config.output.format {
        OutputFormat::Canonical => serde_json::to_value(feed)?,
        OutputFormat::JsonFeed => generate_feed(&jsonfeed::Feed::from(feed))?,
    };

    to_json(&value, ctx.config.output.pretty)
}

fn to_json(value: &Value, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.map_err(FeedloomError::from)
}
