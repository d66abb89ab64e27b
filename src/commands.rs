//! Subcommand implementations.

use crate::diagnostic::IntoDiagnosticExn;
use futures::{StreamExt, pin_mut};
use miette::{IntoDiagnostic, WrapErr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use veneer_cache::{Entry, Repository};
use veneer_config::Config;
use veneer_extract::Element;
use veneer_library::{Stage, scan::ScanEvent};
use veneer_preview::PreviewCache;

/// Scan the themes directory, refreshing stale catalog records.
pub async fn scan(config: &Config, repo: &Repository, prune: bool) -> miette::Result<()> {
    let stream = veneer_library::scan::scan(repo, &config.themes_dir);
    pin_mut!(stream);
    while let Some(event) = stream.next().await {
        match event.into_diagnostic().wrap_err("scan failed")? {
            ScanEvent::Started => info!(dir = %config.themes_dir.display(), "scanning themes directory"),
            ScanEvent::Discovered { .. } => {},
            ScanEvent::Ingested(ingest) => {
                println!("  + {} ({})", ingest.entry.title(), ingest.entry.file.file_name);
            },
            ScanEvent::Rejected { path, reason } => {
                println!("  ! skipped {}: {reason}", path.display());
            },
            ScanEvent::Complete { ingested, rejected } => {
                println!("{ingested} theme(s) cataloged, {rejected} rejected");
            },
        }
    }
    if prune {
        for file_name in veneer_library::prune(repo).await.into_diagnostic()? {
            println!("  - pruned {file_name}");
        }
    }
    Ok(())
}

/// List cataloged themes, optionally only those providing one element.
pub async fn list(repo: &Repository, element: Option<&str>) -> miette::Result<()> {
    let entries = match element {
        Some(raw) => {
            let element: Element = raw.parse::<Element>().into_diagnostic()?;
            repo.list_with_element(element).await.into_diagnostic()?
        },
        None => repo.list_all().await.into_diagnostic()?,
    };
    if entries.is_empty() {
        println!("no themes cataloged");
        return Ok(());
    }
    for entry in &entries {
        let version = entry.manifest.descriptor.version.as_deref().unwrap_or("-");
        let author = entry.manifest.descriptor.author.as_deref().unwrap_or("unknown");
        let complete = if entry.manifest.elements.is_complete() { " [complete]" } else { "" };
        println!("{} v{version} by {author}{complete}", entry.title());
        println!("    {} - {}", entry.file.file_name, element_summary(entry));
    }
    Ok(())
}

/// Show one catalog record in full.
pub async fn show(repo: &Repository, file_name: &str) -> miette::Result<()> {
    let entry = require(repo, file_name).await?;
    let descriptor = &entry.manifest.descriptor;
    println!("{}", entry.title());
    println!("  file:      {}", entry.file.path.display());
    println!("  size:      {} bytes", entry.file.size);
    println!("  modified:  {}", entry.file.modified);
    if let Some(author) = &descriptor.author {
        println!("  author:    {author}");
    }
    if let Some(designer) = &descriptor.designer {
        println!("  designer:  {designer}");
    }
    if let Some(version) = &descriptor.version {
        println!("  version:   {version}");
    }
    if let Some(ui_version) = &descriptor.ui_version {
        println!("  ui:        {ui_version}");
    }
    println!("  native:    {}", descriptor.native);
    println!("  elements:  {}", element_summary(&entry));
    println!("  complete:  {}", entry.manifest.elements.is_complete());
    if !entry.manifest.previews.is_empty() {
        println!("  previews:");
        for preview in &entry.manifest.previews {
            println!("    - {preview}");
        }
    }
    Ok(())
}

/// Remove a theme: catalog record, backing archive, staged assets.
pub async fn remove(config: &Config, repo: &Repository, file_name: &str) -> miette::Result<()> {
    let entry = require(repo, file_name).await?;
    let stage = Stage::new(&config.data_dir);
    veneer_library::remove(repo, &stage, &entry).await.into_diagnostic()?;
    println!("removed {file_name}");
    Ok(())
}

/// Stage a theme's sounds into the data directory.
pub async fn stage_ringtones(config: &Config, repo: &Repository, file_name: &str) -> miette::Result<()> {
    let entry = require(repo, file_name).await?;
    let stage = Stage::new(&config.data_dir);
    let staged = stage.stage_ringtones(&entry.file.path).await.into_diagnostic()?;
    if staged.is_empty() {
        println!("{file_name} carries no sounds");
        return Ok(());
    }
    for path in staged {
        println!("staged {}", path.display());
    }
    Ok(())
}

/// Decode a theme's preview thumbnail and write it as PNG.
pub async fn thumbnail(repo: &Repository, file_name: &str, out: &Path) -> miette::Result<()> {
    let entry = require(repo, file_name).await?;
    let cache = Arc::new(PreviewCache::new());
    let thumbnail = cache
        .fetch_detached(entry)
        .await
        .into_diagnostic()
        .wrap_err("thumbnail worker vanished")?
        .into_diagnostic()?;
    let out = normalize_png_path(out);
    thumbnail.image().save(&out).into_diagnostic()?;
    println!("wrote {}x{} thumbnail to {}", thumbnail.width(), thumbnail.height(), out.display());
    Ok(())
}

async fn require(repo: &Repository, file_name: &str) -> miette::Result<Entry> {
    repo.get_by_file_name(file_name)
        .await
        .into_diagnostic()?
        .ok_or_else(|| miette::miette!("no cataloged theme named {file_name} - run `veneer scan` first?"))
}

fn element_summary(entry: &Entry) -> String {
    let provided = entry.manifest.elements.provided();
    if provided.is_empty() {
        return "no elements".to_string();
    }
    provided.iter().map(|e| e.label()).collect::<Vec<_>>().join(", ")
}

fn normalize_png_path(out: &Path) -> PathBuf {
    match out.extension() {
        Some(_) => out.to_path_buf(),
        None => out.with_extension("png"),
    }
}
