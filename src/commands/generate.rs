//! Generate static files

use anyhow::Result;
use notify::Watcher;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::generator::Generator;
use crate::{Folio, CONFIG_FILE};

/// Generate the static site
pub async fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();

    let report = Generator::new(folio)?.generate().await?;

    tracing::info!(
        "Generated {} pages, {} posts and {} assets",
        report.pages,
        report.posts,
        report.assets
    );
    if report.failed_posts > 0 {
        tracing::warn!("{} posts could not be loaded", report.failed_posts);
    }

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Watch site inputs and regenerate on change
pub async fn watch(folio: &Folio) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    for dir in [&folio.content_dir, &folio.assets_dir] {
        if dir.exists() {
            watcher.watch(dir, notify::RecursiveMode::Recursive)?;
            tracing::debug!("Watching: {:?}", dir);
        }
    }
    for file in [folio.records_path.clone(), folio.base_dir.join(CONFIG_FILE)] {
        if file.exists() {
            watcher.watch(&file, notify::RecursiveMode::NonRecursive)?;
            tracing::debug!("Watching: {:?}", file);
        }
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut folio = folio.clone();
    while let Some(event) = rx.recv().await {
        if event.paths.iter().all(|p| p.starts_with(&folio.public_dir)) {
            continue;
        }

        // Collapse a burst of events into one rebuild
        tokio::time::sleep(Duration::from_millis(300)).await;
        while rx.try_recv().is_ok() {}

        tracing::info!("File changed, regenerating...");
        match Folio::new(&folio.base_dir) {
            Ok(reloaded) => folio = reloaded,
            Err(e) => tracing::error!("Failed to reload config: {}", e),
        }
        if let Err(e) = run(&folio).await {
            tracing::error!("Generation failed: {}", e);
        }
    }

    Ok(())
}
