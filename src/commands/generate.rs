//! Generate static files

use anyhow::Result;
use notify_debouncer_mini::new_debouncer;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::generator::{BuildReport, Generator};
use crate::{Folio, CONFIG_FILE};

/// Generate the static site
pub fn run(folio: &Folio) -> Result<BuildReport> {
    let start = Instant::now();

    let generator = Generator::new(folio)?;
    let report = generator.generate()?;

    tracing::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());
    Ok(report)
}

/// Paths whose changes trigger a rebuild
pub fn watched_paths(folio: &Folio) -> Vec<(PathBuf, notify::RecursiveMode)> {
    let mut paths = Vec::new();
    for dir in [&folio.source_dir, &folio.data_dir, &folio.static_dir] {
        if dir.exists() {
            paths.push((dir.clone(), notify::RecursiveMode::Recursive));
        }
    }
    let config = folio.base_dir.join(CONFIG_FILE);
    if config.exists() {
        paths.push((config, notify::RecursiveMode::NonRecursive));
    }
    paths
}

/// Changes worth a rebuild: editor backups and VCS internals are ignored
pub fn is_relevant_change(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.ends_with('~')
        && !path_str.ends_with(".swp")
}

/// Quiet period before a burst of changes triggers a rebuild
const DEBOUNCE: Duration = Duration::from_millis(500);

/// Rebuild when any of `paths` matters. `None` means nothing relevant
/// changed and no build ran.
pub fn rebuild_for<'a, I>(folio: &Folio, paths: I) -> Option<Result<BuildReport>>
where
    I: IntoIterator<Item = &'a Path>,
{
    let changed: Vec<&Path> = paths.into_iter().filter(|p| is_relevant_change(p)).collect();
    if changed.is_empty() {
        return None;
    }
    for path in &changed {
        tracing::info!("File changed: {}", path.display());
    }
    Some(run(folio))
}

/// Rebuild after every debounced batch of changes, calling `on_build` after
/// each successful build. Blocks for as long as the watcher lives.
///
/// Changes arriving during a build are queued by the debouncer and start
/// another build once it finishes.
pub fn rebuild_on_change<F>(folio: &Folio, mut on_build: F) -> Result<()>
where
    F: FnMut(&BuildReport),
{
    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(DEBOUNCE, tx)?;

    for (path, mode) in watched_paths(folio) {
        debouncer.watcher().watch(&path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }
    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    for batch in rx {
        let events = match batch {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
                continue;
            }
        };
        match rebuild_for(folio, events.iter().map(|e| e.path.as_path())) {
            Some(Ok(report)) => on_build(&report),
            Some(Err(e)) => tracing::error!("Generation failed: {:#}", e),
            None => {}
        }
    }

    Ok(())
}

/// Watch for file changes and regenerate
pub async fn watch(folio: &Folio) -> Result<()> {
    let folio = folio.clone();
    tokio::task::spawn_blocking(move || rebuild_on_change(&folio, |_| {})).await?
}
