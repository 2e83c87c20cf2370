//! File watching for live reload.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// A TOML file (catalogue override or site config) was modified
    CatalogueModified(PathBuf),

    /// Any other watched file (e.g. under `public/`) was modified
    AssetModified(PathBuf),

    /// File was created
    Created(PathBuf),

    /// File was deleted
    Deleted(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &Path {
        match self {
            WatchEvent::CatalogueModified(p)
            | WatchEvent::AssetModified(p)
            | WatchEvent::Created(p)
            | WatchEvent::Deleted(p) => p,
        }
    }
}

/// Watches the catalogue, config and public files.
pub struct FileWatcher {
    watcher: RecommendedWatcher,
    watched: HashSet<PathBuf>,
}

/// Quiet period before buffered events are delivered.
const DEBOUNCE: Duration = Duration::from_millis(100);

impl FileWatcher {
    /// Create a new file watcher for the given files and directories.
    ///
    /// Missing paths are skipped. Returns the watcher and a channel to
    /// receive events; events stop when the watcher is dropped. Events are
    /// held until the watched files have been quiet for 100ms, then
    /// delivered once per path.
    pub fn new(
        paths: &[PathBuf],
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        for path in paths {
            if path.exists() {
                watcher
                    .watch(path, RecursiveMode::Recursive)
                    .map_err(std::io::Error::other)?;
                tracing::debug!("Watching {}", path.display());
            } else {
                tracing::debug!("Not watching missing path {}", path.display());
            }
        }

        // notify delivers on its own thread; bridge into the async channel
        std::thread::spawn(move || {
            let mut pending: Vec<WatchEvent> = Vec::new();

            loop {
                let received = if pending.is_empty() {
                    sync_rx.recv().map_err(|_| RecvTimeoutError::Disconnected)
                } else {
                    sync_rx.recv_timeout(DEBOUNCE)
                };

                match received {
                    Ok(event) => {
                        for path in &event.paths {
                            if let Some(e) = classify_event(path, &event.kind) {
                                coalesce(&mut pending, e);
                            }
                        }
                    }
                    // Quiet for a full window: flush one event per path
                    Err(RecvTimeoutError::Timeout) => {
                        for e in pending.drain(..) {
                            if async_tx.blocking_send(e).is_err() {
                                return;
                            }
                        }
                    }
                    Err(RecvTimeoutError::Disconnected) => {
                        for e in pending.drain(..) {
                            let _ = async_tx.blocking_send(e);
                        }
                        return;
                    }
                }
            }
        });

        let watched = paths.iter().filter(|p| p.exists()).cloned().collect();

        Ok((
            Self {
                watcher,
                watched,
            },
            async_rx,
        ))
    }

    /// Start watching any of `paths` not already watched.
    ///
    /// Used after a config reload points the catalogue or public directory
    /// somewhere new. Missing paths are skipped.
    pub fn watch_new(&mut self, paths: &[PathBuf]) -> Result<(), std::io::Error> {
        for path in paths {
            if self.watched.contains(path) || !path.exists() {
                continue;
            }
            self.watcher
                .watch(path, RecursiveMode::Recursive)
                .map_err(std::io::Error::other)?;
            tracing::debug!("Watching {}", path.display());
            self.watched.insert(path.clone());
        }
        Ok(())
    }
}

/// Queue `event`, replacing any pending event for the same path.
fn coalesce(pending: &mut Vec<WatchEvent>, event: WatchEvent) {
    pending.retain(|e| e.path() != event.path());
    pending.push(event);
}

/// Classify a notify event into a WatchEvent.
fn classify_event(path: &Path, kind: &notify::EventKind) -> Option<WatchEvent> {
    use notify::EventKind;

    let path = path.to_path_buf();

    match kind {
        EventKind::Create(_) => Some(WatchEvent::Created(path)),
        EventKind::Remove(_) => Some(WatchEvent::Deleted(path)),
        EventKind::Modify(_) => {
            if path.extension().is_some_and(|ext| ext == "toml") {
                Some(WatchEvent::CatalogueModified(path))
            } else {
                Some(WatchEvent::AssetModified(path))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, DataChange, ModifyKind, RemoveKind};
    use notify::EventKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn classifies_catalogue_edits() {
        let kind = EventKind::Modify(ModifyKind::Data(DataChange::Content));

        assert_eq!(
            classify_event(Path::new("tokens.toml"), &kind),
            Some(WatchEvent::CatalogueModified(PathBuf::from("tokens.toml")))
        );
        assert_eq!(
            classify_event(Path::new("public/hero.png"), &kind),
            Some(WatchEvent::AssetModified(PathBuf::from("public/hero.png")))
        );
    }

    #[test]
    fn classifies_create_and_remove() {
        let path = Path::new("public/logo.svg");

        assert_eq!(
            classify_event(path, &EventKind::Create(CreateKind::File)),
            Some(WatchEvent::Created(path.to_path_buf()))
        );
        assert_eq!(
            classify_event(path, &EventKind::Remove(RemoveKind::File)),
            Some(WatchEvent::Deleted(path.to_path_buf()))
        );
    }

    #[test]
    fn ignores_access_events() {
        let kind = EventKind::Access(AccessKind::Any);

        assert_eq!(classify_event(Path::new("tokens.toml"), &kind), None);
    }

    #[tokio::test]
    async fn watches_file_changes() {
        let temp = tempdir().unwrap();
        let tokens = temp.path().join("tokens.toml");

        let (watcher, mut rx) = FileWatcher::new(&[temp.path().to_path_buf()]).unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(&tokens, "spacing = [4, 8]\n").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(3), rx.recv()).await;

        drop(watcher);

        assert!(event.is_ok(), "timeout waiting for file watch event");
        let event = event.unwrap().expect("channel should not be closed");
        assert_eq!(event.path().file_name(), tokens.file_name());
    }

    #[test]
    fn coalesces_events_per_path() {
        let mut pending = Vec::new();

        coalesce(&mut pending, WatchEvent::Created(PathBuf::from("tokens.toml")));
        coalesce(&mut pending, WatchEvent::AssetModified(PathBuf::from("public/a.png")));
        coalesce(
            &mut pending,
            WatchEvent::CatalogueModified(PathBuf::from("tokens.toml")),
        );

        assert_eq!(
            pending,
            vec![
                WatchEvent::AssetModified(PathBuf::from("public/a.png")),
                WatchEvent::CatalogueModified(PathBuf::from("tokens.toml")),
            ]
        );
    }

    #[tokio::test]
    async fn rapid_edits_deliver_after_the_last_write() {
        let temp = tempdir().unwrap();
        let tokens = temp.path().join("tokens.toml");
        fs::write(&tokens, "spacing = [4, 8]\n").unwrap();

        let (watcher, mut rx) = FileWatcher::new(&[temp.path().to_path_buf()]).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Read the file the moment the first event arrives
        let reader = {
            let tokens = tokens.clone();
            tokio::spawn(async move {
                let event = tokio::time::timeout(Duration::from_secs(3), rx.recv()).await;
                (event, fs::read_to_string(&tokens).unwrap())
            })
        };

        fs::write(&tokens, "spacing = [12, 8]\n").unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        fs::write(&tokens, "spacing = [8, 12]\n").unwrap();

        let (event, seen) = reader.await.unwrap();
        drop(watcher);

        assert!(event.is_ok(), "timeout waiting for file watch event");
        assert_eq!(seen, "spacing = [8, 12]\n");
    }

    #[tokio::test]
    async fn watches_paths_added_later() {
        let temp = tempdir().unwrap();
        let public = temp.path().join("public");

        let (mut watcher, mut rx) = FileWatcher::new(&[]).unwrap();
        fs::create_dir(&public).unwrap();
        watcher.watch_new(&[public.clone()]).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(public.join("logo.svg"), "<svg/>").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(3), rx.recv()).await;
        drop(watcher);

        let event = event.expect("timeout waiting for file watch event").unwrap();
        assert_eq!(event.path().file_name(), Some(std::ffi::OsStr::new("logo.svg")));
    }
}
