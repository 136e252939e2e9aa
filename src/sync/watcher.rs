//! Local document watcher for hot reload.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::event::ModifyKind;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{broadcast, mpsc};

use crate::document::DocumentStore;
use crate::sync::debounce::debounce;
use crate::sync::reload_logged;

/// A watcher that monitors the document file and reloads it after edits settle.
pub struct LocalWatcher {
    store: Arc<DocumentStore>,
    debounce: Duration,
}

impl LocalWatcher {
    /// Create a new LocalWatcher for the store's local source file.
    pub fn new(store: Arc<DocumentStore>, debounce: Duration) -> Self {
        Self { store, debounce }
    }

    /// Watch the file's parent directory until `shutdown` fires.
    ///
    /// Watching the directory rather than the file keeps the watch alive
    /// across editors that save by replacing the file.
    pub async fn run(self, shutdown: broadcast::Receiver<()>) -> Result<(), notify::Error> {
        let source = self.store.source();
        let path = source
            .local_path()
            .map(Path::to_path_buf)
            .ok_or_else(|| notify::Error::generic(&format!("{source} is not a local file")))?;
        let watched_name = path
            .file_name()
            .map(|name| name.to_os_string())
            .ok_or_else(|| notify::Error::generic("document path has no file name").add_path(path.clone()))?;
        let dir = watch_dir(&path);

        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if is_relevant(&event, &watched_name) {
                        tracing::debug!(kind = ?event.kind, "Document change detected");
                        let _ = event_tx.send(());
                    }
                }
                Err(e) => tracing::error!(error = %e, "Watch error"),
            },
            Config::default(),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(
            path = %path.display(),
            debounce_ms = self.debounce.as_millis() as u64,
            "Document watcher started"
        );

        let store = self.store;
        debounce(event_rx, self.debounce, shutdown, move || {
            let store = Arc::clone(&store);
            async move { reload_logged(&store, "file change").await }
        })
        .await;

        drop(watcher);
        tracing::info!(path = %path.display(), "Document watcher stopped");
        Ok(())
    }
}

fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Writes, renames and creates touching the document file qualify.
fn is_relevant(event: &Event, file_name: &OsString) -> bool {
    let kind_matches = matches!(
        event.kind,
        EventKind::Create(_)
            | EventKind::Modify(ModifyKind::Data(_))
            | EventKind::Modify(ModifyKind::Name(_))
            | EventKind::Modify(ModifyKind::Any)
    );
    kind_matches
        && event
            .paths
            .iter()
            .any(|path| path.file_name() == Some(file_name.as_os_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, DataChange, MetadataKind, RenameMode};

    use crate::document::{DocumentSource, Fetcher};
    use crate::lifecycle::Shutdown;

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_writes_and_renames_of_the_file_qualify() {
        let name = OsString::from("swagger.json");
        assert!(is_relevant(&event(EventKind::Modify(ModifyKind::Data(DataChange::Content)), "/srv/swagger.json"), &name));
        assert!(is_relevant(&event(EventKind::Modify(ModifyKind::Name(RenameMode::To)), "/srv/swagger.json"), &name));
        assert!(is_relevant(&event(EventKind::Modify(ModifyKind::Any), "/srv/swagger.json"), &name));
        assert!(is_relevant(&event(EventKind::Create(CreateKind::File), "/srv/swagger.json"), &name));
    }

    #[test]
    fn test_other_files_and_kinds_are_ignored() {
        let name = OsString::from("swagger.json");
        assert!(!is_relevant(&event(EventKind::Modify(ModifyKind::Data(DataChange::Content)), "/srv/other.json"), &name));
        assert!(!is_relevant(&event(EventKind::Access(AccessKind::Any), "/srv/swagger.json"), &name));
        assert!(!is_relevant(&event(EventKind::Modify(ModifyKind::Metadata(MetadataKind::Any)), "/srv/swagger.json"), &name));
    }

    fn store_for(raw: &str) -> Arc<DocumentStore> {
        let source = DocumentSource::classify(raw, Duration::from_secs(30));
        let fetcher = Fetcher::new(Duration::from_secs(5), false).unwrap();
        Arc::new(DocumentStore::new(source, fetcher))
    }

    #[tokio::test]
    async fn test_path_without_file_name_is_rejected() {
        let shutdown = Shutdown::new();
        let watcher = LocalWatcher::new(store_for(".."), Duration::from_millis(50));

        let result = tokio::time::timeout(Duration::from_secs(2), watcher.run(shutdown.subscribe()))
            .await
            .expect("watcher should fail instead of watching");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("no file name"), "got {err}");
        assert_eq!(err.paths, vec![PathBuf::from("..")]);
    }

    #[tokio::test]
    async fn test_remote_source_is_rejected() {
        let shutdown = Shutdown::new();
        let watcher = LocalWatcher::new(store_for("https://example.com/spec.json"), Duration::from_millis(50));

        let result = tokio::time::timeout(Duration::from_secs(2), watcher.run(shutdown.subscribe()))
            .await
            .expect("watcher should fail instead of watching");
        assert!(result.is_err());
    }

    #[test]
    fn test_watch_dir_defaults_to_current_dir() {
        assert_eq!(watch_dir(Path::new("swagger.json")), PathBuf::from("."));
        assert_eq!(watch_dir(Path::new("/srv/api/swagger.json")), PathBuf::from("/srv/api"));
    }
}
