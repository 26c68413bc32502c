//! File system watcher filtered through the resolved watch policy.
//!
//! Watches the whole project root and forwards only the changes the policy
//! leaves visible, so writes from a companion build never reach the rebuild
//! loop.

use crate::error::{CliError, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tandem_config::WatchPolicy;
use tokio::sync::mpsc;
use tracing::debug;

/// File change event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    /// File was modified
    Modified(PathBuf),
    /// File was created
    Created(PathBuf),
    /// File was removed
    Removed(PathBuf),
}

impl FileChange {
    /// Get the path affected by this change.
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Modified(p) | FileChange::Created(p) | FileChange::Removed(p) => p,
        }
    }

    fn from_kind(kind: &EventKind, path: PathBuf) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(FileChange::Created(path)),
            EventKind::Modify(_) => Some(FileChange::Modified(path)),
            EventKind::Remove(_) => Some(FileChange::Removed(path)),
            _ => None,
        }
    }
}

/// Drops repeated events for the same path inside the debounce window.
#[derive(Debug)]
struct Debouncer {
    window: Duration,
    seen: HashMap<PathBuf, Instant>,
}

impl Debouncer {
    fn new(window: Duration) -> Self {
        Self {
            window,
            seen: HashMap::new(),
        }
    }

    fn admit(&mut self, path: &Path, now: Instant) -> bool {
        let window = self.window;
        self.seen
            .retain(|_, last| now.saturating_duration_since(*last) < window);

        if self.seen.contains_key(path) {
            return false;
        }
        self.seen.insert(path.to_path_buf(), now);
        true
    }
}

/// Recursive watcher over the project root.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    root: PathBuf,
}

impl FileWatcher {
    /// Start watching `root`.
    ///
    /// Returns the watcher (dropping it stops watching) and a receiver of the
    /// changes that survive `policy` and debouncing.
    ///
    /// # Errors
    ///
    /// Returns an error if the root does not exist or the watcher cannot start.
    pub fn new(
        root: PathBuf,
        policy: WatchPolicy,
        debounce_ms: u64,
    ) -> Result<(Self, mpsc::Receiver<FileChange>)> {
        if !root.exists() {
            return Err(CliError::FileNotFound(root));
        }
        // notify reports canonical paths
        let root = root.canonicalize()?;

        let (tx, rx) = mpsc::channel(100);
        let mut debouncer = Debouncer::new(Duration::from_millis(debounce_ms));
        let watch_root = root.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let Ok(event) = res else {
                return;
            };

            for path in &event.paths {
                if policy.is_ignored_abs(&watch_root, path) {
                    debug!(path = %path.display(), "ignored change");
                    continue;
                }

                // Access events never count toward the window.
                let Some(change) = FileChange::from_kind(&event.kind, path.clone()) else {
                    continue;
                };

                if !debouncer.admit(path, Instant::now()) {
                    continue;
                }

                // Receiver gone means the dev loop has shut down.
                if tx.blocking_send(change).is_err() {
                    return;
                }
            }
        })?;

        watcher.watch(&root, RecursiveMode::Recursive)?;

        Ok((
            Self {
                _watcher: watcher,
                root,
            },
            rx,
        ))
    }

    /// Get the root directory being watched.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};

    #[test]
    fn file_change_path() {
        let path = PathBuf::from("/project/src/App.svelte");

        assert_eq!(FileChange::Modified(path.clone()).path(), path.as_path());
        assert_eq!(FileChange::Created(path.clone()).path(), path.as_path());
        assert_eq!(FileChange::Removed(path.clone()).path(), path.as_path());
    }

    #[test]
    fn event_kinds_map_to_changes() {
        let path = PathBuf::from("/project/src/main.ts");
        assert_eq!(
            FileChange::from_kind(&EventKind::Create(CreateKind::File), path.clone()),
            Some(FileChange::Created(path.clone()))
        );
        assert_eq!(
            FileChange::from_kind(&EventKind::Modify(ModifyKind::Any), path.clone()),
            Some(FileChange::Modified(path.clone()))
        );
        assert_eq!(
            FileChange::from_kind(&EventKind::Remove(RemoveKind::File), path.clone()),
            Some(FileChange::Removed(path.clone()))
        );
        assert_eq!(FileChange::from_kind(&EventKind::Any, path), None);
    }

    #[test]
    fn debouncer_drops_rapid_repeats_of_same_path() {
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        let start = Instant::now();
        let a = Path::new("/project/src/a.ts");
        let b = Path::new("/project/src/b.ts");

        assert!(debouncer.admit(a, start));
        assert!(!debouncer.admit(a, start + Duration::from_millis(10)));
        assert!(debouncer.admit(b, start + Duration::from_millis(20)));
        assert!(!debouncer.admit(a, start + Duration::from_millis(30)));
        assert!(!debouncer.admit(b, start + Duration::from_millis(40)));
        assert!(debouncer.admit(a, start + Duration::from_millis(200)));
    }

    #[test]
    fn debouncer_forgets_expired_paths() {
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        let start = Instant::now();
        for i in 0..10 {
            let path = PathBuf::from(format!("/project/src/{i}.ts"));
            assert!(debouncer.admit(&path, start));
        }
        let late = Path::new("/project/src/late.ts");
        assert!(debouncer.admit(late, start + Duration::from_millis(150)));
        assert_eq!(debouncer.seen.len(), 1);
    }

    #[test]
    fn zero_window_admits_everything() {
        let mut debouncer = Debouncer::new(Duration::ZERO);
        let now = Instant::now();
        let a = Path::new("/project/src/a.ts");
        assert!(debouncer.admit(a, now));
        assert!(debouncer.admit(a, now));
    }

    #[test]
    fn missing_root_is_reported() {
        let result = FileWatcher::new(
            PathBuf::from("/definitely/not/here"),
            WatchPolicy::default(),
            100,
        );
        assert!(matches!(result, Err(CliError::FileNotFound(_))));
    }
}
