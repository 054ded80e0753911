//! Shared, up-to-date view of the task document.
//!
//! The store owns the document path and a lazily built context cache.
//! Every mutation reloads the file, applies the change, rewrites the whole
//! document and then replaces the cache. Observers hold the receiving end of
//! a channel and hear about each replacement.

use crate::domain::{build_context, context_to_raw, Context, LogEntry, WindowPolicy};
use crate::error::StoreError;
use crate::persistence;
use chrono::Local;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

/// Change notification sent to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// The cache was rebuilt from disk
    Reloaded,
    /// A log entry was persisted
    LogAppended,
}

pub struct Store {
    path: PathBuf,
    policy: WindowPolicy,
    cache: Option<Context>,
    subscribers: Vec<Sender<StoreEvent>>,
}

impl Store {
    pub fn new(path: PathBuf, policy: WindowPolicy) -> Self {
        Self {
            path,
            policy,
            cache: None,
            subscribers: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and build a fresh context. Only reads from disk.
    pub fn get_context(&self) -> Result<Context, StoreError> {
        let raw = persistence::load(&self.path)?;
        let context = build_context(&raw, &self.policy, Local::now()).map_err(|err| {
            tracing::error!(path = %self.path.display(), error = %err, "invalid document");
            err
        })?;
        Ok(context)
    }

    /// The cached context, built on first access
    pub fn context(&mut self) -> Result<&Context, StoreError> {
        let context = match self.cache.take() {
            Some(context) => context,
            None => self.get_context()?,
        };
        Ok(&*self.cache.insert(context))
    }

    /// Last successfully built context without touching the disk
    pub fn cached(&self) -> Option<&Context> {
        self.cache.as_ref()
    }

    /// Replace the cache wholesale. On failure the cache is dropped so a
    /// stale snapshot is never served as current.
    pub fn reload(&mut self) -> Result<&Context, StoreError> {
        self.cache = None;
        let context = self.get_context()?;
        self.notify(StoreEvent::Reloaded);
        Ok(&*self.cache.insert(context))
    }

    /// Append one log entry: reload, prepend, convert, rewrite, reload.
    ///
    /// Not transactional: a concurrent writer between the reload and the
    /// rewrite is overwritten (last writer wins).
    pub fn push_log(&mut self, entry: LogEntry) -> Result<(), StoreError> {
        let task_id = entry.task_id;
        let minutes = entry.duration.num_minutes();

        let mut context = self.get_context()?;
        context.prepend_log(entry)?;
        persistence::store(&self.path, &context_to_raw(&context))?;
        tracing::info!(task_id, minutes, "log appended");

        self.reload()?;
        self.notify(StoreEvent::LogAppended);
        Ok(())
    }

    /// Register an observer; dropped receivers are pruned on the next event
    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self, event: StoreEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use crate::error::FormatError;
    use crate::persistence::{RawDocument, RawLog, RawTask};
    use chrono::Duration;
    use tempfile::tempdir;

    fn seed(dir: &Path) -> PathBuf {
        let path = dir.join("timebox.json");
        let now = Local::now();
        let doc = RawDocument {
            tasks: vec![
                RawTask {
                    id: 1,
                    category: Category::Other,
                    title: "Read".to_string(),
                    time_required: 30,
                    created_at: now,
                    parent_id: None,
                },
                RawTask {
                    id: 2,
                    category: Category::Other,
                    title: "Write".to_string(),
                    time_required: 60,
                    created_at: now,
                    parent_id: None,
                },
            ],
            logs: vec![RawLog {
                task_id: 1,
                duration: 20,
                created_at: now - Duration::hours(1),
            }],
        };
        persistence::store(&path, &doc).unwrap();
        path
    }

    #[test]
    fn test_get_context_reads_document() {
        let dir = tempdir().unwrap();
        let store = Store::new(seed(dir.path()), WindowPolicy::default());

        let ctx = store.get_context().unwrap();
        assert_eq!(ctx.task(1).unwrap().spent(), Duration::minutes(20));
        assert_eq!(ctx.task(1).unwrap().remaining(), Duration::minutes(10));
    }

    #[test]
    fn test_missing_document_is_read_error() {
        let dir = tempdir().unwrap();
        let mut store = Store::new(dir.path().join("absent.json"), WindowPolicy::default());
        assert!(store.context().unwrap_err().is_read_error());
        assert!(store.cached().is_none());
    }

    #[test]
    fn test_push_log_prepends_and_persists() {
        let dir = tempdir().unwrap();
        let path = seed(dir.path());
        let mut store = Store::new(path.clone(), WindowPolicy::default());

        store
            .push_log(LogEntry::new(2, Duration::minutes(2), Local::now()))
            .unwrap();

        let ctx = store.context().unwrap();
        assert_eq!(ctx.logs.len(), 2);
        assert_eq!(ctx.logs.get(0).map(|l| l.task_id), Some(2));
        assert_eq!(ctx.task(2).unwrap().spent(), Duration::minutes(2));

        let raw = persistence::load(&path).unwrap();
        assert_eq!(raw.logs[0].task_id, 2);
        assert_eq!(raw.logs[0].duration, 2);
        assert_eq!(raw.tasks.len(), 2);
    }

    #[test]
    fn test_push_log_unknown_task_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let path = seed(dir.path());
        let before = std::fs::read_to_string(&path).unwrap();
        let mut store = Store::new(path.clone(), WindowPolicy::default());

        let err = store
            .push_log(LogEntry::new(99, Duration::minutes(5), Local::now()))
            .unwrap_err();
        assert!(matches!(err, StoreError::Format(FormatError::UnknownTask(99))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_subscribers_hear_about_changes() {
        let dir = tempdir().unwrap();
        let mut store = Store::new(seed(dir.path()), WindowPolicy::default());
        let rx = store.subscribe();
        let dropped = store.subscribe();
        drop(dropped);

        store
            .push_log(LogEntry::new(1, Duration::minutes(3), Local::now()))
            .unwrap();

        let events: Vec<StoreEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![StoreEvent::Reloaded, StoreEvent::LogAppended]
        );
        assert_eq!(store.subscribers.len(), 1);
    }

    #[test]
    fn test_back_to_back_pushes_keep_both_entries() {
        let dir = tempdir().unwrap();
        let mut store = Store::new(seed(dir.path()), WindowPolicy::default());

        store.push_log(LogEntry::new(1, Duration::minutes(1), Local::now())).unwrap();
        store.push_log(LogEntry::new(2, Duration::minutes(4), Local::now())).unwrap();

        let ctx = store.context().unwrap();
        assert_eq!(ctx.logs.len(), 3);
        assert_eq!(ctx.logs.get(0).map(|l| l.task_id), Some(2));
        assert_eq!(ctx.logs.get(1).map(|l| l.task_id), Some(1));
    }

    #[test]
    fn test_racing_writers_never_corrupt_document() {
        let dir = tempdir().unwrap();
        let path = seed(dir.path());

        let handles: Vec<_> = (1..=2u64)
            .map(|task_id| {
                let path = path.clone();
                std::thread::spawn(move || {
                    let mut store = Store::new(path, WindowPolicy::default());
                    for _ in 0..10 {
                        store
                            .push_log(LogEntry::new(task_id, Duration::minutes(1), Local::now()))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Entries may be lost to last-writer-wins, but the file must parse
        let raw = persistence::load(&path).unwrap();
        assert!(raw.logs.len() > 1 && raw.logs.len() <= 21);
        assert_eq!(raw.tasks.len(), 2);
    }
}
