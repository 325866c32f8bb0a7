//! Live log tailer
//!
//! Follows a single chat log from its current end. Two triggers feed the same
//! read routine: native change notifications (debounced) and a fixed-interval
//! poll for platforms where notifications are unreliable. The cursor sits
//! behind a mutex, so overlapping wake-ups read each byte at most once.

mod cursor;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use pedtrack_types::TailerSettings;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub use cursor::TailCursor;

#[derive(Debug, Error)]
pub enum TailerError {
    #[error("failed to open log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to create file watcher: {0}")]
    Notify(#[from] notify::Error),
}

/// Handles owned by one running tailer.
///
/// Independent instances may follow different files at the same time.
pub struct TailerState {
    cursor: Arc<Mutex<TailCursor>>,
    watcher: Option<RecommendedWatcher>,
    poll_task: Option<JoinHandle<()>>,
    debounce_task: Option<JoinHandle<()>>,
}

impl TailerState {
    /// Start following `path` from its current end, sending each new line to `sink`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        path: impl Into<PathBuf>,
        sink: mpsc::UnboundedSender<String>,
        settings: &TailerSettings,
    ) -> Result<Self, TailerError> {
        let path = path.into();
        let cursor = Arc::new(Mutex::new(TailCursor::at_end(&path)?));

        let (wake_tx, wake_rx) = mpsc::unbounded_channel::<()>();
        let watcher = match watch_file(&path, wake_tx) {
            Ok(w) => Some(w),
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "File watcher unavailable, polling only");
                None
            }
        };

        let debounce = Duration::from_millis(settings.debounce_ms);
        let debounce_task = tokio::spawn(debounce_loop(
            Arc::clone(&cursor),
            sink.clone(),
            wake_rx,
            debounce,
        ));

        let interval = Duration::from_millis(settings.poll_interval_ms.max(1));
        let poll_task = tokio::spawn(poll_loop(Arc::clone(&cursor), sink, interval));

        tracing::info!(
            path = %path.display(),
            offset = lock(&cursor).offset(),
            "Tailer started"
        );

        Ok(Self {
            cursor,
            watcher,
            poll_task: Some(poll_task),
            debounce_task: Some(debounce_task),
        })
    }

    pub fn path(&self) -> PathBuf {
        lock(&self.cursor).path().to_path_buf()
    }

    pub fn offset(&self) -> u64 {
        lock(&self.cursor).offset()
    }

    pub fn is_running(&self) -> bool {
        self.poll_task.is_some()
    }

    /// Release the watcher, cancel both triggers and rewind the cursor.
    pub fn stop(&mut self) {
        let was_running = self.is_running();
        self.watcher = None;
        if let Some(task) = self.poll_task.take() {
            task.abort();
        }
        if let Some(task) = self.debounce_task.take() {
            task.abort();
        }
        lock(&self.cursor).halt();
        if was_running {
            tracing::info!("Tailer stopped");
        }
    }
}

impl Drop for TailerState {
    fn drop(&mut self) {
        self.stop();
    }
}

fn lock(cursor: &Mutex<TailCursor>) -> MutexGuard<'_, TailCursor> {
    cursor.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Read pending lines and forward them. Returns `false` once the sink is closed.
fn drain(cursor: &Mutex<TailCursor>, sink: &mpsc::UnboundedSender<String>) -> bool {
    let lines = {
        let mut guard = lock(cursor);
        if guard.is_stopped() {
            return false;
        }
        match guard.read_new_lines() {
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!(error = %e, path = %guard.path().display(), "Failed to read log file");
                return true;
            }
        }
    };
    lines.into_iter().all(|line| sink.send(line).is_ok())
}

async fn poll_loop(
    cursor: Arc<Mutex<TailCursor>>,
    sink: mpsc::UnboundedSender<String>,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if !drain(&cursor, &sink) {
            break;
        }
    }
}

async fn debounce_loop(
    cursor: Arc<Mutex<TailCursor>>,
    sink: mpsc::UnboundedSender<String>,
    mut wake_rx: mpsc::UnboundedReceiver<()>,
    debounce: Duration,
) {
    while wake_rx.recv().await.is_some() {
        tokio::time::sleep(debounce).await;
        // Coalesce the burst that arrived while sleeping
        while wake_rx.try_recv().is_ok() {}
        if !drain(&cursor, &sink) {
            break;
        }
    }
}

/// Watch the file's parent directory, waking the debounce task on changes to the file.
fn watch_file(path: &Path, wake: mpsc::UnboundedSender<()>) -> Result<RecommendedWatcher, TailerError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path.file_name().map(|n| n.to_os_string());

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => {
            let relevant = matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
                && event
                    .paths
                    .iter()
                    .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
            if relevant {
                let _ = wake.send(());
            }
        }
        Err(e) => tracing::warn!(error = %e, "File watcher error"),
    })?;
    watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}
