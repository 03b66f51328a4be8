use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, TryRecvError, channel};
use std::time::Duration;

use notify_debouncer_mini::notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};
use tracing::{debug, warn};

const SETTLE: Duration = Duration::from_millis(200);

/// Watches the slide source so edits saved by the author show up in the preview.
///
/// The parent directory is watched rather than the file itself, since many
/// editors save by replacing the file.
pub struct SourceWatcher {
    file: PathBuf,
    rx: Receiver<DebounceEventResult>,
    _debouncer: Debouncer<RecommendedWatcher>,
}

impl SourceWatcher {
    pub fn new(file: &Path) -> anyhow::Result<Self> {
        let file = file.canonicalize()?;
        let dir = file
            .parent()
            .ok_or_else(|| anyhow::anyhow!("{} has no parent directory", file.display()))?
            .to_path_buf();

        let (tx, rx) = channel();
        let mut debouncer = new_debouncer(SETTLE, tx)?;
        debouncer
            .watcher()
            .watch(&dir, RecursiveMode::NonRecursive)?;
        debug!(file = %file.display(), "watching slide source");

        Ok(Self {
            file,
            rx,
            _debouncer: debouncer,
        })
    }

    /// Drain pending events; true if any of them touched the watched file.
    pub fn changed(&self) -> bool {
        let mut changed = false;
        loop {
            match self.rx.try_recv() {
                Ok(Ok(events)) => {
                    changed |= events.iter().any(|e| e.path == self.file);
                }
                Ok(Err(e)) => warn!("file watch error: {e}"),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        changed
    }
}
