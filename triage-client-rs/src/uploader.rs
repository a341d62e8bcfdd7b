//! Log text collection
//!
//! Three input channels converge on the same "set log text" notification:
//! direct editing, a file picker restricted to `.txt`/`.log`, and drag and
//! drop of a single file. File contents overwrite the current text.
//!
//! File reads are asynchronous. Every read takes a [`ReadTicket`]; only the
//! most recently started read (or edit) may set the text, so a slow earlier
//! read can never overwrite a newer selection.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Extensions accepted by the file picker
pub const ACCEPTED_EXTENSIONS: &[&str] = &["txt", "log"];

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Unsupported file type: {0} (expected .txt or .log)")]
    UnsupportedFile(String),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Drop target highlight state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Active,
}

/// How the host should treat the native event after the uploader handled it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDisposition {
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

impl EventDisposition {
    /// Fully consumed: no default file-open navigation, no bubbling
    pub const CONSUMED: Self = Self {
        prevent_default: true,
        stop_propagation: true,
    };
}

/// Identifies one started read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTicket(u64);

/// Result of finishing a file read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Content replaced the current text
    Applied,
    /// A newer read or edit started meanwhile; content discarded
    Stale,
    /// Drop carried no file
    NoFile,
}

type ChangeListener = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Default)]
struct UploaderState {
    text: String,
    drag: DragState,
    generation: u64,
    listeners: Vec<ChangeListener>,
}

/// Shared handle to the current log text
#[derive(Clone, Default)]
pub struct LogUploader {
    state: Arc<Mutex<UploaderState>>,
}

impl LogUploader {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, UploaderState> {
        // State stays consistent even if a listener panicked while holding the lock.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a change notifier, called with the new text after every set
    pub fn on_change<F>(&self, listener: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.lock().listeners.push(Arc::new(listener));
    }

    pub fn text(&self) -> String {
        self.lock().text.clone()
    }

    pub fn drag_state(&self) -> DragState {
        self.lock().drag
    }

    /// Direct edit of the text field; supersedes any read still in flight
    pub fn edit_text(&self, text: impl Into<String>) {
        let text = text.into();
        let listeners = {
            let mut state = self.lock();
            state.generation += 1;
            state.text = text.clone();
            state.listeners.clone()
        };
        notify(&listeners, &text);
    }

    /// Start a read; any earlier ticket becomes stale
    pub fn begin_read(&self) -> ReadTicket {
        let mut state = self.lock();
        state.generation += 1;
        ReadTicket(state.generation)
    }

    /// Apply read content if `ticket` is still the latest
    pub fn complete_read(&self, ticket: ReadTicket, text: String) -> ReadOutcome {
        let listeners = {
            let mut state = self.lock();
            if state.generation != ticket.0 {
                tracing::debug!("Discarding stale file read");
                return ReadOutcome::Stale;
            }
            state.text = text.clone();
            state.listeners.clone()
        };
        notify(&listeners, &text);
        ReadOutcome::Applied
    }

    /// File picker channel: only `.txt` and `.log` files
    pub async fn pick_file(&self, path: &Path) -> Result<ReadOutcome, UploadError> {
        if !is_accepted_file(path) {
            return Err(UploadError::UnsupportedFile(path.display().to_string()));
        }
        self.read_file(path).await
    }

    pub fn drag_enter(&self) -> EventDisposition {
        self.set_drag(DragState::Active)
    }

    pub fn drag_over(&self) -> EventDisposition {
        self.set_drag(DragState::Active)
    }

    pub fn drag_leave(&self) -> EventDisposition {
        self.set_drag(DragState::Idle)
    }

    /// Drop channel: reads the first dropped file, ignores the rest
    pub async fn drop_files(
        &self,
        paths: &[PathBuf],
    ) -> (EventDisposition, Result<ReadOutcome, UploadError>) {
        let disposition = self.set_drag(DragState::Idle);
        let outcome = match paths.first() {
            Some(path) => self.read_file(path).await,
            None => Ok(ReadOutcome::NoFile),
        };
        (disposition, outcome)
    }

    fn set_drag(&self, drag: DragState) -> EventDisposition {
        self.lock().drag = drag;
        EventDisposition::CONSUMED
    }

    async fn read_file(&self, path: &Path) -> Result<ReadOutcome, UploadError> {
        let ticket = self.begin_read();
        let bytes = tokio::fs::read(path).await.map_err(|source| UploadError::Read {
            path: path.display().to_string(),
            source,
        })?;

        tracing::debug!(bytes = bytes.len(), "Read log file {}", path.display());
        Ok(self.complete_read(ticket, String::from_utf8_lossy(&bytes).into_owned()))
    }
}

impl std::fmt::Debug for LogUploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("LogUploader")
            .field("text_len", &state.text.len())
            .field("drag", &state.drag)
            .finish()
    }
}

fn notify(listeners: &[ChangeListener], text: &str) {
    for listener in listeners {
        listener(text);
    }
}

/// Whether the picker accepts this file
pub fn is_accepted_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_accepted_extensions() {
        assert!(is_accepted_file(Path::new("app.log")));
        assert!(is_accepted_file(Path::new("dump.TXT")));
        assert!(!is_accepted_file(Path::new("report.csv")));
        assert!(!is_accepted_file(Path::new("no_extension")));
    }

    #[test]
    fn test_edit_notifies_listeners() {
        let uploader = LogUploader::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        uploader.on_change(move |text| sink.lock().unwrap().push(text.to_string()));

        uploader.edit_text("ERROR one");
        uploader.edit_text("ERROR two");

        assert_eq!(uploader.text(), "ERROR two");
        assert_eq!(*seen.lock().unwrap(), vec!["ERROR one", "ERROR two"]);
    }

    #[test]
    fn test_stale_read_is_discarded() {
        let uploader = LogUploader::new();
        let first = uploader.begin_read();
        let second = uploader.begin_read();

        assert_eq!(uploader.complete_read(second, "second".to_string()), ReadOutcome::Applied);
        assert_eq!(uploader.complete_read(first, "first".to_string()), ReadOutcome::Stale);
        assert_eq!(uploader.text(), "second");
    }

    #[test]
    fn test_edit_supersedes_pending_read() {
        let uploader = LogUploader::new();
        let ticket = uploader.begin_read();
        uploader.edit_text("typed");

        assert_eq!(uploader.complete_read(ticket, "from file".to_string()), ReadOutcome::Stale);
        assert_eq!(uploader.text(), "typed");
    }

    #[test]
    fn test_drag_state_transitions() {
        let uploader = LogUploader::new();
        assert_eq!(uploader.drag_state(), DragState::Idle);

        assert_eq!(uploader.drag_enter(), EventDisposition::CONSUMED);
        assert_eq!(uploader.drag_state(), DragState::Active);
        assert!(uploader.drag_over().prevent_default);
        assert_eq!(uploader.drag_state(), DragState::Active);

        uploader.drag_leave();
        assert_eq!(uploader.drag_state(), DragState::Idle);
    }

    #[tokio::test]
    async fn test_pick_file_overwrites_text() {
        let file = temp_file(".log", "ERROR from file\n");
        let uploader = LogUploader::new();
        uploader.edit_text("old text");

        let outcome = uploader.pick_file(file.path()).await.unwrap();
        assert_eq!(outcome, ReadOutcome::Applied);
        assert_eq!(uploader.text(), "ERROR from file\n");
    }

    #[tokio::test]
    async fn test_pick_file_rejects_other_extensions() {
        let file = temp_file(".csv", "a,b");
        let uploader = LogUploader::new();

        let err = uploader.pick_file(file.path()).await.unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedFile(_)));
        assert_eq!(uploader.text(), "");
    }

    #[tokio::test]
    async fn test_drop_reads_first_file_only() {
        let first = temp_file(".txt", "first file");
        let second = temp_file(".txt", "second file");
        let uploader = LogUploader::new();
        uploader.drag_enter();

        let (disposition, outcome) = uploader
            .drop_files(&[first.path().to_path_buf(), second.path().to_path_buf()])
            .await;

        assert_eq!(disposition, EventDisposition::CONSUMED);
        assert_eq!(outcome.unwrap(), ReadOutcome::Applied);
        assert_eq!(uploader.text(), "first file");
        assert_eq!(uploader.drag_state(), DragState::Idle);
    }

    #[tokio::test]
    async fn test_empty_drop() {
        let uploader = LogUploader::new();
        uploader.drag_enter();

        let (_, outcome) = uploader.drop_files(&[]).await;
        assert_eq!(outcome.unwrap(), ReadOutcome::NoFile);
        assert_eq!(uploader.drag_state(), DragState::Idle);
    }

    #[tokio::test]
    async fn test_missing_file_reports_read_error() {
        let uploader = LogUploader::new();
        let err = uploader
            .pick_file(Path::new("/definitely/not/here.log"))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Read { .. }));
    }
}
