//! Application state for the plant-layout front-end.
//!
//! [`App`] owns the document being edited, the result panel, the single
//! last-result slot and the in-flight request bookkeeping. Everything it
//! needs from the outside world is injected through [`AppContext`].

use super::dispatcher::{Completion, SubmissionDispatcher};
use super::editor::DocumentEditor;
use crate::domain::{FileError, FileResult, ResultPanel, RunResult};
use crate::infrastructure::{ClipboardService, FileRepository, SubmissionClient};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Represents the current mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Keystrokes edit the document; shortcuts are available
    Normal,
    /// Import dialog is open, the user is typing a file path
    ImportFile,
    /// Help screen is displayed
    Help,
}

/// What a pending request will do when it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Run,
    Sample,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight {
    pub seq: u64,
    pub kind: RequestKind,
}

/// External collaborators the application works through.
pub struct AppContext {
    pub dispatcher: SubmissionDispatcher,
    /// Directory that exported files are written into
    pub output_dir: PathBuf,
}

impl AppContext {
    pub fn new(client: Arc<dyn SubmissionClient>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            dispatcher: SubmissionDispatcher::new(client),
            output_dir: output_dir.into(),
        }
    }
}

/// Main application state.
pub struct App {
    /// The model document being edited
    pub editor: DocumentEditor,
    /// Mounted result view and its visibility
    pub panel: ResultPanel,
    /// Last successful response, kept for export until replaced or closed
    pub last_result: Option<RunResult>,
    /// Current application mode
    pub mode: AppMode,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Input buffer for the import path
    pub filename_input: String,
    /// Cursor position within the import path
    pub cursor_position: usize,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Set once the user asks to leave
    pub should_quit: bool,
    in_flight: Option<InFlight>,
    next_seq: u64,
    context: AppContext,
}

impl App {
    pub fn new(context: AppContext) -> Self {
        Self {
            editor: DocumentEditor::default(),
            panel: ResultPanel::default(),
            last_result: None,
            mode: AppMode::Normal,
            status_message: None,
            filename_input: String::new(),
            cursor_position: 0,
            help_scroll: 0,
            should_quit: false,
            in_flight: None,
            next_seq: 0,
            context,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.context.output_dir
    }

    pub fn in_flight(&self) -> Option<InFlight> {
        self.in_flight
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    fn reserve_slot(&mut self, kind: RequestKind) -> Option<u64> {
        if let Some(pending) = self.in_flight {
            log::debug!("Refusing {:?}: request {} still running", kind, pending.seq);
            let busy = match pending.kind {
                RequestKind::Run => "Submission already running",
                RequestKind::Sample => "Sample model still loading",
            };
            self.status_message = Some(busy.to_string());
            return None;
        }
        self.next_seq += 1;
        Some(self.next_seq)
    }

    /// Sends the current document to the run endpoint on a worker thread.
    ///
    /// Refused while another request is in flight.
    pub fn start_submission(&mut self) {
        let Some(seq) = self.reserve_slot(RequestKind::Run) else {
            return;
        };

        match self.context.dispatcher.dispatch_run(seq, self.editor.text()) {
            Ok(()) => {
                self.in_flight = Some(InFlight { seq, kind: RequestKind::Run });
                self.status_message = Some("Running model...".to_string());
            }
            Err(error) => {
                log::error!("Could not dispatch run {seq}: {error}");
                self.status_message = Some(format!("Run failed: {error}"));
            }
        }
    }

    /// Fetches the sample model from the service and loads it into the editor.
    pub fn start_sample_load(&mut self) {
        let Some(seq) = self.reserve_slot(RequestKind::Sample) else {
            return;
        };

        match self.context.dispatcher.dispatch_sample(seq) {
            Ok(()) => {
                self.in_flight = Some(InFlight { seq, kind: RequestKind::Sample });
                self.status_message = Some("Loading sample model...".to_string());
            }
            Err(error) => {
                log::error!("Could not dispatch sample load {seq}: {error}");
                self.status_message = Some(format!("Sample load failed: {error}"));
            }
        }
    }

    /// Applies every completion that has already arrived. Never blocks.
    pub fn poll_completions(&mut self) {
        while let Some(completion) = self.context.dispatcher.try_next() {
            self.apply_completion(completion);
        }
    }

    /// Blocks up to `timeout` for one completion and applies it.
    ///
    /// Returns `false` if nothing arrived in time.
    pub fn wait_for_completion(&mut self, timeout: Duration) -> bool {
        match self.context.dispatcher.wait(timeout) {
            Some(completion) => {
                self.apply_completion(completion);
                true
            }
            None => false,
        }
    }

    /// Folds a finished request into the state.
    ///
    /// Completions that do not match the in-flight sequence number are stale
    /// and discarded. A failed run leaves the mounted grid and the last
    /// result untouched.
    pub fn apply_completion(&mut self, completion: Completion) {
        let seq = completion.seq();
        if self.in_flight.map(|p| p.seq) != Some(seq) {
            log::warn!("Discarding stale completion {seq}");
            return;
        }
        self.in_flight = None;

        match completion {
            Completion::Run { result: Ok(result), .. } => {
                self.status_message = Some(format!(
                    "Run finished: {}x{} grid",
                    result.grid.row_count(),
                    result.grid.col_count()
                ));
                self.panel.render(&result.grid);
                self.last_result = Some(result);
            }
            Completion::Run { result: Err(error), .. } => {
                log::error!("Run {seq} failed: {error}");
                self.status_message = Some(format!("Run failed: {error}"));
            }
            Completion::Sample { result: Ok(text), .. } => {
                self.editor.set_text(&text);
                self.status_message = Some("Sample model loaded".to_string());
            }
            Completion::Sample { result: Err(error), .. } => {
                log::error!("Sample load {seq} failed: {error}");
                self.status_message = Some(format!("Sample load failed: {error}"));
            }
        }
    }

    /// Unmounts the result view and forgets the last result.
    ///
    /// Does not cancel a request that is still running.
    pub fn close_result(&mut self) {
        self.panel.clear();
        self.last_result = None;
    }

    /// Writes the document to `model.yaml` in the output directory.
    pub fn export_model(&mut self) -> FileResult<PathBuf> {
        let result = FileRepository::save_model(&self.context.output_dir, &self.editor.text());
        self.report("Model saved", "Save failed", &result);
        result
    }

    /// Writes the raw body of the last successful response to `results.json`.
    pub fn export_results(&mut self) -> FileResult<PathBuf> {
        let result = match &self.last_result {
            Some(last) => FileRepository::save_results(&self.context.output_dir, &last.raw),
            None => Err(FileError::NoResult),
        };
        self.report("Results saved", "Export failed", &result);
        result
    }

    pub fn export_results_csv(&mut self) -> FileResult<PathBuf> {
        let result = match &self.last_result {
            Some(last) => FileRepository::save_results_csv(&self.context.output_dir, &last.grid),
            None => Err(FileError::NoResult),
        };
        self.report("CSV saved", "Export failed", &result);
        result
    }

    pub fn copy_result(&mut self) {
        let result = match &self.last_result {
            Some(last) => ClipboardService::copy_text(&last.raw),
            None => Err(FileError::NoResult),
        };
        self.status_message = Some(match result {
            Ok(()) => "Result copied to clipboard".to_string(),
            Err(error) => format!("Copy failed: {error}"),
        });
    }

    fn report(&mut self, success: &str, failure: &str, result: &FileResult<PathBuf>) {
        self.status_message = Some(match result {
            Ok(path) => format!("{success} to {}", path.display()),
            Err(error) => {
                log::warn!("{failure}: {error}");
                format!("{failure}: {error}")
            }
        });
    }

    /// Replaces the document with the contents of `filename`.
    ///
    /// On failure the document is left as it was.
    pub fn import_model(&mut self, filename: &str) -> FileResult<()> {
        match FileRepository::load_model(filename) {
            Ok(text) => {
                self.editor.set_text(&text);
                self.status_message = Some(format!("Loaded {}", filename.trim()));
                Ok(())
            }
            Err(error) => {
                self.status_message = Some(format!("Import failed: {error}"));
                Err(error)
            }
        }
    }

    /// Opens the import dialog.
    pub fn start_import(&mut self) {
        self.mode = AppMode::ImportFile;
        self.filename_input.clear();
        self.cursor_position = 0;
        self.status_message = None;
    }

    pub fn finish_import(&mut self) {
        let filename = std::mem::take(&mut self.filename_input);
        // Status message already describes any failure.
        let _ = self.import_model(&filename);
        self.mode = AppMode::Normal;
        self.cursor_position = 0;
    }

    pub fn cancel_import(&mut self) {
        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    pub fn open_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
    }
}
