//! Runs blocking service calls off the UI thread.

use crate::domain::{RunResult, SubmitError, SubmitResult};
use crate::infrastructure::SubmissionClient;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

/// A finished request, tagged with the sequence number it was issued under.
#[derive(Debug)]
pub enum Completion {
    Run { seq: u64, result: SubmitResult<RunResult> },
    Sample { seq: u64, result: SubmitResult<String> },
}

impl Completion {
    pub fn seq(&self) -> u64 {
        match self {
            Completion::Run { seq, .. } | Completion::Sample { seq, .. } => *seq,
        }
    }
}

/// Spawns one worker thread per request and collects completions on a channel.
pub struct SubmissionDispatcher {
    client: Arc<dyn SubmissionClient>,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
}

impl SubmissionDispatcher {
    pub fn new(client: Arc<dyn SubmissionClient>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { client, sender, receiver }
    }

    pub fn dispatch_run(&self, seq: u64, document: String) -> SubmitResult<()> {
        let client = Arc::clone(&self.client);
        self.spawn(seq, move || Completion::Run {
            seq,
            result: client.submit(&document),
        })
    }

    pub fn dispatch_sample(&self, seq: u64) -> SubmitResult<()> {
        let client = Arc::clone(&self.client);
        self.spawn(seq, move || Completion::Sample {
            seq,
            result: client.fetch_sample(),
        })
    }

    fn spawn<F>(&self, seq: u64, job: F) -> SubmitResult<()>
    where
        F: FnOnce() -> Completion + Send + 'static,
    {
        let sender = self.sender.clone();
        thread::Builder::new()
            .name(format!("submission-{seq}"))
            .spawn(move || {
                // The receiver only disappears when the app is shutting down.
                if sender.send(job()).is_err() {
                    log::debug!("Dropped completion {seq}: receiver gone");
                }
            })
            .map(|_| ())
            .map_err(|e| SubmitError::Transport(format!("could not start request: {e}")))
    }

    /// Returns a completion if one is ready, without blocking.
    pub fn try_next(&self) -> Option<Completion> {
        self.receiver.try_recv().ok()
    }

    /// Blocks up to `timeout` for the next completion.
    pub fn wait(&self, timeout: Duration) -> Option<Completion> {
        match self.receiver.recv_timeout(timeout) {
            Ok(completion) => Some(completion),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}
