//! Submission lifecycle as a pure state machine.
//!
//! All mutation goes through [`Session::submit`] and [`Session::apply`]; the
//! rendering layer only derives a [`ViewMode`] from the state. This keeps the
//! whole idle/loading/error/result table unit-testable without a terminal.

use crate::event::StreamEvent;
use crate::validate::{self, ValidationError};
use serde::{Deserialize, Serialize};

/// Which of the mutually exclusive screens the state calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Nothing submitted yet (or nothing to show): the bare form.
    Idle,
    /// A stream is in flight; show the busy indicator and latest status.
    Loading,
    /// The last submission failed; the error supersedes any partial result.
    Error,
    /// A summary is available for rendering.
    Result,
}

/// Outcome of a submit call, telling the caller whether to open a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Validation passed; open one stream for this URL.
    Open(String),
    /// Validation failed; the error is already recorded, do not connect.
    Rejected(ValidationError),
}

/// State for one summarization session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    /// Last submitted URL. Persists across submissions.
    pub url: String,
    /// True while a stream is in flight.
    pub loading: bool,
    /// Concatenation of all received markdown chunks, in arrival order.
    pub accumulated: String,
    /// Latest server-reported status label.
    pub status: Option<String>,
    /// Last validation or stream error.
    pub error: Option<String>,
    /// Set once the stream ended (completed, errored, or closed). Events
    /// arriving afterwards belong to a stale connection and are dropped.
    finished: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new submission.
    ///
    /// Result, error, and status state is cleared synchronously and
    /// unconditionally before anything asynchronous can run, so a stale
    /// summary never overlaps a new in-flight request.
    pub fn submit(&mut self, raw_url: &str) -> Submission {
        self.url = raw_url.trim().to_string();
        self.accumulated.clear();
        self.status = None;
        self.error = None;
        self.finished = false;

        match validate::validate(&self.url) {
            Ok(()) => {
                self.loading = true;
                Submission::Open(self.url.clone())
            }
            Err(err) => {
                self.loading = false;
                self.finished = true;
                self.error = Some(err.to_string());
                Submission::Rejected(err)
            }
        }
    }

    /// Fold one stream event into the state.
    pub fn apply(&mut self, event: StreamEvent) {
        if self.finished {
            return;
        }
        let terminal = event.is_terminal();
        match event {
            StreamEvent::Status(label) => {
                self.status = Some(label);
            }
            StreamEvent::Chunk(text) => {
                // Chunks are appended verbatim; the backend owns separators.
                self.accumulated.push_str(&text);
            }
            StreamEvent::Error(message) => {
                self.error = Some(message);
            }
            StreamEvent::Closed => {}
        }
        if terminal {
            self.loading = false;
            self.finished = true;
        }
    }

    /// Derive the single active rendering mode.
    pub fn mode(&self) -> ViewMode {
        if self.loading {
            ViewMode::Loading
        } else if self.error.is_some() {
            ViewMode::Error
        } else if !self.accumulated.is_empty() {
            ViewMode::Result
        } else {
            ViewMode::Idle
        }
    }

    /// Whether the current submission has ended, one way or another.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::COMPLETION_SENTINEL;
    use crate::validate::INVALID_URL_MESSAGE;

    const VALID_URL: &str = "https://www.youtube.com/watch?v=abc123";

    fn submitted() -> Session {
        let mut session = Session::new();
        assert!(matches!(session.submit(VALID_URL), Submission::Open(_)));
        session
    }

    #[test]
    fn invalid_input_sets_error_and_refuses_connection() {
        let mut session = Session::new();
        let outcome = session.submit("not a url");

        assert!(matches!(outcome, Submission::Rejected(_)));
        assert!(!session.loading);
        assert_eq!(session.error.as_deref(), Some(INVALID_URL_MESSAGE));
        assert_eq!(session.mode(), ViewMode::Error);
    }

    #[test]
    fn valid_input_enters_loading_with_cleared_state() {
        let mut session = Session::new();
        session.accumulated = "old summary".to_string();
        session.error = Some("old error".to_string());
        session.status = Some("old status".to_string());

        let outcome = session.submit(VALID_URL);

        assert_eq!(outcome, Submission::Open(VALID_URL.to_string()));
        assert!(session.loading);
        assert!(session.accumulated.is_empty());
        assert!(session.error.is_none());
        assert!(session.status.is_none());
        assert_eq!(session.mode(), ViewMode::Loading);
    }

    #[test]
    fn url_persists_after_submission() {
        let session = submitted();
        assert_eq!(session.url, VALID_URL);
    }

    #[test]
    fn chunks_concatenate_in_order_without_separators() {
        let mut session = submitted();
        session.apply(StreamEvent::Chunk("Hello ".to_string()));
        session.apply(StreamEvent::Chunk("world".to_string()));
        assert_eq!(session.accumulated, "Hello world");
    }

    #[test]
    fn status_updates_are_displayed_while_loading() {
        let mut session = submitted();
        session.apply(StreamEvent::Status("Transcribing audio...".to_string()));
        assert_eq!(session.status.as_deref(), Some("Transcribing audio..."));
        assert_eq!(session.mode(), ViewMode::Loading);
    }

    #[test]
    fn completion_sentinel_ends_loading_and_shows_result() {
        let mut session = submitted();
        session.apply(StreamEvent::Chunk("# Summary".to_string()));
        session.apply(StreamEvent::Status(COMPLETION_SENTINEL.to_string()));

        assert!(!session.loading);
        assert!(session.is_finished());
        assert_eq!(session.mode(), ViewMode::Result);
    }

    #[test]
    fn events_after_completion_are_ignored() {
        let mut session = submitted();
        session.apply(StreamEvent::Status(COMPLETION_SENTINEL.to_string()));
        session.apply(StreamEvent::Chunk("stale".to_string()));
        session.apply(StreamEvent::Error("stale error".to_string()));

        assert!(session.accumulated.is_empty());
        assert!(session.error.is_none());
    }

    #[test]
    fn error_event_supersedes_partial_result() {
        let mut session = submitted();
        session.apply(StreamEvent::Chunk("partial ".to_string()));
        session.apply(StreamEvent::Error("Failed to download audio".to_string()));

        assert!(!session.loading);
        assert_eq!(session.accumulated, "partial ");
        assert_eq!(session.mode(), ViewMode::Error);
    }

    #[test]
    fn closed_without_sentinel_ends_loading_quietly() {
        let mut session = submitted();
        session.apply(StreamEvent::Chunk("text".to_string()));
        session.apply(StreamEvent::Closed);

        assert!(!session.loading);
        assert!(session.error.is_none());
        assert_eq!(session.mode(), ViewMode::Result);
    }

    #[test]
    fn resubmission_discards_previous_outcome() {
        let mut session = submitted();
        session.apply(StreamEvent::Chunk("first summary".to_string()));
        session.apply(StreamEvent::Status(COMPLETION_SENTINEL.to_string()));

        assert!(matches!(session.submit(VALID_URL), Submission::Open(_)));
        assert!(session.accumulated.is_empty());
        assert_eq!(session.mode(), ViewMode::Loading);
    }

    #[test]
    fn state_survives_a_serde_round_trip() {
        let mut session = submitted();
        session.apply(StreamEvent::Chunk("# Summary".to_string()));
        session.apply(StreamEvent::Status(COMPLETION_SENTINEL.to_string()));

        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.accumulated, session.accumulated);
        assert_eq!(restored.mode(), session.mode());
        assert!(restored.is_finished());
    }

    #[test]
    fn failure_is_terminal_for_the_submission_only() {
        let mut session = submitted();
        session.apply(StreamEvent::Error("transport error".to_string()));

        // The form stays usable: a fresh submit starts over cleanly.
        assert!(matches!(session.submit(VALID_URL), Submission::Open(_)));
        assert!(session.loading);
        assert!(session.error.is_none());
    }
}
