//! Tagged events delivered by the streaming transport.
//!
//! Every stream callback from the backend is folded into one enum carried
//! over a single mpsc channel, so the consumer has exactly one transition
//! point instead of four callback bodies.

/// Status payload that marks normal end-of-stream.
pub const COMPLETION_SENTINEL: &str = "Completed";

/// One message from the backend stream, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Server-reported progress label (e.g. "Transcribing audio...").
    Status(String),
    /// Incremental markdown text, to be appended verbatim.
    Chunk(String),
    /// Server-reported or transport-level failure message.
    Error(String),
    /// The connection is gone; no further events will arrive.
    Closed,
}

impl StreamEvent {
    /// Whether this event ends the stream (nothing follows it).
    pub fn is_terminal(&self) -> bool {
        match self {
            StreamEvent::Status(label) => label == COMPLETION_SENTINEL,
            StreamEvent::Error(_) | StreamEvent::Closed => true,
            StreamEvent::Chunk(_) => false,
        }
    }
}
