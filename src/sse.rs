//! Incremental parser for `text/event-stream` framing.
//!
//! The backend emits events as `event: <name>\ndata: <payload>\n\n` over one
//! long-lived HTTP response. Body bytes arrive in arbitrary chunks, so the
//! parser buffers until a full line is available and dispatches an event on
//! every blank line.

/// One dispatched server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseMessage {
    /// Event name; `"message"` when the server sent no `event:` field.
    pub event: String,
    /// Payload; multi-line `data:` fields are joined with `\n`.
    pub data: String,
}

const DEFAULT_EVENT: &str = "message";

/// Streaming SSE parser. Feed it body chunks, collect dispatched messages.
#[derive(Debug, Default)]
pub struct SseParser {
    buffer: String,
    event: Option<String>,
    data_lines: Vec<String>,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one chunk of body bytes and return any complete events.
    ///
    /// Bytes that do not yet form a full line stay buffered for the next
    /// call. Invalid UTF-8 is replaced rather than rejected; the backend
    /// only ever sends text.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseMessage> {
        self.buffer.push_str(&String::from_utf8_lossy(chunk));

        let mut messages = Vec::new();
        while let Some(newline) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=newline).collect();
            let line = line.trim_end_matches(['\n', '\r']);
            if let Some(message) = self.handle_line(line) {
                messages.push(message);
            }
        }
        messages
    }

    fn handle_line(&mut self, line: &str) -> Option<SseMessage> {
        if line.is_empty() {
            return self.dispatch();
        }
        // Lines starting with a colon are comments (keep-alives).
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            // A line with no colon is a field with an empty value.
            None => (line, ""),
        };

        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data_lines.push(value.to_string()),
            // id, retry, and anything unknown are irrelevant to this backend.
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<SseMessage> {
        let event = self.event.take();
        let data_lines = std::mem::take(&mut self.data_lines);
        // A blank line with no accumulated data dispatches nothing.
        if event.is_none() && data_lines.is_empty() {
            return None;
        }
        Some(SseMessage {
            event: event.unwrap_or_else(|| DEFAULT_EVENT.to_string()),
            data: data_lines.join("\n"),
        })
    }
}
