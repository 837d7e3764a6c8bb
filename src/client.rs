//! HTTP transport to the summarization backend.
//!
//! Two protocol flavors are supported: the one-shot JSON POST and the
//! server-sent-events stream. The streaming path pushes tagged
//! [`StreamEvent`]s onto an mpsc channel and owns the connection lifetime:
//! it stops reading as soon as the completion sentinel or an error arrives.

use crate::config::Config;
use crate::event::{StreamEvent, COMPLETION_SENTINEL};
use crate::sse::{SseMessage, SseParser};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

/// User-Agent string identifying this client
const USER_AGENT: &str = concat!("ytsumma/", env!("CARGO_PKG_VERSION"), " (https://github.com/cladam/ytsumma)");

/// Message shown when the transport fails without a server-supplied reason.
pub const GENERIC_ERROR_MESSAGE: &str =
    "An error occurred. Please ensure the URL is valid and try again.";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("failed to reach backend: {0}")]
    FetchError(#[from] reqwest::Error),
    #[error("backend error: {0}")]
    Backend(String),
    #[error("backend response missing summary")]
    MissingSummary,
}

#[derive(Serialize)]
struct ProcessVideoRequest<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ProcessVideoResponse {
    summary: Option<String>,
    error: Option<String>,
}

/// Translate one parsed SSE message into stream events.
///
/// Returns the events to deliver plus whether the stream is finished and the
/// connection should be dropped.
fn translate(message: SseMessage) -> (Vec<StreamEvent>, bool) {
    match message.event.as_str() {
        "status" => {
            let completed = message.data == COMPLETION_SENTINEL;
            let mut events = vec![StreamEvent::Status(message.data)];
            if completed {
                // Sole normal termination path.
                events.push(StreamEvent::Closed);
            }
            (events, completed)
        }
        "result" => (vec![StreamEvent::Chunk(message.data)], false),
        "error" => {
            let text = if message.data.is_empty() {
                GENERIC_ERROR_MESSAGE.to_string()
            } else {
                message.data
            };
            (vec![StreamEvent::Error(text)], true)
        }
        other => {
            debug!("ignoring unknown event: {other}");
            (Vec::new(), false)
        }
    }
}

/// Client for the `/process_video` endpoint.
#[derive(Debug, Clone)]
pub struct SummarizeClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SummarizeClient {
    /// Build a configured client.
    ///
    /// No timeout is set on the shared client; summarization legitimately
    /// takes minutes and the streaming response stays open throughout. The
    /// one-shot path applies its own per-request timeout.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            endpoint: config.process_video_url(),
        })
    }

    /// One-shot summarization: POST the URL, wait for the full summary.
    pub async fn summarize_once(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<String, ClientError> {
        let response = self
            .http
            .post(&self.endpoint)
            .timeout(timeout)
            .json(&ProcessVideoRequest { url })
            .send()
            .await?;

        let status = response.status();
        let body: ProcessVideoResponse = response.json().await?;
        if let Some(error) = body.error {
            return Err(ClientError::Backend(error));
        }
        if !status.is_success() {
            return Err(ClientError::Backend(format!(
                "server returned HTTP {status}"
            )));
        }
        body.summary.ok_or(ClientError::MissingSummary)
    }

    /// Open the SSE stream for one URL and forward its events to `tx`.
    ///
    /// Exactly one connection is opened per call. The future resolves once
    /// the stream has terminated; every exit path has sent a terminal event
    /// (`Closed` or `Error`) so the consumer always observes the end.
    pub async fn stream(&self, url: &str, tx: UnboundedSender<StreamEvent>) {
        if let Err(err) = self.stream_inner(url, &tx).await {
            warn!("stream transport failed: {err}");
            let _ = tx.send(StreamEvent::Error(GENERIC_ERROR_MESSAGE.to_string()));
        }
    }

    async fn stream_inner(
        &self,
        url: &str,
        tx: &UnboundedSender<StreamEvent>,
    ) -> Result<(), ClientError> {
        debug!("opening stream for {url}");
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("url", url)])
            .send()
            .await?
            .error_for_status()?;

        let mut body = response.bytes_stream();
        let mut parser = SseParser::new();

        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            for message in parser.feed(&chunk) {
                let (events, finished) = translate(message);
                for event in events {
                    let _ = tx.send(event);
                }
                if finished {
                    return Ok(());
                }
            }
        }

        // Server closed the socket without the sentinel.
        debug!("stream ended without completion sentinel");
        let _ = tx.send(StreamEvent::Closed);
        Ok(())
    }
}
