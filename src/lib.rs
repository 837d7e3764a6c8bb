//! # ytsumma
//!
//! A TUI client for a YouTube video summarisation service.
//!
//! ## Features
//!
//! - **Streaming Results**: Consumes the backend's server-sent-events stream
//!   and renders markdown chunks as they arrive
//! - **Pure State Machine**: The submission lifecycle is a serializable state
//!   object driven by a reducer, testable without a terminal
//! - **One-shot Mode**: A non-streaming `summarise` subcommand for scripting

pub mod client;
pub mod config;
pub mod event;
pub mod markdown;
pub mod session;
pub mod sse;
pub mod ui;
pub mod validate;

pub use client::SummarizeClient;
pub use config::Config;
pub use event::StreamEvent;
pub use session::Session;
