//! ytsumma CLI - YouTube video summarisation client
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use anyhow::bail;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use ytsumma::event::StreamEvent;
use ytsumma::session::{Session, Submission, ViewMode};
use ytsumma::{ui, Config, SummarizeClient};

#[derive(Parser)]
#[command(name = "ytsumma")]
#[command(author, version, about = "TUI for YouTube video summarisation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a YouTube video by URL
    Summarise {
        /// YouTube URL to summarise
        url: String,
        /// Print the raw markdown without terminal styling
        #[arg(long)]
        raw: bool,
        /// Use the one-shot request instead of the event stream
        #[arg(long)]
        no_stream: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Some(Commands::Summarise {
            url,
            raw,
            no_stream,
        }) => summarise(&config, &url, raw, no_stream).await,
        None => {
            // Default: Launch the TUI
            ui::run(config).await
        }
    }
}

/// One-shot summarisation printed to stdout.
async fn summarise(config: &Config, url: &str, raw: bool, no_stream: bool) -> anyhow::Result<()> {
    let client = SummarizeClient::new(config)?;
    let mut session = Session::new();

    let stream_url = match session.submit(url) {
        Submission::Open(url) => url,
        Submission::Rejected(err) => return Err(err.into()),
    };

    if no_stream {
        let timeout = Duration::from_secs(config.backend.request_timeout_secs);
        let summary = client.summarize_once(&stream_url, timeout).await?;
        print_summary(&summary, raw);
        return Ok(());
    }

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let stream_client = client.clone();
    let stream_task = tokio::spawn(async move {
        stream_client.stream(&stream_url, tx).await;
    });

    while let Some(event) = rx.recv().await {
        if let StreamEvent::Status(label) = &event {
            eprintln!("{}", label.dimmed());
        }
        session.apply(event);
        if session.is_finished() {
            break;
        }
    }
    stream_task.await?;

    report(&session, raw)
}

/// Turn the finished session into printed output or a propagated error.
fn report(session: &Session, raw: bool) -> anyhow::Result<()> {
    match session.mode() {
        ViewMode::Error => {
            bail!("{}", session.error.as_deref().unwrap_or_default())
        }
        ViewMode::Result => {
            print_summary(&session.accumulated, raw);
            Ok(())
        }
        // Stream closed without delivering anything.
        _ => bail!("The backend returned no summary."),
    }
}

/// Print the summary, lightly styled unless raw output was requested.
fn print_summary(summary: &str, raw: bool) {
    if raw {
        println!("{summary}");
        return;
    }
    for line in summary.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with('#') {
            let heading = trimmed.trim_start_matches('#').trim_start();
            println!("{}", heading.bold().cyan());
        } else if let Some(rest) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            println!("  {} {}", "•".green(), rest);
        } else {
            println!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ytsumma::validate::INVALID_URL_MESSAGE;

    fn session_for(events: Vec<StreamEvent>) -> Session {
        let mut session = Session::new();
        session.submit("https://youtu.be/abc123");
        for event in events {
            session.apply(event);
        }
        session
    }

    #[test]
    fn report_accepts_a_completed_session() {
        let session = session_for(vec![
            StreamEvent::Chunk("# Summary".to_string()),
            StreamEvent::Status("Completed".to_string()),
        ]);
        assert!(report(&session, true).is_ok());
    }

    #[test]
    fn report_propagates_stream_errors() {
        let session = session_for(vec![StreamEvent::Error(
            "Failed to download audio".to_string(),
        )]);
        let err = report(&session, true).unwrap_err();
        assert_eq!(err.to_string(), "Failed to download audio");
    }

    #[test]
    fn report_rejects_an_empty_stream() {
        let session = session_for(vec![StreamEvent::Closed]);
        assert!(report(&session, true).is_err());
    }

    #[test]
    fn rejected_urls_propagate_the_validation_message() {
        let mut session = Session::new();
        let Submission::Rejected(err) = session.submit("not a url") else {
            panic!("expected rejection");
        };
        let err = anyhow::Error::from(err);
        assert_eq!(err.to_string(), INVALID_URL_MESSAGE);
    }
}
