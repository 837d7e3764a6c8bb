//! TUI module using ratatui.
//!
//! One input component for URL entry, a loading component showing the
//! server's progress labels, and a results component rendering the streamed
//! markdown. All state lives in [`Session`]; this module only draws it and
//! feeds it events.

use crate::client::SummarizeClient;
use crate::config::Config;
use crate::event::StreamEvent;
use crate::markdown;
use crate::session::{Session, Submission, ViewMode};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tracing::debug;

const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
const POLL_INTERVAL: Duration = Duration::from_millis(50);

struct App {
    client: SummarizeClient,
    session: Session,
    input: String,
    /// Receiver for the current stream, if one is open.
    events: Option<UnboundedReceiver<StreamEvent>>,
    /// Handle of the current transport task, aborted on resubmission.
    stream_task: Option<JoinHandle<()>>,
    show_raw: bool,
    scroll: u16,
    tick: usize,
    should_quit: bool,
}

impl App {
    fn new(client: SummarizeClient) -> Self {
        Self {
            client,
            session: Session::new(),
            input: String::new(),
            events: None,
            stream_task: None,
            show_raw: false,
            scroll: 0,
            tick: 0,
            should_quit: false,
        }
    }

    /// Submit the current input, closing any still-open prior stream first.
    fn submit(&mut self) {
        if let Some(task) = self.stream_task.take() {
            debug!("aborting previous stream before resubmission");
            task.abort();
        }
        self.events = None;
        self.scroll = 0;

        match self.session.submit(&self.input) {
            Submission::Open(url) => {
                let (tx, rx) = mpsc::unbounded_channel();
                let client = self.client.clone();
                self.events = Some(rx);
                self.stream_task = Some(tokio::spawn(async move {
                    client.stream(&url, tx).await;
                }));
            }
            Submission::Rejected(_) => {
                // Error is already recorded in the session; nothing to open.
            }
        }
    }

    /// Drain any pending stream events into the session.
    fn process_stream_events(&mut self) {
        let Some(rx) = self.events.as_mut() else {
            return;
        };
        while let Ok(event) = rx.try_recv() {
            self.session.apply(event);
        }
        if self.session.is_finished() {
            self.events = None;
            self.stream_task = None;
        }
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        match code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('r') if ctrl => self.show_raw = !self.show_raw,
            KeyCode::Enter => {
                // The submit control is disabled while a stream is in flight.
                if self.session.mode() != ViewMode::Loading && !self.input.trim().is_empty() {
                    self.submit();
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let [header, input, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_header(frame, header);
        self.render_input(frame, input);
        self.render_body(frame, body);
        self.render_footer(frame, footer);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let title = Line::styled(
            " YouTube Video Summarizer",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(Paragraph::new(title), area);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let loading = self.session.mode() == ViewMode::Loading;
        let block = Block::default()
            .borders(Borders::ALL)
            .title(if loading { " URL (busy) " } else { " URL " })
            .border_style(if loading {
                // Submission is disabled while a stream is in flight.
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Cyan)
            });
        let content = if self.input.is_empty() && !loading {
            Line::styled(
                "Enter YouTube URL",
                Style::default().fg(Color::DarkGray),
            )
        } else {
            Line::raw(self.input.as_str())
        };
        frame.render_widget(Paragraph::new(content).block(block), area);

        if !loading {
            let cursor_x = area.x + 1 + self.input.chars().count() as u16;
            frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }

    fn render_body(&self, frame: &mut Frame, area: Rect) {
        match self.session.mode() {
            ViewMode::Idle => {
                let hint = Paragraph::new(Line::styled(
                    "Paste a YouTube URL above and press Enter.",
                    Style::default().fg(Color::DarkGray),
                ));
                frame.render_widget(hint, area);
            }
            ViewMode::Loading => {
                let spinner = SPINNER_FRAMES[self.tick % SPINNER_FRAMES.len()];
                let status = self
                    .session
                    .status
                    .as_deref()
                    .unwrap_or("Contacting backend...");
                let lines = vec![
                    Line::from(vec![
                        Span::styled(spinner, Style::default().fg(Color::Yellow)),
                        Span::raw(" "),
                        Span::raw(status),
                    ]),
                    Line::raw(""),
                    Line::styled(
                        "Summaries stream in as the backend works.",
                        Style::default().fg(Color::DarkGray),
                    ),
                ];
                frame.render_widget(Paragraph::new(lines), area);
            }
            ViewMode::Error => {
                let error = self.session.error.as_deref().unwrap_or_default();
                let paragraph = Paragraph::new(Line::styled(
                    error,
                    Style::default().fg(Color::Red),
                ))
                .wrap(Wrap { trim: false });
                frame.render_widget(paragraph, area);
            }
            ViewMode::Result => {
                let text = if self.show_raw {
                    Text::raw(self.session.accumulated.clone())
                } else {
                    markdown::render(&self.session.accumulated)
                };
                let block = Block::default()
                    .borders(Borders::TOP)
                    .title(if self.show_raw { " Summary (raw) " } else { " Summary " });
                let paragraph = Paragraph::new(text)
                    .block(block)
                    .wrap(Wrap { trim: false })
                    .scroll((self.scroll, 0));
                frame.render_widget(paragraph, area);
            }
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let help = Line::styled(
            " Enter: summarise  ↑/↓: scroll  Ctrl-R: raw  Esc: quit",
            Style::default().fg(Color::DarkGray),
        );
        frame.render_widget(Paragraph::new(help), area);
    }
}

/// Run the interactive TUI until the user quits.
pub async fn run(config: Config) -> Result<()> {
    let client = SummarizeClient::new(&config)?;
    let mut app = App::new(client);

    let mut terminal = ratatui::init();
    // The draw/poll loop blocks; keep the runtime free for stream tasks.
    let result = tokio::task::block_in_place(|| event_loop(&mut terminal, &mut app));
    ratatui::restore();

    // Drop any stream still in flight; quitting is the only user-driven
    // way to close a connection early.
    if let Some(task) = app.stream_task.take() {
        task.abort();
    }

    result
}

fn event_loop(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> Result<()> {
    loop {
        app.process_stream_events();
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code, key.modifiers);
                }
            }
        }

        app.tick = app.tick.wrapping_add(1);
        if app.should_quit {
            return Ok(());
        }
    }
}
