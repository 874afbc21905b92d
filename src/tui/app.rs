//! Main application structure and event loop

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::client::HttpPredictionClient;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::form::FormField;
use crate::panel::ResultSummary;
use crate::submission::{execute, Outcome, Phase, Submission, View};
use crate::tui::form_view::{FormAction, FormView};
use crate::tui::theme::{Panel, PanelStyle, Theme};

/// Progress reported by the background submission task.
#[derive(Debug)]
pub enum AppEvent {
    Phase(Phase),
    Finished(Outcome),
}

/// Main application state
pub struct App {
    config: ClientConfig,
    client: HttpPredictionClient,
    form_view: FormView,
    submission: Submission,
    theme: Theme,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
    should_quit: bool,
}

impl App {
    pub fn new(config: ClientConfig) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            client: HttpPredictionClient::from_config(&config),
            config,
            form_view: FormView::default(),
            submission: Submission::new(),
            theme: Theme::default(),
            events_tx,
            events_rx,
            should_quit: false,
        }
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub fn form_view(&self) -> &FormView {
        &self.form_view
    }

    /// Run the main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("form ready; backend at {}", self.config.api_base_url);

        loop {
            self.drain_events();

            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        match self.form_view.handle_key(key, self.submission.is_loading()) {
            FormAction::Continue => {}
            FormAction::Submit => self.start_submission(),
            FormAction::Quit => self.should_quit = true,
        }
    }

    /// Spawn the submission on the runtime; progress comes back as
    /// [`AppEvent`]s. A panicking task still yields a `Finished` event.
    fn start_submission(&mut self) {
        if !self.submission.begin() {
            return;
        }

        let client = self.client.clone();
        let form = self.form_view.form().clone();
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            let phase_tx = tx.clone();
            let task = tokio::spawn(async move {
                execute(&client, &form, |phase| {
                    let _ = phase_tx.send(AppEvent::Phase(phase));
                })
                .await
            });
            let outcome = match task.await {
                Ok(outcome) => outcome,
                Err(e) => Err(ClientError::unknown(e.to_string())),
            };
            if tx.send(AppEvent::Finished(outcome)).is_err() {
                debug!("app closed before submission finished");
            }
        });
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
        }
    }

    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Phase(phase) if self.submission.is_loading() => self.submission.enter(phase),
            AppEvent::Phase(phase) => warn!("stray phase event {:?}", phase),
            AppEvent::Finished(outcome) => self.submission.finish(outcome),
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let bg = Block::default().style(Style::default().bg(self.theme.background));
        frame.render_widget(bg, area);

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        let invalid: &[FormField] = match self.submission.error() {
            Some(ClientError::Validation { fields }) => fields.as_slice(),
            _ => &[],
        };
        self.form_view
            .render(frame, content_chunks[0], &self.theme, invalid);

        match self.submission.view() {
            View::Form if self.submission.is_loading() => {
                self.render_pending(frame, content_chunks[1])
            }
            View::Form => self.render_help(frame, content_chunks[1]),
            View::Error(e) => self.render_error(frame, content_chunks[1], e),
            View::Result(r) => self.render_result(frame, content_chunks[1], &ResultSummary::from(r)),
        }

        self.render_status(frame, main_chunks[1]);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let block = Panel::new(&self.theme).title(" Keys ").block();
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let key = |k: &'static str, desc: &'static str| {
            Line::from(vec![
                Span::styled(format!("{:12}", k), Style::default().fg(self.theme.accent)),
                Span::styled(desc, Style::default().fg(self.theme.text_secondary)),
            ])
        };
        let lines = vec![
            key("[Up/Down]", "Select field"),
            key("[Left/Right]", "Change dropdown value"),
            key("[0-9 . -]", "Type amount"),
            key("[Backspace]", "Erase"),
            key("[Enter]", "Predict"),
            key("[r]", "Reset form"),
            key("[q/Esc]", "Quit"),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_pending(&self, frame: &mut Frame, area: Rect) {
        let block = Panel::new(&self.theme)
            .title(" Submitting ")
            .style(PanelStyle::Warning)
            .block();
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            Line::from(Span::styled(
                format!("{}...", self.submission.phase().describe()),
                Style::default().fg(self.theme.warning),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "The form is locked until the backend answers.",
                Style::default().fg(self.theme.text_muted),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }

    fn render_error(&self, frame: &mut Frame, area: Rect, error: &ClientError) {
        let block = Panel::new(&self.theme)
            .title(" Error ")
            .style(PanelStyle::Error)
            .block();
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let paragraph = Paragraph::new(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(self.theme.error),
        )))
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn render_result(&self, frame: &mut Frame, area: Rect, summary: &ResultSummary) {
        let (style, color) = if summary.fraud {
            (PanelStyle::Error, self.theme.error)
        } else {
            (PanelStyle::Success, self.theme.success)
        };
        let block = Panel::new(&self.theme)
            .title(" Prediction ")
            .style(style)
            .block();
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![
            Line::from(Span::styled(summary.headline, Style::default().fg(color).bold())),
            Line::from(""),
        ];
        for (label, value) in summary.rows() {
            lines.push(Line::from(vec![
                Span::styled(format!("{:23}", label), Style::default().fg(self.theme.text_secondary)),
                Span::styled(value, Style::default().fg(self.theme.text_primary)),
            ]));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let phase = self.submission.phase();
        let (state, color) = if phase.is_loading() {
            (format!("Submitting: {}...", phase.describe()), self.theme.warning)
        } else {
            (phase.describe().to_string(), self.theme.info)
        };
        let line = Line::from(vec![
            Span::styled(" Backend: ", Style::default().fg(self.theme.text_muted)),
            Span::styled(
                self.config.api_base_url.clone(),
                Style::default().fg(self.theme.text_secondary),
            ),
            Span::styled("  |  ", Style::default().fg(self.theme.border)),
            Span::styled(state, Style::default().fg(color)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
