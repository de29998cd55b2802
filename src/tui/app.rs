//! Application state and event loop
//!
//! The app owns the store, the poller, and the current document. Everything
//! funnels through one loop: cluster completion events, keyboard input, and
//! the poll-interval tick. Store mutations only ever happen here, so set
//! transitions stay atomic per event.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;

use crate::cluster::ClusterExecutor;
use crate::config::Config;
use crate::models::ResourceKind;
use crate::poll::{ClusterEvent, Poller};
use crate::render::{Document, Evaluator, NavTarget, SectionStates};
use crate::state::ResourceStore;
use crate::tui::Theme;
use crate::views::render_document;

/// Scrollable YAML overlay for one resource
struct YamlView {
    title: String,
    text: String,
    scroll: u16,
}

/// Top-level application state
pub struct App {
    store: ResourceStore,
    poller: Poller,
    cluster_events: mpsc::UnboundedReceiver<ClusterEvent>,
    section_states: SectionStates,
    document: Document,
    cursor: usize,
    scroll: usize,
    status_message: Option<(String, bool)>,
    yaml_view: Option<YamlView>,
    namespace: Option<String>,
    show_completed: bool,
    read_only: bool,
    poll_interval: Duration,
    theme: Theme,
    should_quit: bool,
}

impl App {
    pub fn new(executor: Arc<dyn ClusterExecutor>, config: &Config) -> Self {
        let (poller, cluster_events) = Poller::new(executor);
        Self {
            store: ResourceStore::new(),
            poller,
            cluster_events,
            section_states: SectionStates::new(),
            document: Document::default(),
            cursor: 0,
            scroll: 0,
            status_message: None,
            yaml_view: None,
            namespace: config.namespace(),
            show_completed: config.show_completed,
            read_only: config.read_only,
            poll_interval: Duration::from_secs(config.poll_interval_secs.max(1)),
            theme: Theme::default(),
            should_quit: false,
        }
    }

    /// Run the event loop until quit
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        let mut input_rx = spawn_input_reader();
        let mut ticker = tokio::time::interval(self.poll_interval);

        self.poller.refresh_all();
        self.redraw();

        loop {
            terminal.draw(|f| self.render(f))?;

            tokio::select! {
                Some(event) = self.cluster_events.recv() => {
                    let outcome = self.poller.apply(&mut self.store, event);
                    if let Some(message) = outcome.message {
                        self.status_message = Some(message);
                    }
                    if outcome.redraw {
                        self.redraw();
                    }
                }
                Some(input) = input_rx.recv() => {
                    if let Event::Key(key) = input {
                        if key.kind == KeyEventKind::Press {
                            self.handle_key(key);
                        }
                    }
                }
                _ = ticker.tick() => {
                    self.poller.refresh_all();
                }
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Rebuild the document from the current store snapshot
    ///
    /// A render error is a renderer defect: the previous document stays on
    /// screen and the failure is reported instead of half-drawn.
    fn redraw(&mut self) {
        self.store.begin_redraw();
        let roots = render_document(&self.store, self.show_completed);
        match Evaluator::new(&self.section_states).eval(&roots) {
            Ok(document) => {
                self.document = document;
                let max = self.document.visible_lines().len().saturating_sub(1);
                self.cursor = self.cursor.min(max);
            }
            Err(e) => {
                tracing::error!(error = %e, "redraw aborted");
                self.status_message = Some((format!("Render error: {}", e), true));
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.yaml_view.is_some() {
            self.handle_yaml_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1),
            KeyCode::Tab => self.toggle_section(),
            KeyCode::Char('g') => {
                self.poller.refresh_all();
                self.status_message = Some(("Refreshing…".to_string(), false));
            }
            KeyCode::Char('m') => self.set_mark(true),
            KeyCode::Char('u') => self.set_mark(false),
            KeyCode::Char('x') => self.delete_marked(),
            KeyCode::Char('y') => self.open_yaml_view(),
            KeyCode::Char('c') => self.yank_name(),
            _ => {}
        }
    }

    fn handle_yaml_key(&mut self, key: KeyEvent) {
        let Some(view) = self.yaml_view.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.yaml_view = None,
            KeyCode::Char('j') | KeyCode::Down => view.scroll = view.scroll.saturating_add(1),
            KeyCode::Char('k') | KeyCode::Up => view.scroll = view.scroll.saturating_sub(1),
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let count = self.document.visible_lines().len();
        if count == 0 {
            return;
        }
        let max = count - 1;
        self.cursor = self
            .cursor
            .saturating_add_signed(delta)
            .min(max);
    }

    fn nav_at_cursor(&self) -> Option<NavTarget> {
        self.document
            .visible_lines()
            .get(self.cursor)
            .and_then(|v| v.line.nav.clone())
    }

    fn section_at_cursor(&self) -> Option<String> {
        self.document
            .visible_lines()
            .get(self.cursor)
            .and_then(|v| v.section.map(|s| s.to_string()))
    }

    fn toggle_section(&mut self) {
        if let Some(id) = self.section_at_cursor() {
            self.section_states.toggle(&id);
            self.redraw();
        }
    }

    fn set_mark(&mut self, mark: bool) {
        if self.read_only {
            self.status_message = Some(("Read-only mode".to_string(), true));
            return;
        }
        let Some(target) = self.nav_at_cursor() else {
            return;
        };
        if mark {
            self.store.mark(target.kind, &target.namespace, &target.name);
        } else {
            self.store.unmark(target.kind, &target.namespace, &target.name);
        }
        self.redraw();
    }

    fn delete_marked(&mut self) {
        if self.read_only {
            self.status_message = Some(("Read-only mode".to_string(), true));
            return;
        }
        // Delete for the kind under the cursor, or every kind when the
        // cursor is not on a resource line
        let kinds: Vec<ResourceKind> = match self.nav_at_cursor() {
            Some(target) => vec![target.kind],
            None => ResourceKind::all().to_vec(),
        };
        let mut dispatched = 0;
        for kind in kinds {
            dispatched += self.poller.delete_marked(kind, &mut self.store);
        }
        if dispatched > 0 {
            self.status_message = Some((format!("Deleting {} resource(s)…", dispatched), false));
            // Pending styling should show before the deletes resolve
            self.redraw();
        } else {
            self.status_message = Some(("Nothing marked for deletion".to_string(), false));
        }
    }

    fn open_yaml_view(&mut self) {
        let Some(target) = self.nav_at_cursor() else {
            return;
        };
        match self
            .store
            .lookup(target.kind, &target.namespace, &target.name)
        {
            Ok(item) => match serde_yaml::to_string(&item.raw) {
                Ok(text) => {
                    self.yaml_view = Some(YamlView {
                        title: format!("{} {}/{}", target.kind, target.namespace, target.name),
                        text,
                        scroll: 0,
                    });
                }
                Err(e) => {
                    self.status_message = Some((format!("Failed to render YAML: {}", e), true));
                }
            },
            Err(e) => {
                self.status_message = Some((e.to_string(), true));
            }
        }
    }

    fn yank_name(&mut self) {
        let payload = self
            .document
            .visible_lines()
            .get(self.cursor)
            .and_then(|v| v.line.copy.clone());
        if let Some(name) = payload {
            self.status_message = Some((format!("Yanked: {}", name), false));
        }
    }

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(f.area());

        // Header: context line
        let namespace = self.namespace.as_deref().unwrap_or("all namespaces");
        let header = Line::from(vec![
            Span::styled("kubedoc", Style::default().fg(self.theme.header_context)),
            Span::raw(format!("  [{}]", namespace)),
        ]);
        f.render_widget(Paragraph::new(header), chunks[0]);

        if let Some(view) = &self.yaml_view {
            let body = Paragraph::new(view.text.as_str())
                .scroll((view.scroll, 0))
                .block(Block::default().title(view.title.clone()).borders(Borders::ALL));
            f.render_widget(body, chunks[1]);
        } else {
            self.render_document_body(f, chunks[1]);
        }

        // Footer: status message or key hints
        let footer = match &self.status_message {
            Some((message, is_error)) => {
                let color = if *is_error {
                    self.theme.status_error
                } else {
                    self.theme.status_info
                };
                Line::from(Span::styled(message.clone(), Style::default().fg(color)))
            }
            None => Line::from(Span::styled(
                "j/k move  TAB fold  g refresh  m mark  u unmark  x delete  y yaml  q quit",
                Style::default().fg(self.theme.dimmed),
            )),
        };
        f.render_widget(Paragraph::new(footer), chunks[2]);
    }

    fn render_document_body(&mut self, f: &mut Frame, area: ratatui::layout::Rect) {
        let height = area.height as usize;

        // Keep the cursor inside the window
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if height > 0 && self.cursor >= self.scroll + height {
            self.scroll = self.cursor + 1 - height;
        }

        let visible = self.document.visible_lines();
        let lines: Vec<Line> = visible
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(height)
            .map(|(idx, v)| {
                let mut spans = vec![Span::raw("  ".repeat(v.line.indent))];
                spans.extend(v.line.spans.iter().map(|s| {
                    Span::styled(s.text.clone(), self.theme.style_for(&s.styles))
                }));
                let mut line = Line::from(spans);
                if idx == self.cursor {
                    line = line.style(Style::default().bg(self.theme.cursor_bg));
                }
                line
            })
            .collect();

        f.render_widget(Paragraph::new(lines), area);
    }
}

/// Forward crossterm events into the async loop
fn spawn_input_reader() -> mpsc::UnboundedReceiver<Event> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        while let Ok(event) = crossterm::event::read() {
            if tx.send(event).is_err() {
                break;
            }
        }
    });
    rx
}
