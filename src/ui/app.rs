use anyhow::Result;
use crossterm::{
    event::KeyCode,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::api::FinancialDataProvider;
use crate::models::{FilterField, SortField};
use super::components::{
    format_amount, format_eps, render_filter_input, render_loading_indicator,
    sort_header_label, styled_amount_span,
};
use super::events::{EventManager, TuiEvent};
use super::layout::TuiLayout;
use super::state::{DashboardState, FetchTicket, LogLevel};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Whether keystrokes go to commands or to the focused filter box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

pub struct DashboardApp {
    pub state: DashboardState,
    pub focused: FilterField,
    pub mode: InputMode,
    pub edit_buffer: String,
    pub should_quit: bool,
    provider: Arc<dyn FinancialDataProvider>,
    events: EventManager,
    table_state: TableState,
    source_name: String,
}

impl DashboardApp {
    pub fn new(provider: Arc<dyn FinancialDataProvider>) -> Self {
        let source_name = provider.source_name();
        Self {
            state: DashboardState::new(),
            focused: FilterField::StartDate,
            mode: InputMode::Normal,
            edit_buffer: String::new(),
            should_quit: false,
            provider,
            events: EventManager::new(),
            table_state: TableState::default(),
            source_name,
        }
    }

    /// Issue the startup fetch
    pub fn start(&mut self) {
        let ticket = self.state.begin_initial_fetch();
        self.dispatch(ticket);
    }

    /// Run the ticket's fetch on a background task; the outcome comes back
    /// as a [`TuiEvent::FetchCompleted`]
    fn dispatch(&self, ticket: FetchTicket) {
        let provider = Arc::clone(&self.provider);
        let sender = self.events.sender();
        tokio::spawn(async move {
            let FetchTicket { token, query } = ticket;
            let result = provider.fetch_records(&query).await;
            if sender.send(TuiEvent::FetchCompleted { token, result }).await.is_err() {
                debug!("UI closed before request #{} settled", token.value());
            }
        });
    }

    fn dispatch_if_changed(&self, ticket: Option<FetchTicket>) {
        if let Some(ticket) = ticket {
            self.dispatch(ticket);
        }
    }

    /// Wait for the next queued event (fetch completions)
    pub async fn next_event(&mut self) -> Option<TuiEvent> {
        self.events.receive().await
    }

    pub fn handle_event(&mut self, event: TuiEvent) -> Result<()> {
        match event {
            TuiEvent::Key(key) => self.handle_key_event(key)?,
            TuiEvent::FetchCompleted { token, result } => {
                let disposition = self.state.complete_fetch(token, result);
                debug!("Request #{} settled: {:?}", token.value(), disposition);
                self.clamp_selection();
            }
            TuiEvent::Resize(..) => {}
        }
        Ok(())
    }

    pub fn handle_key_event(&mut self, key: KeyCode) -> Result<()> {
        match self.mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Editing => self.handle_editing_key(key),
        }
        Ok(())
    }

    fn handle_normal_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => self.focused = self.focused.next(),
            KeyCode::BackTab => self.focused = self.focused.previous(),
            KeyCode::Enter | KeyCode::Char('e') => {
                self.edit_buffer = self.state.filters().get(self.focused).unwrap_or_default().to_string();
                self.mode = InputMode::Editing;
            }
            KeyCode::Char('x') => {
                let ticket = self.state.set_filter(self.focused, "");
                self.dispatch_if_changed(ticket);
            }
            KeyCode::Char('c') => {
                let ticket = self.state.clear_filters();
                self.dispatch_if_changed(ticket);
            }
            KeyCode::Char('1') | KeyCode::Char('d') => self.state.toggle_sort(SortField::Date),
            KeyCode::Char('2') | KeyCode::Char('r') => self.state.toggle_sort(SortField::Revenue),
            KeyCode::Char('3') | KeyCode::Char('n') => self.state.toggle_sort(SortField::NetIncome),
            KeyCode::Down => self.scroll(1),
            KeyCode::Up => self.scroll(-1),
            _ => {}
        }
    }

    fn handle_editing_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char(c) => self.edit_buffer.push(c),
            KeyCode::Backspace => {
                self.edit_buffer.pop();
            }
            KeyCode::Enter => {
                self.mode = InputMode::Normal;
                let value = std::mem::take(&mut self.edit_buffer);
                info!("Filter {} set to {:?}", self.focused.param_name(), value);
                let ticket = self.state.set_filter(self.focused, &value);
                self.dispatch_if_changed(ticket);
            }
            KeyCode::Esc => {
                self.mode = InputMode::Normal;
                self.edit_buffer.clear();
            }
            _ => {}
        }
    }

    fn scroll(&mut self, delta: i64) {
        let len = self.state.records().len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let current = self.table_state.selected().map_or(-1, |i| i as i64);
        let next = (current + delta).clamp(0, len as i64 - 1);
        self.table_state.select(Some(next as usize));
    }

    fn clamp_selection(&mut self) {
        let len = self.state.records().len();
        match self.table_state.selected() {
            Some(_) if len == 0 => self.table_state.select(None),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            _ => {}
        }
    }

    pub fn selected_row(&self) -> Option<usize> {
        self.table_state.selected()
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let layout = TuiLayout::new(f.area());

        self.render_header(f, layout.header);
        self.render_filters(f, &layout);
        if self.state.is_loading() && !self.state.has_received() {
            render_loading_indicator(f, layout.table, "Loading...");
        } else {
            self.render_table(f, layout.table);
        }
        self.render_status_bar(f, layout.status_bar);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                "Financial Data",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", self.source_name), Style::default().fg(Color::DarkGray)),
        ]))
        .block(Block::default().borders(Borders::ALL));

        f.render_widget(header, area);
    }

    fn render_filters(&self, f: &mut Frame, layout: &TuiLayout) {
        for (field, cell) in FilterField::ALL.iter().zip(layout.filter_cells()) {
            let focused = *field == self.focused;
            let editing = focused && self.mode == InputMode::Editing;
            let value = if editing {
                self.edit_buffer.as_str()
            } else {
                self.state.filters().get(*field).unwrap_or_default()
            };
            render_filter_input(f, cell, field.label(), value, field.placeholder(), focused, editing);
        }
    }

    fn render_table(&mut self, f: &mut Frame, area: Rect) {
        let sort = self.state.sort();
        let header_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let header = Row::new(vec![
            Cell::from(sort_header_label(SortField::Date, sort)),
            Cell::from(sort_header_label(SortField::Revenue, sort)),
            Cell::from(sort_header_label(SortField::NetIncome, sort)),
            Cell::from("Gross Profit"),
            Cell::from("EPS"),
            Cell::from("Operating Income"),
        ])
        .style(header_style);

        let rows: Vec<Row> = self
            .state
            .sorted_records()
            .into_iter()
            .map(|record| {
                Row::new(vec![
                    Cell::from(record.date),
                    Cell::from(format_amount(record.revenue)),
                    Cell::from(styled_amount_span(record.net_income)),
                    Cell::from(format_amount(record.gross_profit)),
                    Cell::from(format_eps(record.eps)),
                    Cell::from(styled_amount_span(record.operating_income)),
                ])
            })
            .collect();

        let title = if self.state.is_loading() {
            format!("Records ({}) • Loading...", rows.len())
        } else {
            format!("Records ({})", rows.len())
        };

        let widths = [
            Constraint::Length(12),
            Constraint::Percentage(18),
            Constraint::Percentage(18),
            Constraint::Percentage(18),
            Constraint::Percentage(10),
            Constraint::Percentage(20),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let hints = match self.mode {
            InputMode::Normal => vec![
                Span::styled("Tab", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::styled(" filter • ", Style::default().fg(Color::Gray)),
                Span::styled("Enter", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::styled(" edit • ", Style::default().fg(Color::Gray)),
                Span::styled("x/c", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::styled(" clear • ", Style::default().fg(Color::Gray)),
                Span::styled("1/2/3", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::styled(" sort • ", Style::default().fg(Color::Gray)),
                Span::styled("Q", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                Span::styled(" quit", Style::default().fg(Color::Gray)),
            ],
            InputMode::Editing => vec![
                Span::styled("Enter", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::styled(" apply • ", Style::default().fg(Color::Gray)),
                Span::styled("Esc", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                Span::styled(" cancel", Style::default().fg(Color::Gray)),
            ],
        };

        let mut activity = vec![Span::styled(
            self.state.get_status_text(),
            Style::default().fg(Color::Cyan),
        )];
        if let Some(log) = self.state.get_recent_logs(1).last() {
            let color = match log.level {
                LogLevel::Info => Color::Gray,
                LogLevel::Success => Color::Green,
                LogLevel::Error => Color::Red,
            };
            activity.push(Span::styled(
                format!(" • {} {}", log.timestamp.format("%H:%M:%S"), log.message),
                Style::default().fg(color),
            ));
        }

        let paragraph = Paragraph::new(vec![Line::from(hints), Line::from(activity)])
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::White));

        f.render_widget(paragraph, area);
    }

    /// Main loop: draw, then handle terminal input and settled fetches.
    ///
    /// The terminal poll blocks, so it runs under `block_in_place` and the
    /// loop yields each pass to keep spawned fetches moving.
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            let input = tokio::task::block_in_place(|| EventManager::poll_terminal(POLL_INTERVAL))?;
            if let Some(event) = input {
                self.handle_event(event)?;
            }
            while let Some(event) = self.events.try_receive() {
                self.handle_event(event)?;
            }

            if self.should_quit {
                return Ok(());
            }
            tokio::task::yield_now().await;
        }
    }
}

/// Run the dashboard TUI against the given data source
pub async fn run_app(provider: Arc<dyn FinancialDataProvider>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut app = DashboardApp::new(provider);
    app.start();
    let result = app.run(&mut terminal).await;

    // Cleanup terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}
