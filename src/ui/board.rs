//! Load board: what the full-screen view shows while a menu file loads.

use std::path::Path;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table};
use ratatui::Frame;

use crate::loader::{LoadSummary, RestaurantBatch};

use super::Phase;

/// Notes kept for the footer; batch rows are kept in full
const NOTE_LINES: usize = 3;

pub struct LoadBoard {
    phase: Phase,
    source: Option<String>,
    expected: usize,
    totals: LoadSummary,
    batches: Vec<RestaurantBatch>,
    notes: Vec<String>,
}

impl LoadBoard {
    pub fn new() -> Self {
        Self {
            phase: Phase::Reading,
            source: None,
            expected: 0,
            totals: LoadSummary::default(),
            batches: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub fn set_source(&mut self, path: &Path) {
        self.source = Some(path.display().to_string());
    }

    pub fn expect_restaurants(&mut self, total: usize) {
        self.expected = total;
        self.totals.restaurants = total;
    }

    pub fn push_batch(&mut self, batch: &RestaurantBatch) {
        self.totals.record(batch);
        self.batches.push(batch.clone());
    }

    pub fn note(&mut self, message: impl Into<String>) {
        self.notes.push(message.into());
        if self.notes.len() > NOTE_LINES {
            self.notes.remove(0);
        }
    }

    /// Fraction of restaurants committed so far
    pub fn done_ratio(&self) -> f64 {
        if self.expected == 0 {
            return 0.0;
        }
        (self.batches.len() as f64 / self.expected as f64).min(1.0)
    }

    pub fn totals_line(&self) -> String {
        format!(
            "{} new  {} skipped  {} subcategory links",
            self.totals.inserted_items, self.totals.skipped_items, self.totals.subcategory_links
        )
    }

    /// The newest batches that fit in `rows` table lines
    pub fn recent_batches(&self, rows: usize) -> &[RestaurantBatch] {
        let start = self.batches.len().saturating_sub(rows);
        &self.batches[start..]
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(4),
                Constraint::Length(NOTE_LINES as u16 + 2),
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.render_gauge(frame, chunks[1]);
        self.render_batches(frame, chunks[2]);
        self.render_notes(frame, chunks[3]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let accent = match self.phase {
            Phase::Complete => Color::Green,
            _ => Color::Cyan,
        };
        let lines = vec![
            Line::from(Span::styled(
                format!(" {}", self.phase),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(" file  ", Style::default().fg(Color::DarkGray)),
                Span::raw(self.source.as_deref().unwrap_or("-")),
            ]),
        ];
        let block = Block::default()
            .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
            .title(" Menu Nutrition Loader ")
            .border_style(Style::default().fg(Color::Blue));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_gauge(&self, frame: &mut Frame, area: Rect) {
        let label = format!(
            "{}/{} restaurants, {}",
            self.batches.len(),
            self.expected,
            self.totals_line()
        );
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
            .ratio(self.done_ratio())
            .label(label);
        frame.render_widget(gauge, area);
    }

    fn render_batches(&self, frame: &mut Frame, area: Rect) {
        // borders and header row
        let visible = area.height.saturating_sub(3) as usize;
        let rows = self.recent_batches(visible).iter().map(|batch| {
            let style = if batch.inserted == 0 {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(batch.restaurant.clone()),
                Cell::from(batch.inserted.to_string()),
                Cell::from(batch.skipped.to_string()),
                Cell::from(batch.links.to_string()),
            ])
            .style(style)
        });

        let header = Row::new(vec!["Restaurant", "New", "Skipped", "Links"])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let table = Table::new(
            rows,
            [
                Constraint::Min(16),
                Constraint::Length(7),
                Constraint::Length(8),
                Constraint::Length(6),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Committed ")
                .border_style(Style::default().fg(Color::Blue)),
        );
        frame.render_widget(table, area);
    }

    fn render_notes(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .notes
            .iter()
            .map(|note| Line::from(format!(" {}", note)))
            .collect();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
