//! Load progress reporting.
//!
//! The pipeline reports through [`Ui`]: a full-screen board ([`UiApp`]),
//! plain lines for pipes ([`ConsoleUi`]), or nothing ([`SilentUi`]).

mod board;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::path::Path;
use std::time::Duration;

use crate::loader::RestaurantBatch;
use crate::report::{format_rank_table, render_rank_chart, RestaurantRank};
use board::LoadBoard;

/// Pipeline phase shown at the top of the board
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Reading,
    Reconciling,
    Loading,
    Reporting,
    Complete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Reading => write!(f, "Reading menu file"),
            Phase::Reconciling => write!(f, "Resolving restaurants and categories"),
            Phase::Loading => write!(f, "Loading menu items"),
            Phase::Reporting => write!(f, "Building report"),
            Phase::Complete => write!(f, "Complete"),
        }
    }
}

/// Receives pipeline events
pub trait Ui {
    fn set_phase(&mut self, phase: Phase);
    /// The menu file being read
    fn set_source(&mut self, path: &Path);
    /// Number of restaurant batches the load will commit
    fn expect_restaurants(&mut self, total: usize);
    /// Called after each restaurant's batch is committed
    fn batch_committed(&mut self, batch: &RestaurantBatch);
    fn log(&mut self, message: impl Into<String>);
    fn show_ranking(&mut self, ranks: &[RestaurantRank]);
}

/// Full-screen board on the alternate screen
pub struct UiApp {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    board: LoadBoard,
    ranking: Option<Vec<RestaurantRank>>,
}

impl UiApp {
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;

        Ok(Self {
            terminal: Terminal::new(CrosstermBackend::new(stdout))?,
            board: LoadBoard::new(),
            ranking: None,
        })
    }

    fn redraw(&mut self) {
        let board = &self.board;
        let ranking = self.ranking.as_deref();

        let drawn = self.terminal.draw(|frame| {
            // ranking rows plus borders, once the report has run
            let chart_height = ranking.map_or(0, |r| r.len().max(1) as u16 + 2);
            let [load_area, chart_area] = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(14), Constraint::Length(chart_height)])
                .areas(frame.area());

            board.render(frame, load_area);
            if let Some(ranks) = ranking {
                render_rank_chart(frame, chart_area, ranks);
            }
        });
        drawn.ok();
    }

    /// Show the final summary, wait for a key, then leave the alternate screen
    pub fn finish(mut self, summary: &str) -> Result<()> {
        self.board.set_phase(Phase::Complete);
        for line in summary.lines() {
            self.board.note(line);
        }
        self.board.note("Press any key to exit...");
        self.redraw();

        loop {
            if event::poll(Duration::from_millis(100))? {
                if let CrosstermEvent::Key(_) = event::read()? {
                    break;
                }
            }
        }
        self.restore()
    }

    /// Leave the alternate screen without waiting
    pub fn restore(mut self) -> Result<()> {
        self.leave_screen()
    }

    fn leave_screen(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Ui for UiApp {
    fn set_phase(&mut self, phase: Phase) {
        self.board.set_phase(phase);
        self.redraw();
    }

    fn set_source(&mut self, path: &Path) {
        self.board.set_source(path);
        self.redraw();
    }

    fn expect_restaurants(&mut self, total: usize) {
        self.board.expect_restaurants(total);
        self.redraw();
    }

    fn batch_committed(&mut self, batch: &RestaurantBatch) {
        self.board.push_batch(batch);
        self.redraw();
    }

    fn log(&mut self, message: impl Into<String>) {
        self.board.note(message);
        self.redraw();
    }

    fn show_ranking(&mut self, ranks: &[RestaurantRank]) {
        self.ranking = Some(ranks.to_vec());
        self.redraw();
    }
}

impl Drop for UiApp {
    fn drop(&mut self) {
        self.leave_screen().ok();
    }
}

/// Line-oriented output for pipes and `--plain`
#[derive(Default)]
pub struct ConsoleUi;

impl ConsoleUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for ConsoleUi {
    fn set_phase(&mut self, phase: Phase) {
        println!("\n{}...", phase);
    }

    fn set_source(&mut self, path: &Path) {
        println!("  {}", path.display());
    }

    fn expect_restaurants(&mut self, total: usize) {
        println!("  {} restaurants", total);
    }

    fn batch_committed(&mut self, batch: &RestaurantBatch) {
        println!("  {}", batch);
    }

    fn log(&mut self, message: impl Into<String>) {
        println!("  {}", message.into());
    }

    fn show_ranking(&mut self, ranks: &[RestaurantRank]) {
        println!("\nRestaurants with the lowest average carbs:\n");
        print!("{}", format_rank_table(ranks));
    }
}

/// Silent UI implementation for testing and non-interactive use
#[derive(Default)]
pub struct SilentUi;

impl SilentUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for SilentUi {
    fn set_phase(&mut self, _phase: Phase) {}
    fn set_source(&mut self, _path: &Path) {}
    fn expect_restaurants(&mut self, _total: usize) {}
    fn batch_committed(&mut self, _batch: &RestaurantBatch) {}
    fn log(&mut self, _message: impl Into<String>) {}
    fn show_ranking(&mut self, _ranks: &[RestaurantRank]) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Loading.to_string(), "Loading menu items");
        assert_eq!(Phase::Complete.to_string(), "Complete");
    }
}
