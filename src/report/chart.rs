//! Ranking rendering: gauges for the terminal UI, a plain table otherwise.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use super::query::RestaurantRank;

/// Horizontal bar per restaurant, scaled to the highest average carbs shown
pub fn render_rank_chart(frame: &mut Frame, area: Rect, ranks: &[RestaurantRank]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Lowest average carbs ")
        .border_style(Style::default().fg(Color::Blue));

    if ranks.is_empty() {
        frame.render_widget(Paragraph::new(" No food items loaded").block(block), area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); ranks.len()])
        .split(inner);

    let scale = max_carbs(ranks);
    for (rank, row) in ranks.iter().zip(rows.iter()) {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
            .ratio(carb_ratio(rank, scale))
            .label(rank_label(rank));
        frame.render_widget(gauge, *row);
    }
}

fn max_carbs(ranks: &[RestaurantRank]) -> f64 {
    ranks
        .iter()
        .filter_map(|r| r.avg_carbs)
        .fold(0.0, f64::max)
}

fn carb_ratio(rank: &RestaurantRank, scale: f64) -> f64 {
    match rank.avg_carbs {
        Some(carbs) if scale > 0.0 => (carbs / scale).clamp(0.0, 1.0),
        _ => 0.0,
    }
}

fn rank_label(rank: &RestaurantRank) -> String {
    format!(
        "{}: {} carbs, {} kcal avg ({}-{})",
        rank.restaurant,
        fmt_real(rank.avg_carbs),
        fmt_real(rank.avg_calories),
        fmt_int(rank.min_calories),
        fmt_int(rank.max_calories)
    )
}

fn fmt_real(value: Option<f64>) -> String {
    value.map(|v| format!("{:.1}", v)).unwrap_or_else(|| "-".to_string())
}

fn fmt_int(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Fixed-width text table of the ranking
pub fn format_rank_table(ranks: &[RestaurantRank]) -> String {
    let width = ranks
        .iter()
        .map(|r| r.restaurant.chars().count())
        .max()
        .unwrap_or(0)
        .max("Restaurant".len());

    let mut out = format!(
        "{:<width$}  {:>12}  {:>12}  {:>12}  {:>13}\n",
        "Restaurant",
        "Avg Calories",
        "Min Calories",
        "Max Calories",
        "Average Carbs",
        width = width
    );
    for rank in ranks {
        out.push_str(&format!(
            "{:<width$}  {:>12}  {:>12}  {:>12}  {:>13}\n",
            rank.restaurant,
            fmt_real(rank.avg_calories),
            fmt_int(rank.min_calories),
            fmt_int(rank.max_calories),
            fmt_real(rank.avg_carbs),
            width = width
        ));
    }
    out
}
