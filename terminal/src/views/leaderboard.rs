use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction as LayoutDirection, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;
use std::time::Duration;

use common::score::LeaderboardEntry;

use super::View;
use crate::app::AppCommand;
use crate::score_client::ScoreClient;

const TOP_SCORE_COUNT: usize = 10;

/// Ranked top-scores screen. Entries are fetched once on entry; R rebuilds
/// the view with a fresh fetch.
pub struct LeaderboardView {
    entries: Result<Vec<LeaderboardEntry>, String>,
}

impl LeaderboardView {
    pub fn new(client: &ScoreClient) -> Self {
        let entries = client
            .top_scores(TOP_SCORE_COUNT)
            .map_err(|e| e.to_string());
        LeaderboardView { entries }
    }
}

impl View for LeaderboardView {
    fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(AppCommand::BackToGame),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(AppCommand::RefreshLeaderboard),
            _ => None,
        }
    }

    fn update(&mut self, _dt: Duration) {}

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(frame.area());

        let block = Block::default().borders(Borders::ALL).title("Leaderboard");

        match &self.entries {
            Err(message) => {
                frame.render_widget(
                    Paragraph::new(format!("Error: {}", message))
                        .style(Style::default().fg(Color::Red))
                        .block(block),
                    chunks[0],
                );
            }
            Ok(entries) if entries.is_empty() => {
                frame.render_widget(
                    Paragraph::new("No scores yet. Be the first!").block(block),
                    chunks[0],
                );
            }
            Ok(entries) => {
                let now = Utc::now();
                let header = Row::new(vec!["Rank", "Name", "Score", "When"])
                    .style(Style::default().add_modifier(Modifier::BOLD));
                let rows: Vec<Row> = entries
                    .iter()
                    .map(|entry| {
                        let style = if entry.rank == 1 {
                            Style::default().fg(Color::Yellow)
                        } else {
                            Style::default()
                        };
                        Row::new(vec![
                            Cell::from(entry.rank.to_string()),
                            Cell::from(entry.name.clone()),
                            Cell::from(entry.score.to_string()),
                            Cell::from(format_relative(entry.timestamp, now)),
                        ])
                        .style(style)
                    })
                    .collect();
                let table = Table::new(
                    rows,
                    [
                        Constraint::Length(6),
                        Constraint::Min(12),
                        Constraint::Length(8),
                        Constraint::Length(14),
                    ],
                )
                .header(header)
                .block(block);
                frame.render_widget(table, chunks[0]);
            }
        }

        frame.render_widget(
            Paragraph::new("R refresh · Esc back to game")
                .style(Style::default().fg(Color::DarkGray)),
            chunks[1],
        );
    }
}

fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds().max(0);
    if secs < 60 {
        "just now".to_string()
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86400 {
        format!("{}h ago", secs / 3600)
    } else {
        format!("{}d ago", secs / 86400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn relative_times() {
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 12, 0, 0).unwrap();
        let at = |secs: i64| now - chrono::Duration::seconds(secs);
        assert_eq!(format_relative(at(5), now), "just now");
        assert_eq!(format_relative(at(90), now), "1m ago");
        assert_eq!(format_relative(at(7200), now), "2h ago");
        assert_eq!(format_relative(at(200_000), now), "2d ago");
        // A clock skewed into the future still reads sanely.
        assert_eq!(format_relative(at(-30), now), "just now");
    }
}
