use crossterm::event::{KeyCode, KeyEvent};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::layout::{Constraint, Direction as LayoutDirection, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use std::time::Duration;

use common::score::MAX_NAME_LEN;
use common::{Direction, GameCommand, GameState, TickOutcome};

use super::View;
use crate::app::AppCommand;
use crate::render::render_grid;

const HELP_TEXT: &str = "Arrows move · P pause · R restart · L leaderboard · Q quit";

/// The playing field plus the modal score-submission prompt shown when a
/// round ends with a positive score.
enum Phase {
    Playing,
    SubmitPrompt {
        name: String,
        error: Option<String>,
    },
}

pub struct GameView {
    state: GameState,
    rng: StdRng,
    tick_interval: Duration,
    tick_accumulator: Duration,
    phase: Phase,
    status: Option<String>,
}

impl GameView {
    pub fn new(tick_interval: Duration) -> Self {
        Self::with_rng(tick_interval, StdRng::from_entropy())
    }

    /// Deterministic constructor for tests.
    pub fn with_seed(tick_interval: Duration, seed: u64) -> Self {
        Self::with_rng(tick_interval, StdRng::seed_from_u64(seed))
    }

    fn with_rng(tick_interval: Duration, mut rng: StdRng) -> Self {
        let state = GameState::new(&mut rng);
        GameView {
            state,
            rng,
            tick_interval,
            tick_accumulator: Duration::ZERO,
            phase: Phase::Playing,
            status: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Suspend the round (no-op when already over) while another screen is up.
    pub fn pause(&mut self) {
        self.state.set_paused(true);
    }

    /// Called by the app once a submission attempt has finished.
    pub fn submission_finished(&mut self, result: Result<(), String>) {
        match result {
            Ok(()) => {
                self.phase = Phase::Playing;
                self.status = Some("Score submitted! Press R to play again.".to_string());
            }
            Err(message) => {
                if let Phase::SubmitPrompt { error, .. } = &mut self.phase {
                    *error = Some(format!("{} Press Enter to retry or Esc to skip.", message));
                }
            }
        }
    }

    fn game_over_status(score: u32) -> String {
        format!("Game Over! Your score: {}. Press R to restart.", score)
    }

    fn on_round_end(&mut self) {
        // Submission is only offered for a positive score.
        if self.state.score > 0 {
            self.phase = Phase::SubmitPrompt {
                name: String::new(),
                error: None,
            };
        } else {
            self.status = Some(Self::game_over_status(self.state.score));
        }
    }

    fn handle_submit_key(&mut self, key: KeyEvent) -> Option<AppCommand> {
        let score = self.state.score;
        let mut leave_prompt = false;
        let mut command = None;

        if let Phase::SubmitPrompt { name, error } = &mut self.phase {
            match key.code {
                KeyCode::Enter => {
                    let trimmed = name.trim();
                    if trimmed.is_empty() {
                        *error = Some("Name cannot be empty.".to_string());
                    } else {
                        command = Some(AppCommand::SubmitScore {
                            name: trimmed.to_string(),
                            score,
                        });
                    }
                }
                KeyCode::Esc => leave_prompt = true,
                KeyCode::Backspace => {
                    name.pop();
                }
                KeyCode::Char(c) => {
                    if name.chars().count() < MAX_NAME_LEN {
                        name.push(c);
                    }
                }
                _ => {}
            }
        }

        if leave_prompt {
            self.phase = Phase::Playing;
            self.status = Some(Self::game_over_status(score));
        }
        command
    }

    fn render_overlay(&self, frame: &mut Frame, area: Rect, lines: Vec<Line>) {
        let height = lines.len() as u16 + 3;
        let overlay = centered_rect(44, height, area);
        frame.render_widget(Clear, overlay);
        frame.render_widget(
            Paragraph::new(lines)
                .centered()
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL)),
            overlay,
        );
    }
}

impl View for GameView {
    fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand> {
        if matches!(self.phase, Phase::SubmitPrompt { .. }) {
            return self.handle_submit_key(key);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(AppCommand::Quit),
            KeyCode::Char('l') | KeyCode::Char('L') => Some(AppCommand::OpenLeaderboard),
            code => {
                if let Some(command) = map_game_key(code) {
                    if matches!(command, GameCommand::Restart) {
                        // A restart also discards any partially elapsed tick.
                        self.status = None;
                        self.tick_accumulator = Duration::ZERO;
                    }
                    self.state.handle_command(command, &mut self.rng);
                }
                None
            }
        }
    }

    fn update(&mut self, dt: Duration) {
        if self.state.game_over || self.state.paused {
            self.tick_accumulator = Duration::ZERO;
            return;
        }

        self.tick_accumulator += dt;
        while self.tick_accumulator >= self.tick_interval {
            self.tick_accumulator -= self.tick_interval;
            match self.state.advance(&mut self.rng) {
                TickOutcome::Crashed => {
                    self.on_round_end();
                    break;
                }
                // A full board ends the round through the food path.
                TickOutcome::Ate if self.state.game_over => {
                    self.on_round_end();
                    break;
                }
                _ => {}
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(self.state.maze.rows as u16),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        frame.render_widget(
            Paragraph::new(format!("Score: {}", self.state.score))
                .style(Style::default().add_modifier(Modifier::BOLD)),
            chunks[0],
        );
        frame.render_widget(Paragraph::new(render_grid(&self.state)), chunks[1]);
        if let Some(status) = &self.status {
            frame.render_widget(Paragraph::new(status.as_str()), chunks[2]);
        }
        frame.render_widget(
            Paragraph::new(HELP_TEXT).style(Style::default().fg(Color::DarkGray)),
            chunks[3],
        );

        match &self.phase {
            Phase::SubmitPrompt { name, error } => {
                let mut lines = vec![
                    Line::styled("High Score!", Style::default().add_modifier(Modifier::BOLD)),
                    Line::from(format!("You scored {} points.", self.state.score)),
                    Line::from(format!("Name: {}_", name)),
                ];
                if let Some(error) = error {
                    lines.push(Line::styled(
                        error.clone(),
                        Style::default().fg(Color::Red),
                    ));
                }
                lines.push(Line::styled(
                    "Enter submit · Esc skip",
                    Style::default().fg(Color::DarkGray),
                ));
                self.render_overlay(frame, area, lines);
            }
            Phase::Playing if self.state.game_over => {
                self.render_overlay(
                    frame,
                    area,
                    vec![
                        Line::styled(
                            "GAME OVER",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        ),
                        Line::from(format!("Score: {}", self.state.score)),
                        Line::from("Press R to play again"),
                    ],
                );
            }
            Phase::Playing if self.state.paused => {
                self.render_overlay(
                    frame,
                    area,
                    vec![
                        Line::styled("PAUSED", Style::default().add_modifier(Modifier::BOLD)),
                        Line::from("Press P to resume"),
                    ],
                );
            }
            Phase::Playing => {}
        }
    }
}

fn map_game_key(code: KeyCode) -> Option<GameCommand> {
    match code {
        KeyCode::Up => Some(GameCommand::Turn(Direction::Up)),
        KeyCode::Down => Some(GameCommand::Turn(Direction::Down)),
        KeyCode::Left => Some(GameCommand::Turn(Direction::Left)),
        KeyCode::Right => Some(GameCommand::Turn(Direction::Right)),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameCommand::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameCommand::Restart),
        _ => None,
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
