use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use std::time::Duration;
use tracing::debug;

use crate::score_client::ScoreClient;
use crate::views::{GameView, LeaderboardView, View};

/// Commands bubbled up from views to the app loop.
#[derive(Debug, PartialEq, Eq)]
pub enum AppCommand {
    Quit,
    OpenLeaderboard,
    RefreshLeaderboard,
    BackToGame,
    SubmitScore { name: String, score: u32 },
}

enum Screen {
    Game,
    Leaderboard(Box<LeaderboardView>),
}

pub struct App {
    game: GameView,
    screen: Screen,
    client: ScoreClient,
}

impl App {
    pub fn new(api_url: String, tick_interval: Duration) -> Result<Self> {
        Ok(App {
            game: GameView::new(tick_interval),
            screen: Screen::Game,
            client: ScoreClient::new(api_url)?,
        })
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand> {
        match &mut self.screen {
            Screen::Game => self.game.handle_input(key),
            Screen::Leaderboard(view) => view.handle_input(key),
        }
    }

    pub fn update(&mut self, dt: Duration) {
        if let Screen::Game = self.screen {
            self.game.update(dt);
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        match &self.screen {
            Screen::Game => self.game.render(frame),
            Screen::Leaderboard(view) => view.render(frame),
        }
    }

    pub fn handle_command(&mut self, command: AppCommand) -> Result<()> {
        match command {
            AppCommand::OpenLeaderboard | AppCommand::RefreshLeaderboard => {
                // A round in progress waits while the leaderboard is open.
                self.game.pause();
                self.screen = Screen::Leaderboard(Box::new(LeaderboardView::new(&self.client)));
            }
            AppCommand::BackToGame => {
                self.screen = Screen::Game;
            }
            AppCommand::SubmitScore { name, score } => {
                debug!("submitting score {} for {}", score, name);
                let result = self
                    .client
                    .submit_score(&name, score)
                    .map_err(|e| e.to_string());
                self.game.submission_finished(result);
            }
            AppCommand::Quit => {
                // Handled in main loop
            }
        }
        Ok(())
    }
}
