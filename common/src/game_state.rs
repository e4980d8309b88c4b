use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    FOOD_SCORE, GRID_COLS, GRID_ROWS, INITIAL_OBSTACLE_COUNT, INITIAL_SNAKE_LENGTH,
    MAX_FOOD_ATTEMPTS, RESET_OBSTACLE_COUNT,
};
use crate::maze::Maze;
use crate::snake::{Direction, Point, Snake};

/// Player commands routed into the simulation by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameCommand {
    Turn(Direction),
    TogglePause,
    Restart,
}

/// What a single call to [`GameState::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Paused or game over; the state was not touched.
    Idle,
    /// The snake shifted by one cell.
    Moved,
    /// The snake grew by one cell and the score increased.
    Ate,
    /// A fatal collision; the snake did not move.
    Crashed,
}

/// One round of the game. Constructed fresh per round and replaced wholesale
/// on reset; the controller is the only writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub snake: Snake,
    pub food: Point,
    pub maze: Maze,
    pub direction: Direction,
    pub pending_direction: Direction,
    pub score: u32,
    pub game_over: bool,
    pub paused: bool,
}

impl GameState {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self::with_obstacles(INITIAL_OBSTACLE_COUNT, rng)
    }

    fn with_obstacles<R: Rng>(obstacle_count: u32, rng: &mut R) -> Self {
        let head = Point::new(GRID_COLS / 2, GRID_ROWS / 2);
        let snake = Snake::spawn(head, INITIAL_SNAKE_LENGTH);
        let maze = Maze::generate(GRID_ROWS, GRID_COLS, obstacle_count, head, rng);
        let food =
            pick_food_cell(&maze, &snake, rng).expect("a fresh maze always has a free cell");

        GameState {
            snake,
            food,
            maze,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            score: 0,
            game_over: false,
            paused: false,
        }
    }

    /// Discard the round and start a new one. Restarts use more obstacles
    /// than the very first round.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        *self = Self::with_obstacles(RESET_OBSTACLE_COUNT, rng);
    }

    pub fn set_paused(&mut self, paused: bool) {
        if !self.game_over {
            self.paused = paused;
        }
    }

    /// Apply a player command. Directional input only records a pending
    /// direction; it takes effect at the next tick, last writer wins.
    pub fn handle_command<R: Rng>(&mut self, command: GameCommand, rng: &mut R) {
        match command {
            GameCommand::Restart => self.reset(rng),
            GameCommand::TogglePause => {
                if !self.game_over {
                    self.paused = !self.paused;
                }
            }
            GameCommand::Turn(direction) => {
                if self.game_over {
                    return;
                }
                // Reversing into the neck segment would be instant death.
                if direction != self.direction.opposite() {
                    self.pending_direction = direction;
                }
            }
        }
    }

    /// Advance the simulation by one step. Exactly one of: unchanged but
    /// flagged game-over, grown by one, or shifted by one.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> TickOutcome {
        if self.game_over || self.paused {
            return TickOutcome::Idle;
        }

        self.direction = self.pending_direction;
        let (dx, dy) = self.direction.delta();
        let head = self.snake.head();
        let new_head = Point::new(head.x + dx, head.y + dy);

        let out_of_bounds = new_head.x < 0
            || new_head.x >= self.maze.cols
            || new_head.y < 0
            || new_head.y >= self.maze.rows;
        if out_of_bounds || self.maze.is_wall(new_head) {
            self.game_over = true;
            return TickOutcome::Crashed;
        }

        if self.snake.hits_body(new_head) {
            self.game_over = true;
            return TickOutcome::Crashed;
        }

        self.snake.body.push_front(new_head);

        if new_head == self.food {
            self.score += FOOD_SCORE;
            match pick_food_cell(&self.maze, &self.snake, rng) {
                Some(food) => self.food = food,
                None => {
                    // Nowhere left to grow: the round is complete.
                    debug!("no free cell for food, ending round at score {}", self.score);
                    self.game_over = true;
                }
            }
            TickOutcome::Ate
        } else {
            self.snake.body.pop_back();
            TickOutcome::Moved
        }
    }
}

/// Pick a food cell by rejection sampling over the interior, avoiding walls
/// and the snake. After [`MAX_FOOD_ATTEMPTS`] draws, fall back to a uniform
/// choice over an explicit scan of the free cells; `None` means the board
/// is full.
pub fn pick_food_cell<R: Rng>(maze: &Maze, snake: &Snake, rng: &mut R) -> Option<Point> {
    for _ in 0..MAX_FOOD_ATTEMPTS {
        let p = Point::new(
            rng.gen_range(1..maze.cols - 1),
            rng.gen_range(1..maze.rows - 1),
        );
        if !snake.contains_point(p) && !maze.is_wall(p) {
            return Some(p);
        }
    }

    let free: Vec<Point> = (1..maze.rows - 1)
        .flat_map(|y| (1..maze.cols - 1).map(move |x| Point::new(x, y)))
        .filter(|&p| !snake.contains_point(p) && !maze.is_wall(p))
        .collect();
    if free.is_empty() {
        None
    } else {
        Some(free[rng.gen_range(0..free.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::CellType;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    /// 20x20 border-only maze, snake at (10,10) length 3 facing Right,
    /// food parked out of the way at (1,1).
    fn open_state() -> GameState {
        let mut rng = rng();
        let head = Point::new(10, 10);
        let snake = Snake::spawn(head, INITIAL_SNAKE_LENGTH);
        let maze = Maze::generate(GRID_ROWS, GRID_COLS, 0, head, &mut rng);
        GameState {
            snake,
            food: Point::new(1, 1),
            maze,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            score: 0,
            game_over: false,
            paused: false,
        }
    }

    fn body_of(state: &GameState) -> Vec<Point> {
        state.snake.body.iter().copied().collect()
    }

    #[test]
    fn fresh_round_invariants() {
        let mut rng = rng();
        let state = GameState::new(&mut rng);
        assert_eq!(state.snake.len(), INITIAL_SNAKE_LENGTH);
        assert_eq!(state.snake.head(), Point::new(GRID_COLS / 2, GRID_ROWS / 2));
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert!(!state.game_over);
        assert!(!state.paused);
        assert!(!state.maze.is_wall(state.food));
        assert!(!state.snake.contains_point(state.food));
    }

    #[test]
    fn plain_move_shifts_by_one() {
        // Scenario A: first tick with no pending change lands on (11,10).
        let mut state = open_state();
        let mut rng = rng();
        assert_eq!(state.advance(&mut rng), TickOutcome::Moved);
        assert_eq!(
            body_of(&state),
            vec![Point::new(11, 10), Point::new(10, 10), Point::new(9, 10)]
        );
        assert_eq!(state.score, 0);
        assert!(!state.game_over);
    }

    #[test]
    fn eating_grows_and_scores() {
        // Scenario B: head adjacent to food.
        let mut state = open_state();
        state.food = Point::new(11, 10);
        let mut rng = rng();
        assert_eq!(state.advance(&mut rng), TickOutcome::Ate);
        assert_eq!(state.score, FOOD_SCORE);
        assert_eq!(state.snake.len(), INITIAL_SNAKE_LENGTH + 1);
        assert_eq!(state.snake.head(), Point::new(11, 10));
        assert!(!state.maze.is_wall(state.food));
        assert!(!state.snake.contains_point(state.food));
    }

    #[test]
    fn no_food_means_no_growth_and_no_score() {
        let mut state = open_state();
        let mut rng = rng();
        for _ in 0..5 {
            assert_eq!(state.advance(&mut rng), TickOutcome::Moved);
            assert_eq!(state.snake.len(), INITIAL_SNAKE_LENGTH);
            assert_eq!(state.score, 0);
        }
    }

    #[test]
    fn reversal_is_ignored() {
        // Scenario C: facing Right, requesting Left still moves Right.
        let mut state = open_state();
        let mut rng = rng();
        state.handle_command(GameCommand::Turn(Direction::Left), &mut rng);
        assert_eq!(state.pending_direction, Direction::Right);
        assert_eq!(state.advance(&mut rng), TickOutcome::Moved);
        assert_eq!(state.snake.head(), Point::new(11, 10));
        assert_eq!(state.direction, Direction::Right);
    }

    #[test]
    fn last_valid_turn_wins() {
        let mut state = open_state();
        let mut rng = rng();
        state.handle_command(GameCommand::Turn(Direction::Up), &mut rng);
        state.handle_command(GameCommand::Turn(Direction::Down), &mut rng);
        state.advance(&mut rng);
        assert_eq!(state.direction, Direction::Down);
        assert_eq!(state.snake.head(), Point::new(10, 11));
    }

    #[test]
    fn out_of_bounds_ends_round() {
        // Scenario D: moving off the left edge.
        let mut state = open_state();
        state.snake = Snake::spawn(Point::new(0, 10), 1);
        state.direction = Direction::Left;
        state.pending_direction = Direction::Left;
        let before = body_of(&state);
        let mut rng = rng();
        assert_eq!(state.advance(&mut rng), TickOutcome::Crashed);
        assert!(state.game_over);
        assert_eq!(body_of(&state), before);
    }

    #[test]
    fn wall_collision_ends_round() {
        let mut state = open_state();
        state.snake = Snake::spawn(Point::new(2, 10), 1);
        state.direction = Direction::Left;
        state.pending_direction = Direction::Left;
        let mut rng = rng();
        state.advance(&mut rng); // (1,10)
        let before = body_of(&state);
        assert_eq!(state.maze.cell(Point::new(0, 10)), CellType::Wall);
        assert_eq!(state.advance(&mut rng), TickOutcome::Crashed);
        assert!(state.game_over);
        assert_eq!(body_of(&state), before);
    }

    #[test]
    fn self_collision_ends_round() {
        let mut state = open_state();
        // A hook shape: moving Down from the head runs into the body.
        state.snake = Snake {
            body: [
                Point::new(10, 10),
                Point::new(10, 11),
                Point::new(11, 11),
                Point::new(11, 10),
            ]
            .into_iter()
            .collect(),
        };
        state.direction = Direction::Down;
        state.pending_direction = Direction::Down;
        let before = body_of(&state);
        let mut rng = rng();
        assert_eq!(state.advance(&mut rng), TickOutcome::Crashed);
        assert!(state.game_over);
        assert_eq!(body_of(&state), before);
    }

    #[test]
    fn pause_toggle_is_idempotent_and_blocks_ticks() {
        let mut state = open_state();
        let mut rng = rng();
        state.handle_command(GameCommand::TogglePause, &mut rng);
        assert!(state.paused);

        let snapshot = state.clone();
        assert_eq!(state.advance(&mut rng), TickOutcome::Idle);
        assert_eq!(state, snapshot);

        state.handle_command(GameCommand::TogglePause, &mut rng);
        assert!(!state.paused);
    }

    #[test]
    fn game_over_blocks_everything_but_restart() {
        let mut state = open_state();
        state.game_over = true;
        let mut rng = rng();

        let snapshot = state.clone();
        assert_eq!(state.advance(&mut rng), TickOutcome::Idle);
        assert_eq!(state, snapshot);

        state.handle_command(GameCommand::TogglePause, &mut rng);
        assert!(!state.paused);
        state.handle_command(GameCommand::Turn(Direction::Up), &mut rng);
        assert_eq!(state.pending_direction, snapshot.pending_direction);

        state.handle_command(GameCommand::Restart, &mut rng);
        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), INITIAL_SNAKE_LENGTH);
    }

    #[test]
    fn restart_allowed_mid_round() {
        let mut state = open_state();
        let mut rng = rng();
        state.advance(&mut rng);
        state.score = 30;
        state.handle_command(GameCommand::Restart, &mut rng);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.head(), Point::new(GRID_COLS / 2, GRID_ROWS / 2));
    }

    #[test]
    fn food_never_lands_on_wall_or_snake() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let head = Point::new(10, 10);
            let snake = Snake::spawn(head, INITIAL_SNAKE_LENGTH);
            let maze = Maze::generate(GRID_ROWS, GRID_COLS, 7, head, &mut rng);
            let food = pick_food_cell(&maze, &snake, &mut rng).unwrap();
            assert!(!maze.is_wall(food));
            assert!(!snake.contains_point(food));
        }
    }

    #[test]
    fn food_placement_on_full_board_returns_none() {
        let mut rng = rng();
        let head = Point::new(2, 2);
        let maze = Maze::generate(5, 5, 0, head, &mut rng);
        // Snake covering the entire 3x3 interior.
        let snake = Snake {
            body: (1..4)
                .flat_map(|y| (1..4).map(move |x| Point::new(x, y)))
                .collect(),
        };
        assert_eq!(pick_food_cell(&maze, &snake, &mut rng), None);
    }

    #[test]
    fn food_placement_scans_crowded_boards() {
        let mut rng = rng();
        let head = Point::new(2, 2);
        let maze = Maze::generate(5, 5, 0, head, &mut rng);
        // Every interior cell but one is occupied.
        let snake = Snake {
            body: (1..4)
                .flat_map(|y| (1..4).map(move |x| Point::new(x, y)))
                .filter(|&p| p != Point::new(3, 3))
                .collect(),
        };
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(
                pick_food_cell(&maze, &snake, &mut rng),
                Some(Point::new(3, 3))
            );
        }
    }
}
