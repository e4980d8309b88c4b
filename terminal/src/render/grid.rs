use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use common::{GameState, Point};

// Two terminal columns per grid cell so the board renders roughly square.
const WALL: &str = "██";
const SNAKE_HEAD: &str = "▓▓";
const SNAKE_BODY: &str = "▒▒";
const FOOD: &str = "()";
const EMPTY: &str = "  ";

/// Render the board to styled text, one line per grid row. The maze is the
/// bottom layer; snake and food are drawn over it.
pub fn render_grid(state: &GameState) -> Text<'static> {
    let head = state.snake.head();
    let mut lines = Vec::with_capacity(state.maze.rows as usize);

    for y in 0..state.maze.rows {
        let mut spans = Vec::with_capacity(state.maze.cols as usize);
        for x in 0..state.maze.cols {
            let p = Point::new(x, y);
            let (symbol, style) = if p == head {
                (
                    SNAKE_HEAD,
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )
            } else if state.snake.contains_point(p) {
                (SNAKE_BODY, Style::default().fg(Color::Green))
            } else if p == state.food {
                (
                    FOOD,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else if state.maze.is_wall(p) {
                (WALL, Style::default().fg(Color::DarkGray))
            } else {
                (EMPTY, Style::default())
            };
            spans.push(Span::styled(symbol, style));
        }
        lines.push(Line::from(spans));
    }

    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{GameState, GRID_COLS, GRID_ROWS};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn one_line_per_row_and_border_is_walls() {
        let mut rng = StdRng::seed_from_u64(5);
        let state = GameState::new(&mut rng);
        let text = render_grid(&state);
        assert_eq!(text.lines.len(), GRID_ROWS as usize);

        let top = &text.lines[0];
        assert_eq!(top.spans.len(), GRID_COLS as usize);
        for span in &top.spans {
            assert_eq!(span.content.as_ref(), WALL);
        }
    }

    #[test]
    fn head_body_and_food_are_drawn() {
        let mut rng = StdRng::seed_from_u64(5);
        let state = GameState::new(&mut rng);
        let text = render_grid(&state);

        let head = state.snake.head();
        let head_span = &text.lines[head.y as usize].spans[head.x as usize];
        assert_eq!(head_span.content.as_ref(), SNAKE_HEAD);

        let food = state.food;
        let food_span = &text.lines[food.y as usize].spans[food.x as usize];
        assert_eq!(food_span.content.as_ref(), FOOD);
    }
}
