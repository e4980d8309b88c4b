use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A grid coordinate. Signed so that an off-grid candidate head (e.g. `x = -1`)
/// is representable before the bounds check rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub fn new(x: i16, y: i16) -> Self {
        Point { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit vector of this direction in grid coordinates (y grows downward).
    pub fn delta(self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    pub body: VecDeque<Point>,
}

impl Snake {
    /// Spawn a snake of `length` segments with the body extending left of `head`.
    pub fn spawn(head: Point, length: usize) -> Self {
        let body = (0..length as i16)
            .map(|i| Point::new(head.x - i, head.y))
            .collect();
        Snake { body }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should not be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Whether any segment, head included, occupies `point`.
    pub fn contains_point(&self, point: Point) -> bool {
        self.body.iter().any(|&p| p == point)
    }

    /// Whether a non-head segment occupies `point`. The head is excluded
    /// because it is about to move off its cell when this is checked.
    pub fn hits_body(&self, point: Point) -> bool {
        self.body.iter().skip(1).any(|&p| p == point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_extends_left_of_head() {
        let snake = Snake::spawn(Point::new(10, 10), 3);
        let body: Vec<Point> = snake.body.iter().copied().collect();
        assert_eq!(
            body,
            vec![Point::new(10, 10), Point::new(9, 10), Point::new(8, 10)]
        );
        assert_eq!(snake.head(), Point::new(10, 10));
    }

    #[test]
    fn hits_body_excludes_head() {
        let snake = Snake::spawn(Point::new(10, 10), 3);
        assert!(!snake.hits_body(Point::new(10, 10)));
        assert!(snake.hits_body(Point::new(9, 10)));
        assert!(snake.contains_point(Point::new(10, 10)));
    }

    #[test]
    fn opposites() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.delta(), (1, 0));
        assert_eq!(Direction::Up.delta(), (0, -1));
    }
}
