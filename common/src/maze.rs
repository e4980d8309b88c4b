use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_OBSTACLE_SIZE, MAX_PLACEMENT_ATTEMPTS, MIN_OBSTACLE_SIZE};
use crate::snake::Point;

/// Static cell state of the obstacle layer. Snake and food are dynamic state
/// layered on top and never baked into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellType {
    Empty,
    Wall,
}

/// A `rows x cols` obstacle grid, row-major. The outer border is always Wall
/// and the protected spawn cell is always Empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    pub rows: i16,
    pub cols: i16,
    cells: Vec<CellType>,
    /// Obstacles actually committed; placement exhaustion can leave this
    /// below the requested count.
    pub obstacles_placed: u32,
}

impl Maze {
    /// Generate a maze: a one-cell wall border plus up to `obstacle_count`
    /// random rectangles of edge length 1..=3, none of which may cover
    /// `protected`. Anchors too close to `protected` are redrawn up to
    /// [`MAX_PLACEMENT_ATTEMPTS`] times; an exhausted obstacle is skipped.
    pub fn generate<R: Rng>(
        rows: i16,
        cols: i16,
        obstacle_count: u32,
        protected: Point,
        rng: &mut R,
    ) -> Self {
        debug_assert!(rows >= 5 && cols >= 5, "grid must admit a border plus interior");

        let mut maze = Maze {
            rows,
            cols,
            cells: vec![CellType::Empty; rows as usize * cols as usize],
            obstacles_placed: 0,
        };

        for r in 0..rows {
            maze.set(Point::new(0, r), CellType::Wall);
            maze.set(Point::new(cols - 1, r), CellType::Wall);
        }
        for c in 0..cols {
            maze.set(Point::new(c, 0), CellType::Wall);
            maze.set(Point::new(c, rows - 1), CellType::Wall);
        }

        for _ in 0..obstacle_count {
            let width = rng.gen_range(MIN_OBSTACLE_SIZE..=MAX_OBSTACLE_SIZE);
            let height = rng.gen_range(MIN_OBSTACLE_SIZE..=MAX_OBSTACLE_SIZE);

            let Some((r, c)) = pick_anchor(rows, cols, width, height, protected, rng) else {
                debug!(
                    "obstacle skipped after {} anchor attempts",
                    MAX_PLACEMENT_ATTEMPTS
                );
                continue;
            };

            for y in 0..height {
                for x in 0..width {
                    let p = Point::new(c + x, r + y);
                    if p == protected {
                        continue;
                    }
                    maze.set(p, CellType::Wall);
                }
            }
            maze.obstacles_placed += 1;
        }

        // The spawn cell stays clear no matter what the obstacles did.
        maze.set(protected, CellType::Empty);

        maze
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.cols && p.y >= 0 && p.y < self.rows
    }

    pub fn cell(&self, p: Point) -> CellType {
        self.cells[self.index(p)]
    }

    /// Out-of-range coordinates are not walls; bounds are the caller's check.
    pub fn is_wall(&self, p: Point) -> bool {
        self.in_bounds(p) && self.cell(p) == CellType::Wall
    }

    fn set(&mut self, p: Point, cell: CellType) {
        let idx = self.index(p);
        self.cells[idx] = cell;
    }

    fn index(&self, p: Point) -> usize {
        p.y as usize * self.cols as usize + p.x as usize
    }
}

/// Draw anchor rows/cols until neither the rectangle's top-left corner nor
/// its `(anchor + size)` offset corner lies within `MAX_OBSTACLE_SIZE + 1`
/// cells of `protected` on both axes. The two-corner check intentionally
/// leaves the rectangle's other extent unchecked.
fn pick_anchor<R: Rng>(
    rows: i16,
    cols: i16,
    width: i16,
    height: i16,
    protected: Point,
    rng: &mut R,
) -> Option<(i16, i16)> {
    let margin = MAX_OBSTACLE_SIZE + 1;
    let max_r = rows - height - 2;
    let max_c = cols - width - 2;

    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let r = if max_r < 1 { 1 } else { rng.gen_range(1..=max_r) };
        let c = if max_c < 1 { 1 } else { rng.gen_range(1..=max_c) };

        let near = |dr: i16, dc: i16| dr.abs() < margin && dc.abs() < margin;
        let top_left_near = near(r - protected.y, c - protected.x);
        let offset_corner_near = near(r + height - protected.y, c + width - protected.x);

        if !top_left_near && !offset_corner_near {
            return Some((r, c));
        }
    }
    None
}
