pub mod grid;

pub use grid::render_grid;
