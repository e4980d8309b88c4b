mod constants;
mod game_state;
mod maze;
mod snake;

pub mod score;

pub use constants::*;
pub use game_state::*;
pub use maze::*;
pub use snake::*;
