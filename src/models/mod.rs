//! All the database models live here.

pub use drawing::*;
pub use game::*;

mod drawing;
mod game;
