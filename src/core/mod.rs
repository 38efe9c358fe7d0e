pub mod definitions;
pub mod engine;
pub mod fen;
pub mod game;
pub mod moves;
pub mod piece;
pub mod square;
pub mod utils;
