mod cell;
mod controller;
mod engine;
mod grid;

pub use cell::Cell;
pub use controller::{Controller, Tick};
pub use engine::Engine;
