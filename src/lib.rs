//! Snake simulation core.
//!
//! A [`game::Game`] owns the snake, its obstacles and fruit, and advances one
//! cell per [`game::Game::tick`]. Rendering, input devices and tick cadence
//! belong to the driver; the engine only exposes state and plain event values.

pub mod config;
pub mod food;
pub mod game;
pub mod input;
pub mod placement;
pub mod snake;
pub mod snapshot;
