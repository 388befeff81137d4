//! Game logic: entities, collision, mini-games and the session state machine.

pub mod canvas;
pub mod collision;
pub mod dino;
pub mod grid;
pub mod obstacle;
pub mod paddle;
pub mod session;

pub use canvas::CanvasGame;
pub use collision::{overlaps, Hitbox};
pub use dino::Dinosaur;
pub use grid::GridGame;
pub use obstacle::{Obstacle, ObstacleKind};
pub use paddle::PaddleGame;
pub use session::{Mode, SessionState};
