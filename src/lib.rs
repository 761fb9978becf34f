#![no_std]

extern crate alloc;

pub mod config;
pub mod coord;
pub mod error;
pub mod grid;
pub mod grid_trait;
pub mod level;
pub mod locks;
pub mod maze;
pub mod neighborhood;
pub mod observer;
pub mod player;
pub mod raycast;
pub mod reach;
pub mod room;

pub use config::GameConfig;
pub use coord::{Coord2, Vec2};
pub use error::{MazeError, Result};
pub use grid::{Grid, Tile};
pub use grid_trait::Occupancy;
pub use level::{Level, StepEvents};
pub use locks::{
    collect_key, place_lock_pairs, try_traverse, Door, DoorView, Inventory, Key, LockColor,
    LockLayout, Traverse,
};
pub use maze::{generate, generate_with_observer, Maze, MazeConfig};
pub use neighborhood::{Axis, Dir4};
pub use observer::{GenerationObserver, NoOpGenerationObserver};
pub use player::{can_move_to, MoveIntent, MovementConfig, Player};
pub use raycast::{cast_column, cast_ray, project, RayHit, ViewConfig};
pub use reach::{is_connected, path_exists, reachable, reachable_set, Reach};
pub use room::Room;
