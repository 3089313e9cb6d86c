pub mod battle;
pub mod collision;
pub mod combatant;
pub mod content;
pub mod dungeon;
pub mod game;
pub mod mapfile;
pub mod types;

pub use battle::Battle;
pub use collision::{CollisionIndex, TileEntry};
pub use combatant::{Enemy, Player};
pub use dungeon::{Dungeon, GridLayout, PLAYER_SIZE, PLAYER_VELOCITY};
pub use game::Game;
pub use mapfile::{MapError, MapFile};
pub use types::*;
