//! Engine for five-in-a-row and its sibling boards: tic-tac-toe,
//! connect four, hex and havannah, plus custom square sizes. Holds the
//! rules, the computer opponent and the save format; rendering and
//! input live with the caller.

pub mod ai;
pub mod board;
pub mod engine;
pub mod havannah;
pub mod hex;
pub mod history;
pub mod patterns;
pub mod rules;
pub mod store;
pub mod types;
pub mod unlocks;

pub use board::{Board, Trial};
pub use engine::GameState;
pub use history::MoveHistory;
pub use rules::{rules_for, RuleSet};
pub use store::{FileStore, MemoryStore, SavedGame, SavedGameStore};
pub use types::{Coord, GameMode, GameSnapshot, Move, Player, Variant, WinKind, WinResult};
pub use unlocks::{FileUnlocks, MemoryUnlocks, UnlockRegistry};
