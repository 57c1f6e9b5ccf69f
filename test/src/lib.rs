
pub use helpers::*;
pub use test_player::{AdvanceRecord, TestPlayer, TestPlayers};
