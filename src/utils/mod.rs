// utils/mod.rs - Shared Enum Utilities
// Small enum-like helpers used across the pack, re-exported flat.

pub mod league;
pub mod mmchoice;

pub use league::{LeagueRank, LeagueTier};
pub use mmchoice::MMChoice;
