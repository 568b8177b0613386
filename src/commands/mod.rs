// commands/mod.rs - Command Module Registry
// This file declares all command modules and provides a centralized registry
// for all bot commands, making them easily accessible from main.rs

pub mod funkwhale;      // Funkwhale playlist search (lazy queue URLs)
pub mod pause;          // Pause/resume playback through the herald
