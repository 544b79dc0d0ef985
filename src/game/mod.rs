// Game layer: tuning, the player simulation and the scene

pub mod config;
pub mod player;
pub mod scene;
