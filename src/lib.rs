pub mod collision;
pub mod config;
pub mod engine;
pub mod entities;
pub mod error;
pub mod game;
pub mod physics;
pub mod score;
pub mod spawner;
pub mod swarm;
