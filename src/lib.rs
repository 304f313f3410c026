//! Imperium AI - computer players and campaign scripting for a 4X space game

pub mod ai;
pub mod core;
pub mod mission;
pub mod scenario;
pub mod world;
