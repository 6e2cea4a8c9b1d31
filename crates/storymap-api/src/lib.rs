//! Storymap API — HTTP surface for the narrative graph engine.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;
