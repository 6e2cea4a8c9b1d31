//! Storymap — Narrative graph engine.
//!
//! Builds a per-genre story graph from flat event records, enforces
//! acyclicity, and turns the validated graph into concrete stories: full
//! random walks, length-constrained searches, start-node sampling, and
//! single-step expansion for interactive play.

pub mod application;
pub mod domain;
