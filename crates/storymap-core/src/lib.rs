//! Storymap Core — shared domain types and abstractions.
//!
//! This crate defines the event record shape, the error taxonomy, and the
//! traits that the narrative engine and its adapters depend on. It contains
//! no infrastructure code.

pub mod error;
pub mod event;
pub mod repository;
pub mod rng;
