//! HTTP handlers.

pub mod ai;
pub mod health;
pub mod notes;
