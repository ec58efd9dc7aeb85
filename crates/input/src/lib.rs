//! Input vocabulary: raw keyboard/mouse events mapped to shared actions.
//!
//! # Invariants
//! - The same action set serves keyboard bindings and console commands.
//! - This crate never depends on the windowing library; event translation
//!   lives in the application.

pub mod action;

pub use action::{Action, JULIA_PRESETS};
