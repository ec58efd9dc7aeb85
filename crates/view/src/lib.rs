//! View-state kernel: the authoritative fractal view parameters.
//!
//! # Invariants
//! - All mutations flow through explicit operations; no raw field pokes
//!   from other crates.
//! - Zoom and iteration clamps hold after every operation.
//! - The view is owned by the main thread; other threads talk to it only
//!   through typed commands.

pub mod view;

pub use view::{FractalKind, FractalView, JuliaTween};
pub use view::{BASE_HALF_HEIGHT, MAX_ITERATIONS, MIN_ITERATIONS, MIN_ZOOM, TWEEN_FRAMES};
