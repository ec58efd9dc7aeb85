//! wgpu render backend: the full-screen fractal pass.
//!
//! All fractal math runs per-pixel in the fragment shader; the CPU side
//! only uploads a small uniform struct each frame.
//!
//! # Invariants
//! - Renderer never mutates view state.
//! - A failed shader override falls back to the embedded shader instead of
//!   aborting.

mod fractal;
mod shaders;

pub use fractal::{FractalRenderer, Uniforms};
pub use shaders::FRACTAL_SHADER;
