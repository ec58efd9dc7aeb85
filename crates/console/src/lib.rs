//! Console control surface: a detached stdin reader feeding typed commands
//! to the render loop over a channel.
//!
//! # Invariants
//! - The reader thread never touches view state; it only parses and sends.
//! - The render loop drains the channel once per frame, so commands apply
//!   between frames, never mid-draw.

pub mod command;
pub mod reader;

pub use command::{ConsoleCommand, ParseError, parse_line, HELP_TEXT};
pub use reader::spawn_reader;
