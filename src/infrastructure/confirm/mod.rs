//! Infrastructure implementations for Confirmer
//!
//! This module provides concrete implementations of the `Confirmer` trait.

mod line;
mod terminal;

pub use line::{parse_answer, LineConfirmer, MAX_INPUT_FAILURES};
pub use terminal::TerminalConfirmer;
