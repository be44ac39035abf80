//! Text editing primitives for the post editor.
//!
//! [`BodyBuffer`] holds the multi-line markdown body on a rope;
//! [`LineInput`] backs the single-line fields.

mod buffer;
mod line;

pub use buffer::{BodyBuffer, Cursor, Direction};
pub use line::LineInput;
