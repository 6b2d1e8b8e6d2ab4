//! The `M x y L x y ...` path mini-language used to store freehand strokes.
//!
//! [`PathBuilder`] writes it one sample at a time, [`parse`] reads it back.

mod builder;
mod parse;
mod types;

pub use builder::PathBuilder;
pub use parse::{parse, ParseError};
pub use types::{format_number, Command, Number, PathData, Point};
