use std::fmt;

use serde::{Deserialize, Serialize};

/// A sampled pointer location. Components are kept at the precision the
/// input device reported them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
	Point { x, y }
    }

    /// Both components finite, i.e. neither NaN nor infinite.
    pub fn is_valid(&self) -> bool {
	self.x.is_finite() && self.y.is_finite()
    }

    /// Returns the point only if it can be written into a path.
    pub fn valid(self) -> Option<Point> {
	if self.is_valid() { Some(self) } else { None }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
	Point::new(x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Move(Point),
    Line(Point),
}

impl Command {
    pub fn point(&self) -> Point {
	match *self {
	    Command::Move(p) | Command::Line(p) => p,
	}
    }

    pub fn letter(&self) -> char {
	match self {
	    Command::Move(_) => 'M',
	    Command::Line(_) => 'L',
	}
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
	let p = self.point();
	write!(f, "{} {} {}", self.letter(), Number(p.x), Number(p.y))
    }
}

/// Writes a coordinate as plain decimal text.
///
/// `f64`'s `Display` never switches to exponent notation and prints the
/// shortest text that reads back to the same value, so `50.0` becomes `50`
/// and `0.1` stays `0.1`.
#[derive(Debug, Clone, Copy)]
pub struct Number(pub f64);

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
	write!(f, "{}", self.0)
    }
}

pub fn format_number(value: f64) -> String {
    Number(value).to_string()
}

///A parsed path: one or more commands, the first of which is always a move.
#[derive(Debug, Clone, PartialEq)]
pub struct PathData(pub(crate) Vec<Command>);

impl PathData {
    pub fn commands(&self) -> &[Command] {
	&self.0
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
	self.0.iter().map(Command::point)
    }

    pub fn len(&self) -> usize {
	self.0.len()
    }

    pub fn is_empty(&self) -> bool {
	self.0.is_empty()
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
	for (i, command) in self.0.iter().enumerate() {
	    if i > 0 {
		f.write_str(" ")?;
	    }
	    write!(f, "{}", command)?;
	}
	Ok(())
    }
}
