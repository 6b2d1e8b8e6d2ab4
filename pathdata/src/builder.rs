use std::fmt::Write;

use crate::types::{Number, Point};

/// Accumulates path text one sample at a time.
///
/// The first valid point pushed writes `M x y`, every later one appends
/// ` L x y`. Invalid points are refused and leave the text untouched, so the
/// text is always either empty or a well formed path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathBuilder {
    text: String,
    last: Option<Point>,
    count: usize,
}

impl PathBuilder {
    pub fn new() -> Self {
	PathBuilder::default()
    }

    /// Appends `point`, returning whether it was written.
    pub fn push(&mut self, point: Point) -> bool {
	if !point.is_valid() {
	    return false;
	}

	let letter = if self.text.is_empty() { 'M' } else { 'L' };
	if !self.text.is_empty() {
	    self.text.push(' ');
	}
	// writing into a String cannot fail
	let _ = write!(self.text, "{} {} {}", letter, Number(point.x), Number(point.y));

	self.last = Some(point);
	self.count += 1;
	true
    }

    pub fn last(&self) -> Option<Point> {
	self.last
    }

    /// Number of commands written so far.
    pub fn len(&self) -> usize {
	self.count
    }

    pub fn is_empty(&self) -> bool {
	self.text.is_empty()
    }

    pub fn as_str(&self) -> &str {
	&self.text
    }

    /// Takes the accumulated text, leaving the builder empty. Returns `None`
    /// when nothing was written.
    pub fn take(&mut self) -> Option<String> {
	let builder = std::mem::take(self);
	builder.finish()
    }

    pub fn finish(self) -> Option<String> {
	if self.text.is_empty() {
	    None
	} else {
	    Some(self.text)
	}
    }
}
