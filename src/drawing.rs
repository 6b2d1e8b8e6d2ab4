use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::bbox::{self, BoundingBox};

/// One committed stroke: path text beginning with `M`.
///
/// Strokes are immutable once committed. Text produced by the recorder is
/// always well formed; text restored from storage is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stroke(String);

impl Stroke {
    pub(crate) fn new(text: String) -> Self {
	Stroke(text)
    }

    pub fn as_str(&self) -> &str {
	&self.0
    }

    pub fn into_string(self) -> String {
	self.0
    }
}

impl AsRef<str> for Stroke {
    fn as_ref(&self) -> &str {
	&self.0
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
	f.write_str(&self.0)
    }
}

impl From<String> for Stroke {
    fn from(text: String) -> Self {
	Stroke(text)
    }
}

impl From<&str> for Stroke {
    fn from(text: &str) -> Self {
	Stroke(String::from(text))
    }
}

impl From<Stroke> for String {
    fn from(stroke: Stroke) -> Self {
	stroke.0
    }
}

/// Strokes in drawing order, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Drawing {
    strokes: Vec<Stroke>,
}

impl Drawing {
    pub fn new() -> Self {
	Drawing::default()
    }

    pub fn strokes(&self) -> &[Stroke] {
	&self.strokes
    }

    pub fn len(&self) -> usize {
	self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
	self.strokes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stroke> {
	self.strokes.iter()
    }

    pub(crate) fn push(&mut self, stroke: Stroke) {
	self.strokes.push(stroke);
    }

    pub(crate) fn clear(&mut self) {
	self.strokes.clear();
    }

    pub fn bounding_box(&self, padding: f64) -> BoundingBox {
	bbox::compute_bounding_box_with_padding(self.strokes(), padding)
    }

    /// The stroke texts as plain strings, the shape used for storage.
    pub fn to_paths(&self) -> Vec<String> {
	self.strokes.iter().map(|s| s.0.clone()).collect()
    }
}

impl Deref for Drawing {
    type Target = [Stroke];

    fn deref(&self) -> &[Stroke] {
	&self.strokes
    }
}

impl<S: Into<String>> std::iter::FromIterator<S> for Drawing {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
	Drawing {
	    strokes: iter.into_iter().map(|s| Stroke(s.into())).collect(),
	}
    }
}

impl IntoIterator for Drawing {
    type Item = Stroke;
    type IntoIter = std::vec::IntoIter<Stroke>;

    fn into_iter(self) -> Self::IntoIter {
	self.strokes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Drawing {
    type Item = &'a Stroke;
    type IntoIter = std::slice::Iter<'a, Stroke>;

    fn into_iter(self) -> Self::IntoIter {
	self.strokes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_array() {
	let drawing: Drawing = vec!["M 1 2", "M 3 4 L 5 6"].into_iter().collect();
	let json = serde_json::to_string(&drawing).unwrap();
	assert_eq!(json, r#"["M 1 2","M 3 4 L 5 6"]"#);

	let back: Drawing = serde_json::from_str(&json).unwrap();
	assert_eq!(back, drawing);
	assert_eq!(back.to_paths(), vec!["M 1 2", "M 3 4 L 5 6"]);
    }
}
