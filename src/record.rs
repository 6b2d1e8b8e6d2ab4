use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::drawing::Drawing;
use crate::error::ExportError;

/// The drawing part of a stored note. The raw strokes are always kept so the
/// note stays renderable when no image was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingRecord {
    pub drawing: Drawing,
    #[serde(default)]
    pub drawing_image_uri: Option<String>,
    pub drawing_width: f64,
    pub drawing_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Renderable<'a> {
    Image { uri: &'a str, width: f64, height: f64 },
    Strokes(&'a Drawing),
}

impl DrawingRecord {
    /// Sizes the record from the drawing's crop box, or `1 x 1` when there is
    /// nothing drawn.
    pub fn new(drawing: Drawing, image_uri: Option<String>, padding: f64) -> Self {
	let (drawing_width, drawing_height) = if drawing.is_empty() {
	    (1.0, 1.0)
	} else {
	    let bbox = drawing.bounding_box(padding);
	    (bbox.width, bbox.height)
	};

	DrawingRecord {
	    drawing,
	    drawing_image_uri: image_uri,
	    drawing_width,
	    drawing_height,
	}
    }

    pub fn renderable(&self) -> Renderable<'_> {
	match &self.drawing_image_uri {
	    Some(uri) => Renderable::Image {
		uri,
		width: self.drawing_width,
		height: self.drawing_height,
	    },
	    None => Renderable::Strokes(&self.drawing),
	}
    }

    /// Display size inside a `max_width` x `max_height` slot.
    pub fn display_size(&self, max_width: f64, max_height: f64) -> (f64, f64) {
	fit_within(self.drawing_width, self.drawing_height, max_width, max_height)
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
	Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
	let path = path.as_ref();
	std::fs::write(path, self.to_json()?).map_err(|source| ExportError::Write {
	    path: path.to_path_buf(),
	    source,
	})
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExportError> {
	let path = path.as_ref();
	let content = std::fs::read_to_string(path).map_err(|source| ExportError::ReadFile {
	    path: path.to_path_buf(),
	    source,
	})?;
	Ok(serde_json::from_str(&content)?)
    }
}

/// Scales `width` x `height` down to fit the slot, keeping the aspect ratio
/// and never enlarging. Results are rounded to whole units. Without a usable
/// original size the slot size is returned.
pub fn fit_within(width: f64, height: f64, max_width: f64, max_height: f64) -> (f64, f64) {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if !usable(width) || !usable(height) {
	return (max_width, max_height);
    }

    let scale = (max_width / width).min(max_height / height).min(1.0);
    ((width * scale).round(), (height * scale).round())
}
