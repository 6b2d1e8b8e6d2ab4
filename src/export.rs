use std::path::Path;

use nom::{Finish, IResult, Parser, character::complete::{char, multispace0}, combinator::{all_consuming, opt}, error::Error, multi::many_m_n, number::complete::double, sequence::{
	preceded,
	delimited
}};
use pathdata::format_number;
use serde::{Deserialize, Serialize};
use svg::Document;
use svg::node::element::Path as PathElement;
use svg::node::element::tag;
use svg::parser::Event;
use tracing::{debug, warn};

use crate::bbox::BoundingBox;
use crate::config::{CanvasConfig, StrokeStyle};
use crate::drawing::Drawing;
use crate::error::ExportError;

/// What an external renderer needs to produce a cropped bitmap of a drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterRequest {
    pub paths: Vec<String>,
    pub view_box_min_x: f64,
    pub view_box_min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl RasterRequest {
    pub fn new(drawing: &Drawing, padding: f64) -> Self {
	RasterRequest::with_box(drawing, drawing.bounding_box(padding))
    }

    pub fn with_box(drawing: &Drawing, bbox: BoundingBox) -> Self {
	RasterRequest {
	    paths: drawing.to_paths(),
	    view_box_min_x: bbox.min_x,
	    view_box_min_y: bbox.min_y,
	    width: bbox.width,
	    height: bbox.height,
	}
    }

    pub fn is_empty(&self) -> bool {
	self.paths.is_empty()
    }

    pub fn bounding_box(&self) -> BoundingBox {
	BoundingBox {
	    min_x: self.view_box_min_x,
	    min_y: self.view_box_min_y,
	    width: self.width,
	    height: self.height,
	}
    }

    pub fn view_box(&self) -> String {
	ViewBox::from(self.bounding_box()).to_string()
    }

    /// A standalone SVG whose view box is the crop rectangle, sized one unit
    /// per pixel.
    pub fn to_document(&self, style: &StrokeStyle) -> Document {
	let document = Document::new()
	    .set("viewBox", self.view_box())
	    .set("width", format_number(self.width))
	    .set("height", format_number(self.height));

	self.paths.iter().fold(document, |doc, d| doc.add(stroke_element(d, style)))
    }

    pub fn save_svg(&self, path: impl AsRef<Path>, style: &StrokeStyle) -> Result<(), ExportError> {
	let path = path.as_ref();
	svg::save(path, &self.to_document(style)).map_err(|source| ExportError::Write {
	    path: path.to_path_buf(),
	    source,
	})?;
	debug!("wrote {} strokes to {}", self.paths.len(), path.display());
	Ok(())
    }
}

fn stroke_element(d: &str, style: &StrokeStyle) -> PathElement {
    PathElement::new()
	.set("fill", "none")
	.set("stroke", style.color.as_str())
	.set("stroke-width", format_number(style.width))
	.set("d", d)
}

/// The whole capture surface, uncropped.
pub fn canvas_document(drawing: &Drawing, config: &CanvasConfig) -> Document {
    let view_box = ViewBox { x: 0.0, y: 0.0, width: config.width, height: config.height };
    let document = Document::new()
	.set("viewBox", view_box.to_string())
	.set("width", format_number(config.width))
	.set("height", format_number(config.height));

    drawing.iter().fold(document, |doc, stroke| doc.add(stroke_element(stroke.as_str(), &config.stroke)))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<BoundingBox> for ViewBox {
    fn from(b: BoundingBox) -> Self {
	ViewBox { x: b.min_x, y: b.min_y, width: b.width, height: b.height }
    }
}

impl From<ViewBox> for BoundingBox {
    fn from(v: ViewBox) -> Self {
	BoundingBox { min_x: v.x, min_y: v.y, width: v.width, height: v.height }
    }
}

impl std::fmt::Display for ViewBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
	write!(f, "{} {} {} {}",
	       format_number(self.x),
	       format_number(self.y),
	       format_number(self.width),
	       format_number(self.height))
    }
}

fn separator(s: &str) -> IResult<&str, Option<char>> {
    delimited(multispace0, opt(char(',')), multispace0)(s)
}

fn view_box_numbers(s: &str) -> IResult<&str, (f64, Vec<f64>)> {
    all_consuming(delimited(multispace0,
			    double.and(many_m_n(3, 3, preceded(separator, double))),
			    multispace0))(s)
}

impl std::str::FromStr for ViewBox {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
	let err = || ExportError::ViewBox(String::from(s));

	let (_, (x, rest)) = view_box_numbers(s)
	    .finish()
	    .map_err(|_: Error<&str>| err())?;
	let view_box = ViewBox { x, y: rest[0], width: rest[1], height: rest[2] };

	let finite = [view_box.x, view_box.y, view_box.width, view_box.height]
	    .iter()
	    .all(|v| v.is_finite());
	if !finite || view_box.width < 0.0 || view_box.height < 0.0 {
	    return Err(err());
	}

	Ok(view_box)
    }
}

/// Strokes and crop rectangle read back from an exported SVG.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedSketch {
    pub drawing: Drawing,
    pub view_box: Option<ViewBox>,
}

/// Collects the `d` attribute of every `<path>` in document order. Paths
/// that are not valid stroke text are skipped.
pub fn import_svg(content: &str) -> Result<ImportedSketch, ExportError> {
    let parser = svg::read(content).map_err(ExportError::Read)?;

    let mut strokes = Vec::new();
    let mut view_box = None;

    for event in parser {
	match event {
	    Event::Tag(tag::SVG, tag::Type::Start, attributes) => {
		if let Some(vb) = attributes.get("viewBox") {
		    view_box = Some(vb.parse::<ViewBox>()?);
		}
	    },
	    Event::Tag(tag::Path, _, attributes) => {
		let data_raw = match attributes.get("d") {
		    Some(d) => d,
		    None => {
			warn!("path without data skipped");
			continue;
		    }
		};

		match pathdata::parse(data_raw) {
		    Ok(_) => strokes.push(data_raw.to_string()),
		    Err(err) => warn!("path {} skipped: {}", strokes.len(), err),
		}
	    },
	    Event::Error(err) => return Err(ExportError::Malformed(err.to_string())),
	    _ => (),
	}
    }

    Ok(ImportedSketch {
	drawing: strokes.into_iter().collect(),
	view_box,
    })
}

pub fn import_svg_file(path: impl AsRef<Path>) -> Result<ImportedSketch, ExportError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ExportError::ReadFile {
	path: path.to_path_buf(),
	source,
    })?;
    import_svg(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drawing(paths: &[&str]) -> Drawing {
	paths.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn request_carries_crop_box() {
	let request = RasterRequest::new(&drawing(&["M 50 50"]), 12.0);
	assert_eq!(request.paths, vec!["M 50 50"]);
	assert_eq!(request.view_box(), "38 38 24 24");
	assert_eq!((request.width, request.height), (24.0, 24.0));
    }

    #[test]
    fn request_json_field_names() {
	let request = RasterRequest::new(&drawing(&["M 0 0 L 100 0 L 100 100 L 0 100"]), 12.0);
	let json = serde_json::to_value(&request).unwrap();
	assert_eq!(json["viewBoxMinX"], 0.0);
	assert_eq!(json["viewBoxMinY"], 0.0);
	assert_eq!(json["width"], 124.0);
	assert_eq!(json["height"], 124.0);
	assert_eq!(json["paths"][0], "M 0 0 L 100 0 L 100 100 L 0 100");
    }

    #[test]
    fn empty_drawing_gets_fallback_box() {
	let request = RasterRequest::new(&Drawing::new(), 12.0);
	assert!(request.is_empty());
	assert_eq!(request.bounding_box(), BoundingBox::FALLBACK);
    }

    #[test]
    fn document_round_trips_through_import() {
	let original = drawing(&["M 10 10 L 20 25.5", "M 30 40"]);
	let request = RasterRequest::new(&original, 12.0);
	let text = request.to_document(&StrokeStyle::default()).to_string();
	assert!(text.contains(r##"stroke="#000""##), "{}", text);
	assert!(text.contains(r#"fill="none""#), "{}", text);

	let imported = import_svg(&text).unwrap();
	assert_eq!(imported.drawing, original);
	assert_eq!(imported.view_box.map(BoundingBox::from), Some(request.bounding_box()));
    }

    #[test]
    fn canvas_document_uses_config_size() {
	let config = CanvasConfig::new(330.0, 200.0);
	let text = canvas_document(&drawing(&["M 1 1"]), &config).to_string();
	assert!(text.contains(r#"viewBox="0 0 330 200""#), "{}", text);

	let imported = import_svg(&text).unwrap();
	assert_eq!(imported.drawing.to_paths(), vec!["M 1 1"]);
    }

    #[test]
    fn import_skips_foreign_paths() {
	let text = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0, 0, 10, 10">
	    <path d="M 1 1 L 2 2"/>
	    <path d="M 0 0 C 1 1 2 2 3 3"/>
	    <path fill="red"/>
	    <path d="M 5 5"/>
	</svg>"#;
	let imported = import_svg(text).unwrap();
	assert_eq!(imported.drawing.to_paths(), vec!["M 1 1 L 2 2", "M 5 5"]);
	assert_eq!(imported.view_box, Some(ViewBox { x: 0.0, y: 0.0, width: 10.0, height: 10.0 }));
    }

    #[test]
    fn view_box_parsing() {
	assert_eq!("1 2 3 4".parse::<ViewBox>().unwrap(),
		   ViewBox { x: 1.0, y: 2.0, width: 3.0, height: 4.0 });
	assert_eq!(" -1.5,2 , 3 4 ".parse::<ViewBox>().unwrap(),
		   ViewBox { x: -1.5, y: 2.0, width: 3.0, height: 4.0 });
	assert!("1 2 3".parse::<ViewBox>().is_err());
	assert!("1 2 3 4 5".parse::<ViewBox>().is_err());
	assert!("1 2 -3 4".parse::<ViewBox>().is_err());
	assert!("a b c d".parse::<ViewBox>().is_err());
    }
}
