//! Padded bounding box of a drawing, used as the crop rectangle when the
//! strokes are rasterized.

use pathdata::Point;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_PADDING: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Box returned when a drawing has no coordinates at all. Never zero
    /// area.
    pub const FALLBACK: BoundingBox = BoundingBox {
	min_x: 0.0,
	min_y: 0.0,
	width: 1.0,
	height: 1.0,
    };

    pub fn max_x(&self) -> f64 {
	self.min_x + self.width
    }

    pub fn max_y(&self) -> f64 {
	self.min_y + self.height
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
	BoundingBox::FALLBACK
    }
}

#[derive(Debug, Clone, Copy)]
struct Extents {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Extents {
    fn empty() -> Self {
	Extents {
	    min_x: f64::INFINITY,
	    min_y: f64::INFINITY,
	    max_x: f64::NEG_INFINITY,
	    max_y: f64::NEG_INFINITY,
	}
    }

    fn include(&mut self, p: Point) {
	self.min_x = self.min_x.min(p.x);
	self.min_y = self.min_y.min(p.y);
	self.max_x = self.max_x.max(p.x);
	self.max_y = self.max_y.max(p.y);
    }

    fn is_empty(&self) -> bool {
	self.min_x > self.max_x || self.min_y > self.max_y
    }
}

/// [`compute_bounding_box_with_padding`] with [`DEFAULT_PADDING`].
pub fn compute_bounding_box<S: AsRef<str>>(strokes: &[S]) -> BoundingBox {
    compute_bounding_box_with_padding(strokes, DEFAULT_PADDING)
}

/// Smallest rectangle holding every coordinate of every stroke, grown by
/// `padding` on each side.
///
/// Strokes whose text does not parse contribute nothing. The origin is
/// clamped to zero but width and height are not, so the padding stays
/// symmetric. A span too large for an `f64` saturates at `f64::MAX`. With no
/// coordinates at all the result is [`BoundingBox::FALLBACK`]. Negative or
/// non-finite padding counts as zero.
pub fn compute_bounding_box_with_padding<S: AsRef<str>>(strokes: &[S], padding: f64) -> BoundingBox {
    let padding = if padding.is_finite() && padding > 0.0 { padding } else { 0.0 };
    let mut extents = Extents::empty();

    for (i, stroke) in strokes.iter().enumerate() {
	match pathdata::parse(stroke.as_ref()) {
	    Ok(data) => data.points().for_each(|p| extents.include(p)),
	    Err(err) => debug!("stroke {} ignored for bounding box: {}", i, err),
	}
    }

    if extents.is_empty() {
	return BoundingBox::FALLBACK;
    }

    BoundingBox {
	min_x: (extents.min_x - padding).max(0.0),
	min_y: (extents.min_y - padding).max(0.0),
	width: ((extents.max_x - extents.min_x) + 2.0 * padding).min(f64::MAX),
	height: ((extents.max_y - extents.min_y) + 2.0 * padding).min(f64::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(min_x: f64, min_y: f64, width: f64, height: f64) -> BoundingBox {
	BoundingBox { min_x, min_y, width, height }
    }

    #[test]
    fn empty_drawing_falls_back() {
	let none: [&str; 0] = [];
	assert_eq!(compute_bounding_box(&none), bbox(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn single_point_is_inflated() {
	assert_eq!(compute_bounding_box_with_padding(&["M 50 50"], 12.0),
		   bbox(38.0, 38.0, 24.0, 24.0));
    }

    #[test]
    fn origin_is_clamped_but_size_is_not() {
	assert_eq!(compute_bounding_box_with_padding(&["M 0 0 L 100 0 L 100 100 L 0 100"], 12.0),
		   bbox(0.0, 0.0, 124.0, 124.0));
    }

    #[test]
    fn default_padding_is_twelve() {
	assert_eq!(compute_bounding_box(&["M 50 50"]), bbox(38.0, 38.0, 24.0, 24.0));
    }

    #[test]
    fn spans_all_strokes() {
	let strokes = ["M 20 30 L 40 35", "M 100 80", "M 60 200 L 55 190"];
	assert_eq!(compute_bounding_box_with_padding(&strokes, 10.0),
		   bbox(10.0, 20.0, 100.0, 190.0));
    }

    #[test]
    fn malformed_strokes_contribute_nothing() {
	let strokes = ["M 10 10 L 500", "garbage", "", "M 20 20"];
	assert_eq!(compute_bounding_box_with_padding(&strokes, 0.0),
		   bbox(20.0, 20.0, 0.0, 0.0));

	let only_bad = ["L 1 2", "M 1 2 Z"];
	assert_eq!(compute_bounding_box(&only_bad), BoundingBox::FALLBACK);
    }

    #[test]
    fn negative_coordinates_clamp_at_zero() {
	assert_eq!(compute_bounding_box_with_padding(&["M -10 -20 L 30 40"], 5.0),
		   bbox(0.0, 0.0, 50.0, 70.0));
    }

    #[test]
    fn huge_coordinates_stay_finite() {
	let b = compute_bounding_box_with_padding(&["M -1e300 -1e300 L 1e300 1e300"], 12.0);
	assert_eq!(b.min_x, 0.0);
	assert!(b.width.is_finite());
	assert!(b.height.is_finite());
	assert!(b.width >= 2e300);
    }

    #[test]
    fn overflowing_span_saturates() {
	let b = compute_bounding_box_with_padding(&["M -1e308 0 L 1.7e308 0"], 12.0);
	assert_eq!(b.width, f64::MAX);
	assert_eq!(b.height, 24.0);
	assert!(b.max_x().is_finite());
    }

    #[test]
    fn bad_padding_counts_as_zero() {
	assert_eq!(compute_bounding_box_with_padding(&["M 5 5"], -3.0), bbox(5.0, 5.0, 0.0, 0.0));
	assert_eq!(compute_bounding_box_with_padding(&["M 5 5"], f64::NAN), bbox(5.0, 5.0, 0.0, 0.0));
	assert_eq!(compute_bounding_box_with_padding(&["M 5 5"], f64::INFINITY), bbox(5.0, 5.0, 0.0, 0.0));
    }

    #[test]
    fn deterministic() {
	let strokes = vec![String::from("M 1.5 2.5 L 3.25 9")];
	assert_eq!(compute_bounding_box(&strokes[..]), compute_bounding_box(&strokes[..]));
    }
}
