use std::collections::HashMap;

use pathdata::{PathBuilder, Point};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::drawing::{Drawing, Stroke};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TouchId(pub u64);

/// Recorder for several simultaneous touches.
///
/// Each touch identifier owns its own in-progress path; all of them commit
/// into one drawing, in release order. Per touch the rules are those of
/// [`StrokeRecorder`](crate::StrokeRecorder).
#[derive(Debug, Clone, Default)]
pub struct TouchRecorder {
    drawing: Drawing,
    active: HashMap<TouchId, PathBuilder>,
}

impl TouchRecorder {
    pub fn new() -> Self {
	TouchRecorder::default()
    }

    pub fn active_touches(&self) -> usize {
	self.active.len()
    }

    pub fn begin_stroke(&mut self, id: TouchId, point: impl Into<Option<Point>>) {
	let mut path = PathBuilder::new();
	match point.into() {
	    Some(p) if path.push(p) => (),
	    p => trace!("touch {:?} started without a valid point: {:?}", id, p),
	}
	if self.active.insert(id, path).is_some() {
	    debug!("touch {:?} restarted, unfinished stroke discarded", id);
	}
    }

    pub fn extend_stroke(&mut self, id: TouchId, point: impl Into<Option<Point>>) {
	let path = match self.active.get_mut(&id) {
	    Some(path) => path,
	    None => {
		trace!("move for unknown touch {:?} ignored", id);
		return;
	    }
	};

	match point.into() {
	    Some(p) if path.push(p) => (),
	    p => trace!("touch {:?} dropped invalid point {:?}", id, p),
	}
    }

    pub fn end_stroke(&mut self, id: TouchId, point: impl Into<Option<Point>>) {
	let mut path = match self.active.remove(&id) {
	    Some(path) => path,
	    None => {
		trace!("release for unknown touch {:?} ignored", id);
		return;
	    }
	};

	if let Some(p) = point.into() {
	    if !path.push(p) {
		trace!("touch {:?} dropped invalid release point {:?}", id, p);
	    }
	}

	match path.finish() {
	    Some(text) => self.drawing.push(Stroke::new(text)),
	    None => debug!("touch {:?} produced no valid point", id),
	}
    }

    /// Abandons one touch without committing it.
    pub fn cancel(&mut self, id: TouchId) {
	self.active.remove(&id);
    }

    pub fn clear(&mut self) {
	self.active.clear();
	self.drawing.clear();
    }

    pub fn strokes(&self) -> &[Stroke] {
	self.drawing.strokes()
    }

    pub fn drawing(&self) -> Drawing {
	self.drawing.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleaved_touches_stay_separate() {
	let (a, b) = (TouchId(1), TouchId(2));
	let mut r = TouchRecorder::new();
	r.begin_stroke(a, Point::new(0.0, 0.0));
	r.begin_stroke(b, Point::new(100.0, 100.0));
	r.extend_stroke(a, Point::new(1.0, 0.0));
	r.extend_stroke(b, Point::new(100.0, 101.0));
	assert_eq!(r.active_touches(), 2);

	r.end_stroke(b, None);
	r.end_stroke(a, Point::new(2.0, 0.0));

	let texts: Vec<&str> = r.strokes().iter().map(Stroke::as_str).collect();
	assert_eq!(texts, vec!["M 100 100 L 100 101", "M 0 0 L 1 0 L 2 0"]);
	assert_eq!(r.active_touches(), 0);
    }

    #[test]
    fn cancel_drops_one_touch() {
	let (a, b) = (TouchId(7), TouchId(8));
	let mut r = TouchRecorder::new();
	r.begin_stroke(a, Point::new(1.0, 1.0));
	r.begin_stroke(b, Point::new(2.0, 2.0));
	r.cancel(a);
	r.end_stroke(a, Point::new(3.0, 3.0));
	r.end_stroke(b, None);
	assert_eq!(r.drawing().to_paths(), vec!["M 2 2"]);
    }

    #[test]
    fn invalid_only_touch_commits_nothing() {
	let mut r = TouchRecorder::new();
	r.begin_stroke(TouchId(1), Point::new(f64::NAN, 0.0));
	r.extend_stroke(TouchId(1), Point::new(0.0, f64::INFINITY));
	r.end_stroke(TouchId(1), None);
	assert!(r.strokes().is_empty());
    }

    #[test]
    fn repeated_release_point_is_kept() {
	let mut r = TouchRecorder::new();
	r.begin_stroke(TouchId(3), Point::new(1.0, 1.0));
	r.extend_stroke(TouchId(3), Point::new(2.0, 2.0));
	r.end_stroke(TouchId(3), Point::new(2.0, 2.0));
	assert_eq!(r.drawing().to_paths(), vec!["M 1 1 L 2 2 L 2 2"]);
    }

    #[test]
    fn invalid_points_are_skipped_per_touch() {
	let mut r = TouchRecorder::new();
	r.begin_stroke(TouchId(1), None);
	r.extend_stroke(TouchId(1), Point::new(f64::NAN, 1.0));
	r.extend_stroke(TouchId(1), Point::new(4.0, 4.0));
	r.extend_stroke(TouchId(1), None);
	r.end_stroke(TouchId(1), Point::new(5.0, f64::INFINITY));
	assert_eq!(r.drawing().to_paths(), vec!["M 4 4"]);
    }

    #[test]
    fn clear_drops_everything() {
	let mut r = TouchRecorder::new();
	r.begin_stroke(TouchId(1), Point::new(1.0, 1.0));
	r.end_stroke(TouchId(1), None);
	r.begin_stroke(TouchId(2), Point::new(1.0, 1.0));
	r.clear();
	assert!(r.strokes().is_empty());
	assert_eq!(r.active_touches(), 0);
    }
}
