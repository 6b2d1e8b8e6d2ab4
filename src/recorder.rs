use std::fmt;

use pathdata::{PathBuilder, Point};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use crate::bbox::BoundingBox;
use crate::config::CanvasConfig;
use crate::drawing::{Drawing, Stroke};
use crate::export::RasterRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Start,
    Move,
    End,
}

/// One sample from the pointer layer. A missing point, or one whose
/// coordinates are missing or not numbers, is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    pub kind: EventKind,
    #[serde(default, deserialize_with = "lenient_point")]
    pub point: Option<Point>,
}

impl GestureEvent {
    pub fn start(point: impl Into<Option<Point>>) -> Self {
	GestureEvent { kind: EventKind::Start, point: point.into() }
    }

    pub fn moved(point: impl Into<Option<Point>>) -> Self {
	GestureEvent { kind: EventKind::Move, point: point.into() }
    }

    pub fn end(point: impl Into<Option<Point>>) -> Self {
	GestureEvent { kind: EventKind::End, point: point.into() }
    }
}

fn lenient_point<'de, D>(deserializer: D) -> Result<Option<Point>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let coordinate = |key: &str| raw.get(key).and_then(Value::as_f64);
    Ok(coordinate("x").zip(coordinate("y")).map(|(x, y)| Point::new(x, y)))
}

///Called with the committed strokes whenever they change.
pub struct ChangeFn<'a>(
    Box<dyn FnMut(&[Stroke]) + 'a>
);

impl <'a, F> From<F> for ChangeFn<'a>
where F: FnMut(&[Stroke]) + 'a
{
    fn from(f: F) -> Self {
	ChangeFn(Box::new(f))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Gesture {
    Idle,
    Active(PathBuilder),
}

/// Turns pointer gestures into strokes and keeps the strokes committed so
/// far.
///
/// A gesture runs from [`begin_stroke`](Self::begin_stroke) to
/// [`end_stroke`](Self::end_stroke). The first valid point of a gesture,
/// whichever event carries it, opens the path with `M`; every later valid
/// point adds an `L`. Invalid points are dropped. A gesture that saw no valid
/// point commits nothing. None of these operations fail.
pub struct StrokeRecorder<'a> {
    config: CanvasConfig,
    drawing: Drawing,
    gesture: Gesture,
    on_change: Option<ChangeFn<'a>>,
}

impl<'a> fmt::Debug for StrokeRecorder<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
	f.debug_struct("StrokeRecorder")
	    .field("config", &self.config)
	    .field("drawing", &self.drawing)
	    .field("gesture", &self.gesture)
	    .field("on_change", &self.on_change.is_some())
	    .finish()
    }
}

impl<'a> Default for StrokeRecorder<'a> {
    fn default() -> Self {
	StrokeRecorder::new(CanvasConfig::default())
    }
}

impl<'a> StrokeRecorder<'a> {
    pub fn new(config: CanvasConfig) -> Self {
	StrokeRecorder {
	    config: config.sanitized(),
	    drawing: Drawing::new(),
	    gesture: Gesture::Idle,
	    on_change: None,
	}
    }

    /// Opens an editor on a saved drawing. The strokes are copied.
    pub fn with_strokes<I, S>(config: CanvasConfig, strokes: I) -> Self
    where
	I: IntoIterator<Item = S>,
	S: Into<String>,
    {
	let mut recorder = StrokeRecorder::new(config);
	recorder.drawing = strokes.into_iter().collect();
	recorder
    }

    pub fn config(&self) -> &CanvasConfig {
	&self.config
    }

    pub fn on_change(&mut self, f: impl Into<ChangeFn<'a>>) {
	self.on_change = Some(f.into());
    }

    pub fn is_active(&self) -> bool {
	matches!(self.gesture, Gesture::Active(_))
    }

    /// Text of the stroke being drawn, for live display. `None` when idle or
    /// before the gesture produced a valid point.
    pub fn current_path(&self) -> Option<&str> {
	match &self.gesture {
	    Gesture::Active(path) if !path.is_empty() => Some(path.as_str()),
	    _ => None,
	}
    }

    pub fn begin_stroke(&mut self, point: impl Into<Option<Point>>) {
	if let Gesture::Active(orphan) = &self.gesture {
	    debug!("new gesture discards unfinished stroke of {} points", orphan.len());
	}

	let mut path = PathBuilder::new();
	match point.into() {
	    Some(p) if path.push(p) => (),
	    p => trace!("gesture started without a valid point: {:?}", p),
	}
	self.gesture = Gesture::Active(path);
    }

    pub fn extend_stroke(&mut self, point: impl Into<Option<Point>>) {
	let path = match &mut self.gesture {
	    Gesture::Active(path) => path,
	    Gesture::Idle => {
		trace!("move outside of a gesture ignored");
		return;
	    }
	};

	match point.into() {
	    Some(p) if path.push(p) => (),
	    p => trace!("dropped invalid point {:?}", p),
	}
    }

    /// Finishes the gesture. A valid final point is always appended, even
    /// when it repeats the last recorded point. The stroke is committed only
    /// if it holds at least one point.
    pub fn end_stroke(&mut self, point: impl Into<Option<Point>>) {
	let mut path = match std::mem::replace(&mut self.gesture, Gesture::Idle) {
	    Gesture::Active(path) => path,
	    Gesture::Idle => {
		trace!("release outside of a gesture ignored");
		return;
	    }
	};

	if let Some(p) = point.into() {
	    if !path.push(p) {
		trace!("dropped invalid release point {:?}", p);
	    }
	}

	match path.finish() {
	    Some(text) => {
		debug!("committed stroke {}: {}", self.drawing.len(), text);
		self.drawing.push(Stroke::new(text));
		self.notify();
	    },
	    None => debug!("discarded empty stroke"),
	}
    }

    pub fn handle(&mut self, event: GestureEvent) {
	match event.kind {
	    EventKind::Start => self.begin_stroke(event.point),
	    EventKind::Move => self.extend_stroke(event.point),
	    EventKind::End => self.end_stroke(event.point),
	}
    }

    /// Committed strokes, oldest first.
    pub fn strokes(&self) -> &[Stroke] {
	self.drawing.strokes()
    }

    /// A detached copy of the committed strokes.
    pub fn drawing(&self) -> Drawing {
	self.drawing.clone()
    }

    pub fn into_drawing(self) -> Drawing {
	self.drawing
    }

    /// Drops every stroke, including one in progress.
    pub fn clear(&mut self) {
	self.drawing.clear();
	self.gesture = Gesture::Idle;
	self.notify();
    }

    /// Replaces the committed strokes with a copy of `strokes`. Any gesture
    /// in progress is abandoned.
    pub fn load_strokes<I, S>(&mut self, strokes: I)
    where
	I: IntoIterator<Item = S>,
	S: Into<String>,
    {
	self.drawing = strokes.into_iter().collect();
	self.gesture = Gesture::Idle;
	self.notify();
    }

    pub fn bounding_box(&self) -> BoundingBox {
	self.drawing.bounding_box(self.config.padding)
    }

    pub fn raster_request(&self) -> RasterRequest {
	RasterRequest::new(&self.drawing, self.config.padding)
    }

    fn notify(&mut self) {
	if let Some(f) = &mut self.on_change {
	    (f.0)(self.drawing.strokes());
	}
    }
}
