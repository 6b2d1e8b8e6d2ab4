//! Freehand stroke capture for sketch notes.
//!
//! [`StrokeRecorder`] turns pointer gestures into path strings
//! (`M x y L x y ...`) and keeps the committed strokes of one drawing.
//! [`compute_bounding_box`] derives the padded crop rectangle used to
//! rasterize a drawing, and [`RasterRequest`] / [`DrawingRecord`] are the
//! shapes handed to the renderer and to note storage.

pub mod bbox;
pub mod config;
pub mod drawing;
pub mod error;
pub mod export;
pub mod logging;
pub mod record;
pub mod recorder;
pub mod touch;

pub use pathdata::{ParseError, PathData, Point};

pub use bbox::{compute_bounding_box, compute_bounding_box_with_padding, BoundingBox, DEFAULT_PADDING};
pub use config::{CanvasConfig, StrokeStyle};
pub use drawing::{Drawing, Stroke};
pub use error::{ConfigError, ExportError};
pub use export::{canvas_document, import_svg, ImportedSketch, RasterRequest, ViewBox};
pub use record::{fit_within, DrawingRecord, Renderable};
pub use recorder::{ChangeFn, EventKind, GestureEvent, StrokeRecorder};
pub use touch::{TouchId, TouchRecorder};
