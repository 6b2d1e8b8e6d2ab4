use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bbox::DEFAULT_PADDING;
use crate::error::ConfigError;

pub const DEFAULT_WIDTH: f64 = 300.0;
pub const DEFAULT_HEIGHT: f64 = 200.0;

/// Horizontal margin the inline canvas leaves around itself.
pub const INLINE_MARGIN: f64 = 60.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub color: String,
    pub width: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
	StrokeStyle {
	    color: String::from("#000"),
	    width: 2.0,
	}
    }
}

/// Size of the capture surface plus the crop padding and stroke look used
/// when the drawing is exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub stroke: StrokeStyle,
}

impl Default for CanvasConfig {
    fn default() -> Self {
	CanvasConfig {
	    width: DEFAULT_WIDTH,
	    height: DEFAULT_HEIGHT,
	    padding: DEFAULT_PADDING,
	    stroke: StrokeStyle::default(),
	}
    }
}

impl CanvasConfig {
    pub fn new(width: f64, height: f64) -> Self {
	CanvasConfig {
	    width,
	    height,
	    ..CanvasConfig::default()
	}.sanitized()
    }

    /// The small canvas embedded in the note composer.
    pub fn inline(screen_width: f64) -> Self {
	CanvasConfig::new(screen_width - INLINE_MARGIN, DEFAULT_HEIGHT)
    }

    /// A canvas covering the screen minus `chrome` (toolbar and status bar).
    pub fn fullscreen(screen_width: f64, screen_height: f64, chrome: f64) -> Self {
	CanvasConfig::new(screen_width, screen_height - chrome)
    }

    /// Replaces unusable values with defaults.
    pub fn sanitized(mut self) -> Self {
	if !(self.width.is_finite() && self.width > 0.0) {
	    self.width = DEFAULT_WIDTH;
	}
	if !(self.height.is_finite() && self.height > 0.0) {
	    self.height = DEFAULT_HEIGHT;
	}
	if !(self.padding.is_finite() && self.padding >= 0.0) {
	    self.padding = DEFAULT_PADDING;
	}
	if !(self.stroke.width.is_finite() && self.stroke.width > 0.0) {
	    self.stroke.width = StrokeStyle::default().width;
	}
	self
    }

    /// Reads a JSON config. A missing or blank file gives the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
	let path = path.as_ref();
	if !path.exists() {
	    debug!("no canvas config at {}, using defaults", path.display());
	    return Ok(CanvasConfig::default());
	}

	let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
	    path: path.to_path_buf(),
	    source,
	})?;
	if content.trim().is_empty() {
	    return Ok(CanvasConfig::default());
	}

	let config: CanvasConfig = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
	    path: path.to_path_buf(),
	    source,
	})?;
	Ok(config.sanitized())
    }
}
