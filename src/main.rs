//! Replays recorded gesture streams through the stroke recorder.
//!
//! Usage:
//!   note-sketch replay <events.json> [--config <cfg.json>] [--svg <out.svg>] [--record <out.json>] [--debug]
//!   note-sketch bbox <record.json> [--padding <n>]

use std::{env, fs, path::PathBuf, process::ExitCode};

use anyhow::{anyhow, bail, Context, Result};
use tracing::{debug, info};

use note_sketch::{logging, CanvasConfig, DrawingRecord, EventKind, GestureEvent, StrokeRecorder, DEFAULT_PADDING};

const USAGE: &str = "\
Usage:
  note-sketch replay <EVENTS> [--config <FILE>] [--svg <FILE>] [--record <FILE>] [--debug]
  note-sketch bbox <RECORD> [--padding <N>]

EVENTS is a JSON array of {\"kind\": \"start|move|end\", \"point\": {\"x\": .., \"y\": ..}}.
RECORD is a note drawing record as written by `replay --record`.";

#[derive(Debug, Default)]
struct ReplayArgs {
    events: PathBuf,
    config: Option<PathBuf>,
    svg: Option<PathBuf>,
    record: Option<PathBuf>,
    debug: bool,
}

#[derive(Debug)]
enum Action {
    Replay(ReplayArgs),
    Bbox { record: PathBuf, padding: f64 },
    Help,
}

fn value_of(flag: &str, args: &mut impl Iterator<Item = String>) -> Result<String> {
    args.next().ok_or_else(|| anyhow!("missing value for {}", flag))
}

fn parse_args(args: Vec<String>) -> Result<Action> {
    let mut args = args.into_iter();

    match args.next().as_deref() {
	Some("replay") => {
	    let mut replay = ReplayArgs::default();
	    let mut events = None;
	    while let Some(arg) = args.next() {
		match arg.as_str() {
		    "--config" => replay.config = Some(value_of(&arg, &mut args)?.into()),
		    "--svg" => replay.svg = Some(value_of(&arg, &mut args)?.into()),
		    "--record" => replay.record = Some(value_of(&arg, &mut args)?.into()),
		    "--debug" => replay.debug = true,
		    other if events.is_none() && !other.starts_with("--") => events = Some(PathBuf::from(other)),
		    other => bail!("unexpected argument '{}'\n\n{}", other, USAGE),
		}
	    }
	    replay.events = events.ok_or_else(|| anyhow!("missing events file\n\n{}", USAGE))?;
	    Ok(Action::Replay(replay))
	},
	Some("bbox") => {
	    let mut record = None;
	    let mut padding = DEFAULT_PADDING;
	    while let Some(arg) = args.next() {
		match arg.as_str() {
		    "--padding" => {
			let raw = value_of(&arg, &mut args)?;
			padding = raw.parse().with_context(|| format!("invalid padding '{}'", raw))?;
		    },
		    other if record.is_none() && !other.starts_with("--") => record = Some(PathBuf::from(other)),
		    other => bail!("unexpected argument '{}'\n\n{}", other, USAGE),
		}
	    }
	    let record = record.ok_or_else(|| anyhow!("missing record file\n\n{}", USAGE))?;
	    Ok(Action::Bbox { record, padding })
	},
	Some("-h") | Some("--help") | None => Ok(Action::Help),
	Some(other) => bail!("unknown command '{}'\n\n{}", other, USAGE),
    }
}

fn replay(args: ReplayArgs) -> Result<()> {
    logging::init(args.debug);

    let config = match &args.config {
	Some(path) => CanvasConfig::load(path)?,
	None => CanvasConfig::default(),
    };
    debug!("canvas {}x{}, padding {}", config.width, config.height, config.padding);

    let content = fs::read_to_string(&args.events)
	.with_context(|| format!("read events file {}", args.events.display()))?;
    let events: Vec<GestureEvent> = serde_json::from_str(&content)
	.with_context(|| format!("parse events file {}", args.events.display()))?;

    let mut recorder = StrokeRecorder::new(config);
    for event in events {
	if event.kind == EventKind::End {
	    debug!("release at {:?}", event.point);
	}
	recorder.handle(event);
    }
    if recorder.is_active() {
	info!("event stream ended inside a gesture, unfinished stroke dropped");
    }

    let request = recorder.raster_request();
    info!("{} strokes, crop box {}", request.paths.len(), request.view_box());
    println!("{}", serde_json::to_string(&request.bounding_box())?);

    if let Some(path) = &args.svg {
	request.save_svg(path, &recorder.config().stroke)?;
    }

    if let Some(path) = &args.record {
	let padding = recorder.config().padding;
	DrawingRecord::new(recorder.into_drawing(), None, padding).save(path)?;
    }

    Ok(())
}

fn bbox(record: PathBuf, padding: f64) -> Result<()> {
    let record = DrawingRecord::load(&record)
	.with_context(|| format!("load drawing record {}", record.display()))?;
    let bbox = record.drawing.bounding_box(padding);
    println!("{}", serde_json::to_string(&bbox)?);
    Ok(())
}

fn main() -> ExitCode {
    let result = parse_args(env::args().skip(1).collect()).and_then(|action| match action {
	Action::Replay(args) => replay(args),
	Action::Bbox { record, padding } => bbox(record, padding),
	Action::Help => {
	    println!("{}", USAGE);
	    Ok(())
	},
    });

    match result {
	Ok(()) => ExitCode::SUCCESS,
	Err(err) => {
	    eprintln!("error: {:#}", err);
	    ExitCode::FAILURE
	}
    }
}
