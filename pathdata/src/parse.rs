use std::str::FromStr;

use nom::{Finish, IResult, Parser, branch::alt, character::complete::{char, multispace0}, combinator::{all_consuming, opt}, multi::many0, number::complete::double, sequence::{
	preceded,
	terminated
}};
use thiserror::Error;

use crate::types::{Command, PathData, Point};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("path data is empty")]
    Empty,
    #[error("path data must start with a move command")]
    MissingMove,
    #[error("unexpected input at byte {offset}")]
    Syntax { offset: usize },
    #[error("command {index} has a coordinate that is not a finite number")]
    NonFinite { index: usize },
}

fn coordinate(s: &str) -> IResult<&str, f64> {
    preceded(multispace0, double)(s)
}

fn separator(s: &str) -> IResult<&str, Option<char>> {
    opt(preceded(multispace0, char(',')))(s)
}

fn pair(s: &str) -> IResult<&str, Point> {
    coordinate
	.and(preceded(separator, coordinate))
	.map(|(x, y)| Point::new(x, y))
	.parse(s)
}

fn command(s: &str) -> IResult<&str, Command> {
    preceded(multispace0,
	     alt((preceded(char('M'), pair).map(Command::Move),
		  preceded(char('L'), pair).map(Command::Line))))(s)
}

fn commands(s: &str) -> IResult<&str, Vec<Command>> {
    all_consuming(terminated(many0(command), multispace0))(s)
}

/// Parses path text of the form `M x y L x y ...`.
///
/// Whitespace between tokens is optional, so `M10-4L3,2` reads the same as
/// `M 10 -4 L 3 2`. Anything else fails the whole path: a partially matched
/// path never yields coordinates.
pub fn parse(input: &str) -> Result<PathData, ParseError> {
    let (_, commands) = commands(input)
	.finish()
	.map_err(|err: nom::error::Error<&str>| ParseError::Syntax {
	    offset: input.len() - err.input.len(),
	})?;

    match commands.first() {
	None => return Err(ParseError::Empty),
	Some(Command::Line(_)) => return Err(ParseError::MissingMove),
	Some(Command::Move(_)) => (),
    }

    if let Some(index) = commands.iter().position(|c| !c.point().is_valid()) {
	return Err(ParseError::NonFinite { index });
    }

    Ok(PathData(commands))
}

impl FromStr for PathData {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
	parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(s: &str) -> Vec<(f64, f64)> {
	parse(s).unwrap().points().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn single_move() {
	assert_eq!(points("M 50 50"), vec![(50.0, 50.0)]);
    }

    #[test]
    fn moves_and_lines() {
	assert_eq!(points("M 0 0 L 100 0 L 100 100 L 0 100"),
		   vec![(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)]);
    }

    #[test]
    fn compact_and_signed() {
	assert_eq!(points("M10-4L3,2"), vec![(10.0, -4.0), (3.0, 2.0)]);
	assert_eq!(points("M -1.5 -2.25 L-3 -4"), vec![(-1.5, -2.25), (-3.0, -4.0)]);
    }

    #[test]
    fn surrounding_whitespace() {
	assert_eq!(points("  M 1 2\nL 3 4  "), vec![(1.0, 2.0), (3.0, 4.0)]);
    }

    #[test]
    fn later_moves_start_subpaths() {
	let data = parse("M 1 1 L 2 2 M 5 5 L 6 6").unwrap();
	assert_eq!(data.len(), 4);
	assert_eq!(data.commands()[2], Command::Move(Point::new(5.0, 5.0)));
    }

    #[test]
    fn empty_text() {
	assert_eq!(parse(""), Err(ParseError::Empty));
	assert_eq!(parse("   "), Err(ParseError::Empty));
    }

    #[test]
    fn line_first_is_rejected() {
	assert_eq!(parse("L 1 2"), Err(ParseError::MissingMove));
    }

    #[test]
    fn garbage_fails_closed() {
	assert!(matches!(parse("M 1 2 L 3"), Err(ParseError::Syntax { .. })));
	assert!(matches!(parse("M 1 2 Q 3 4"), Err(ParseError::Syntax { .. })));
	assert!(matches!(parse("hello M 1 2"), Err(ParseError::Syntax { offset: 0 })));
	assert!(matches!(parse("M 1 2 L x y"), Err(ParseError::Syntax { .. })));
    }

    #[test]
    fn round_trips_display() {
	let text = "M 12.5 7 L -3 0.125";
	assert_eq!(parse(text).unwrap().to_string(), text);
    }

    #[test]
    fn from_str() {
	let data: PathData = "M 3 4".parse().unwrap();
	assert_eq!(data.commands(), &[Command::Move(Point::new(3.0, 4.0))]);
    }
}
